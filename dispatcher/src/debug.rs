/// ----- DEBUG MODULE -----
/// Renders the latest display update of every car as a status board on the
/// terminal, redrawn in place after each step.

use std::collections::BTreeMap;
use std::io::{self, stdout, Stdout, Write};

use car::DisplayUpdate;
use crossbeam_channel::Receiver;
use crossterm::{cursor, terminal, ExecutableCommand};
use shared_resources::car_id::CarId;
use shared_resources::direction::Direction;

// Title block plus header row; every car adds two more lines.
const HEADER_SIZE: u16 = 5;
const SHAFT_WIDTH: usize = 16;

pub fn main(num_floors: u8, display_rx: Receiver<DisplayUpdate>) -> io::Result<()> {
    let mut stdout = stdout();
    let mut cars: BTreeMap<CarId, DisplayUpdate> = BTreeMap::new();
    let mut printed: u16 = 0;

    for update in display_rx.iter() {
        cars.insert(update.car, update);
        if printed > 0 {
            stdout.execute(cursor::MoveUp(printed))?;
        }
        printed = printstatus(&mut stdout, num_floors, &cars)?;
    }
    Ok(())
}

fn printstatus(
    stdout: &mut Stdout,
    num_floors: u8,
    cars: &BTreeMap<CarId, DisplayUpdate>,
) -> io::Result<u16> {
    stdout.execute(terminal::Clear(terminal::ClearType::FromCursorDown))?;

    writeln!(stdout, "+---------------------------------------------------------+")?;
    writeln!(stdout, "| CARS                                                    |")?;
    writeln!(stdout, "+------------+------------+------------+------------------+")?;
    writeln!(stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<16} |", "CAR", "FLOOR", "DIRECTION", "SHAFT")?;
    writeln!(stdout, "+------------+------------+------------+------------------+")?;
    for (id, update) in cars {
        writeln!(stdout, "| {0:<10} | {1:<10} | {2:<10} | {3:<16} |",
            id.to_string(),
            update.floor,
            update.direction.as_string(),
            shaft(num_floors, update.floor, update.direction))?;
        writeln!(stdout, "+------------+------------+------------+------------------+")?;
    }
    stdout.flush()?;

    Ok(HEADER_SIZE + 2 * cars.len() as u16)
}

/// One character per floor, ground floor first, with the car drawn as its
/// heading. Buildings taller than the column share characters between
/// neighbouring floors.
fn shaft(num_floors: u8, floor: u8, direction: Direction) -> String {
    let car = match direction {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Idle => '#',
    };
    let width = (num_floors as usize).min(SHAFT_WIDTH);
    let position = floor as usize * width / (num_floors as usize).max(1);
    (0..width)
        .map(|cell| if cell == position { car } else { '.' })
        .collect()
}
