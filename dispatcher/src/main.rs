use std::sync::Arc;
use std::thread;

use crossbeam_channel::unbounded;
use log::{info, warn};
use tracing_subscriber::EnvFilter;

use car::{DisplaySink, LogDisplay};
use dispatcher::Fleet;
use shared_resources::car_id::CarId;
use shared_resources::config::FleetConfig;
use shared_resources::direction::Direction;
use shared_resources::error::{DispatchResult, FleetError};

mod debug;

fn main() -> Result<(), FleetError> {
    // Logs go to stderr so they do not tear the status board on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // READ CONFIGURATION
    let config = FleetConfig::get()?;

    // INITIALIZE DISPLAY
    let mut debug_handle = None;
    let display: Arc<dyn DisplaySink> = if config.display.terminal {
        let (display_tx, display_rx) = unbounded();
        let num_floors = config.elevator.num_floors;
        debug_handle = Some(thread::Builder::new()
            .name("debug".to_string())
            .spawn(move || debug::main(num_floors, display_rx))?);
        Arc::new(display_tx)
    } else {
        Arc::new(LogDisplay)
    };

    // START ONE WORKER PER CAR
    let fleet = Fleet::start(&config, display)?;

    {
        // HALL CALLS
        let floors = fleet.floors();
        for (number, direction) in [(0, Direction::Up), (3, Direction::Down)] {
            match floors.get(number) {
                Some(floor) => report(floor.press_button(direction).map(|car| {
                    info!("hall call at floor {} going {} taken by {}", number, direction, car);
                })),
                None => warn!("building has no floor {}, skipping hall call", number),
            }
        }

        // CAR CALLS
        for (car, destination) in [(CarId(0), 2), (CarId(0), 3), (CarId(1), 1)] {
            report(fleet.car_buttons(car).and_then(|buttons| buttons.press_button(destination)));
        }
    }

    info!("STOPPING PROGRAM...");
    fleet.shutdown()?;

    if let Some(handle) = debug_handle {
        match handle.join() {
            Ok(Err(e)) => warn!("status board failed: {}", e),
            Err(_) => warn!("status board thread panicked"),
            Ok(Ok(())) => (),
        }
    }
    Ok(())
}

/// Routing failures are reported and the program keeps going.
fn report(result: DispatchResult<()>) {
    if let Err(e) = result {
        warn!("request dropped: {}", e);
    }
}
