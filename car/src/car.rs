/// ----- CAR -----
/// Physical state of one cabin. A car knows where it is and which way it is
/// heading, and can walk itself to a floor. It has no idea why it is going
/// there: every scheduling decision is taken by its controller.

use log::debug;
use parking_lot::RwLock;

use shared_resources::car_id::CarId;
use shared_resources::direction::Direction;
use shared_resources::error::MoveError;

use crate::display::{DisplaySink, DisplayUpdate};

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarState {
    pub floor: u8,
    pub direction: Direction,
}

#[derive(Debug)]
pub struct Car {
    id: CarId,
    state: RwLock<CarState>,
}

impl Car {
    pub fn new(id: CarId) -> Self {
        Car::with_state(id, 0, Direction::Idle)
    }

    pub fn with_state(id: CarId, floor: u8, direction: Direction) -> Self {
        Car {
            id: id,
            state: RwLock::new(CarState { floor: floor, direction: direction }),
        }
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    pub fn state(&self) -> CarState {
        *self.state.read()
    }

    pub fn floor(&self) -> u8 {
        self.state.read().floor
    }

    pub fn direction(&self) -> Direction {
        self.state.read().direction
    }

    /// Only the owning controller changes the heading outside of a move.
    pub(crate) fn set_direction(&self, direction: Direction) {
        self.state.write().direction = direction;
    }

    /// Walks one floor at a time from the current floor to `target`, pushing
    /// a display update after every step. The walk includes the starting
    /// floor, so moving to where the car already is still shows it once.
    /// On arrival the car is idle.
    pub fn move_to(&self, direction: Direction, target: u8, display: &dyn DisplaySink) -> Result<(), MoveError> {
        self.walk(direction, target, Direction::Idle, display)
    }

    /// Same walk as `move_to`, but the car keeps `heading` once it stops at
    /// `target`. The display still shows the stop as idle.
    pub(crate) fn walk(
        &self,
        direction: Direction,
        target: u8,
        heading: Direction,
        display: &dyn DisplaySink,
    ) -> Result<(), MoveError> {
        let from = self.floor();
        let floors: Box<dyn Iterator<Item = u8>> = match direction {
            Direction::Up if from <= target => Box::new(from..=target),
            Direction::Down if from >= target => Box::new((target..=from).rev()),
            Direction::Idle => return Err(MoveError::NoDirection),
            _ => return Err(MoveError::Unreachable { from: from, to: target, direction: direction }),
        };

        for floor in floors {
            let (shown, kept) = if floor == target { (Direction::Idle, heading) } else { (direction, direction) };
            *self.state.write() = CarState { floor: floor, direction: kept };
            debug!("{} at floor {} ({})", self.id, floor, shown);
            display.show(DisplayUpdate { car: self.id, floor: floor, direction: shown });
        }
        Ok(())
    }
}
