/// ----- EXTERNAL DISPATCHER -----
/// Assigns every hall call to exactly one car. First choice is the nearest
/// car that will pass the floor going the requested way (or is idle). If no
/// car qualifies, the nearest car overall takes it. Ties go to the car
/// registered first.

use std::sync::Arc;

use car::{CarState, Controller};
use log::{debug, warn};
use shared_resources::car_id::CarId;
use shared_resources::direction::Direction;
use shared_resources::error::{DispatchError, DispatchResult};

use crate::registry::Registry;

pub struct ExternalDispatcher {
    registry: Arc<Registry>,
}

impl ExternalDispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        ExternalDispatcher { registry: registry }
    }

    /// The controller a hall call from `floor` going `direction` would be
    /// given to right now.
    pub fn select_car(&self, floor: u8, direction: Direction) -> &Arc<Controller> {
        let controllers: Vec<&Arc<Controller>> = self.registry.iter().collect();
        let states: Vec<CarState> = controllers.iter().map(|controller| controller.car().state()).collect();
        // A registry always holds at least one controller, so there is a pick.
        let index = assign(&states, floor, direction).unwrap_or(0);
        controllers[index]
    }

    pub fn submit_external_request(&self, floor: u8, direction: Direction) -> DispatchResult<CarId> {
        if direction == Direction::Idle {
            warn!("rejected hall call from floor {} without a direction", floor);
            return Err(DispatchError::InvalidDirection(direction))
        }
        let controller = self.select_car(floor, direction);
        if let Err(e) = controller.submit_external_request(floor, direction) {
            warn!("rejected hall call from floor {} going {}: {}", floor, direction, e);
            return Err(e)
        }
        debug!("hall call from floor {} going {} assigned to {}", floor, direction, controller.id());
        Ok(controller.id())
    }
}

/// Index of the car in `states` that should take a hall call, or `None` if
/// there are no cars at all.
pub fn assign(states: &[CarState], floor: u8, direction: Direction) -> Option<usize> {
    nearest(states, floor, |state| is_eligible(state, floor, direction))
        .or_else(|| nearest(states, floor, |_| true))
}

/// Idle cars can go anywhere. A moving car qualifies only if it is heading
/// the requested way and has not passed the floor yet.
fn is_eligible(state: &CarState, floor: u8, direction: Direction) -> bool {
    match (state.direction, direction) {
        (Direction::Idle, _) => true,
        (Direction::Up, Direction::Up) => state.floor <= floor,
        (Direction::Down, Direction::Down) => state.floor >= floor,
        _ => false,
    }
}

fn nearest(states: &[CarState], floor: u8, eligible: impl Fn(&CarState) -> bool) -> Option<usize> {
    let mut best: Option<(usize, u8)> = None;
    for (index, state) in states.iter().enumerate() {
        if !eligible(state) {
            continue
        }
        let distance = state.floor.abs_diff(floor);
        if best.map_or(true, |(_, best_distance)| distance < best_distance) {
            best = Some((index, distance));
        }
    }
    best.map(|(index, _)| index)
}
