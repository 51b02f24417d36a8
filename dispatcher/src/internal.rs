/// ----- INTERNAL DISPATCHER -----
/// Routes a car call to the controller that owns the car it was made in.

use std::sync::Arc;

use car::Car;
use log::{debug, warn};
use shared_resources::error::{DispatchError, DispatchResult};

use crate::registry::Registry;

pub struct InternalDispatcher {
    registry: Arc<Registry>,
}

impl InternalDispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        InternalDispatcher { registry: registry }
    }

    /// Ownership is decided by identity: a car from another fleet with the
    /// same id is still unknown here.
    pub fn submit_internal_request(&self, floor: u8, car: &Car) -> DispatchResult<()> {
        let controller = self
            .registry
            .iter()
            .find(|controller| std::ptr::eq(controller.car().as_ref(), car))
            .ok_or_else(|| {
                warn!("car call to floor {} from unregistered {}", floor, car.id());
                DispatchError::UnknownCar(car.id())
            })?;
        if let Err(e) = controller.submit_internal_request(floor) {
            warn!("rejected car call in {} to floor {}: {}", car.id(), floor, e);
            return Err(e)
        }
        debug!("car call in {} to floor {}", car.id(), floor);
        Ok(())
    }
}
