/// ----- REGISTRY -----
/// The controllers of one fleet, fixed at startup. Dispatchers share it to
/// look cars up; nothing is added or removed afterwards.

use std::sync::Arc;

use car::Controller;
use shared_resources::car_id::CarId;
use shared_resources::error::FleetError;

pub struct Registry {
    controllers: Vec<Arc<Controller>>,
}

impl Registry {
    pub fn new(controllers: Vec<Arc<Controller>>) -> Result<Self, FleetError> {
        if controllers.is_empty() {
            return Err(FleetError::EmptyRegistry)
        }
        Ok(Registry { controllers: controllers })
    }

    /// Controllers in registration order, which is also the tie-break order
    /// for hall call assignment.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Controller>> {
        self.controllers.iter()
    }

    pub fn get(&self, id: CarId) -> Option<&Arc<Controller>> {
        self.controllers.iter().find(|controller| controller.id() == id)
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}
