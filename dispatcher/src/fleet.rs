/// ----- FLEET -----
/// Builds every car and controller once, hands the shared registry to both
/// dispatchers and starts one worker per car. Shutdown stops and joins the
/// workers after they have served what is queued.

use std::sync::Arc;

use car::{Car, Controller, ControllerWorker, DisplaySink};
use log::{error, info};
use shared_resources::car_id::CarId;
use shared_resources::config::FleetConfig;
use shared_resources::direction::Direction;
use shared_resources::error::{DispatchError, DispatchResult, FleetResult};

use crate::external::ExternalDispatcher;
use crate::floor::{CarButtons, Floor};
use crate::internal::InternalDispatcher;
use crate::registry::Registry;

pub struct Fleet {
    num_floors: u8,
    registry: Arc<Registry>,
    external: Arc<ExternalDispatcher>,
    internal: Arc<InternalDispatcher>,
    workers: Vec<ControllerWorker>,
}

impl Fleet {
    pub fn start(config: &FleetConfig, display: Arc<dyn DisplaySink>) -> FleetResult<Self> {
        config.validate()?;
        let num_floors = config.elevator.num_floors;
        let controllers = (0..config.elevator.num_cars)
            .map(|i| {
                let car = Arc::new(Car::with_state(CarId(i), config.start_floor(i), Direction::Idle));
                Arc::new(Controller::new(car, num_floors, &config.controller, Arc::clone(&display)))
            })
            .collect();
        Fleet::from_controllers(controllers)
    }

    /// Starts workers for controllers built elsewhere, e.g. with cars placed
    /// mid-building.
    pub fn from_controllers(controllers: Vec<Arc<Controller>>) -> FleetResult<Self> {
        let registry = Arc::new(Registry::new(controllers)?);
        let num_floors = registry.iter().map(|controller| controller.num_floors()).max().unwrap_or(0);

        let mut workers = Vec::with_capacity(registry.len());
        for controller in registry.iter() {
            workers.push(ControllerWorker::spawn(Arc::clone(controller))?);
        }
        info!("fleet started with {} cars serving {} floors", registry.len(), num_floors);

        Ok(Fleet {
            num_floors: num_floors,
            external: Arc::new(ExternalDispatcher::new(Arc::clone(&registry))),
            internal: Arc::new(InternalDispatcher::new(Arc::clone(&registry))),
            registry: registry,
            workers: workers,
        })
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn external_dispatcher(&self) -> &Arc<ExternalDispatcher> {
        &self.external
    }

    pub fn internal_dispatcher(&self) -> &Arc<InternalDispatcher> {
        &self.internal
    }

    pub fn floor(&self, number: u8) -> DispatchResult<Floor> {
        if number >= self.num_floors {
            return Err(DispatchError::InvalidFloor { floor: number, num_floors: self.num_floors })
        }
        Ok(Floor::new(number, Arc::clone(&self.external)))
    }

    pub fn floors(&self) -> Vec<Floor> {
        (0..self.num_floors).map(|number| Floor::new(number, Arc::clone(&self.external))).collect()
    }

    pub fn car_buttons(&self, id: CarId) -> DispatchResult<CarButtons> {
        let controller = self.registry.get(id).ok_or(DispatchError::UnknownCar(id))?;
        Ok(CarButtons::new(Arc::clone(controller.car()), Arc::clone(&self.internal)))
    }

    pub fn is_idle(&self) -> bool {
        self.registry.iter().all(|controller| controller.is_idle())
    }

    /// Stops every worker, even if one of them fails, and reports the first
    /// failure.
    pub fn shutdown(self) -> FleetResult<()> {
        let mut result = Ok(());
        for worker in self.workers {
            let id = worker.id();
            if let Err(e) = worker.stop() {
                error!("{} did not shut down cleanly: {}", id, e);
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        info!("fleet stopped");
        result
    }
}
