/// ----- CALL SOURCES -----
/// The buttons passengers press: one hall panel per floor and one panel of
/// destination buttons inside each car.

use std::sync::Arc;

use car::Car;
use shared_resources::car_id::CarId;
use shared_resources::direction::Direction;
use shared_resources::error::DispatchResult;

use crate::external::ExternalDispatcher;
use crate::internal::InternalDispatcher;

#[derive(Clone)]
pub struct Floor {
    number: u8,
    dispatcher: Arc<ExternalDispatcher>,
}

impl Floor {
    pub fn new(number: u8, dispatcher: Arc<ExternalDispatcher>) -> Self {
        Floor { number: number, dispatcher: dispatcher }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Returns the car the call was given to.
    pub fn press_button(&self, direction: Direction) -> DispatchResult<CarId> {
        self.dispatcher.submit_external_request(self.number, direction)
    }
}

#[derive(Clone)]
pub struct CarButtons {
    car: Arc<Car>,
    dispatcher: Arc<InternalDispatcher>,
}

impl CarButtons {
    pub fn new(car: Arc<Car>, dispatcher: Arc<InternalDispatcher>) -> Self {
        CarButtons { car: car, dispatcher: dispatcher }
    }

    pub fn car(&self) -> &Arc<Car> {
        &self.car
    }

    pub fn press_button(&self, destination: u8) -> DispatchResult<()> {
        self.dispatcher.submit_internal_request(destination, &self.car)
    }
}
