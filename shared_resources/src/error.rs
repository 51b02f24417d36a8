use thiserror::Error;

use crate::car_id::CarId;
use crate::direction::Direction;

/// Failures reported to whoever pressed a button. None of them affect any
/// controller's loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    #[error("floor {floor} is outside the served range 0..{num_floors}")]
    InvalidFloor { floor: u8, num_floors: u8 },

    #[error("hall calls must go up or down, got {0}")]
    InvalidDirection(Direction),

    #[error("{0} is not registered with any controller")]
    UnknownCar(CarId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("cannot reach floor {to} from floor {from} going {direction}")]
    Unreachable { from: u8, to: u8, direction: Direction },

    #[error("a car cannot move without a direction")]
    NoDirection,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("a fleet needs at least one car")]
    EmptyRegistry,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not spawn controller worker: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker for {0} panicked")]
    WorkerPanicked(CarId),
}

pub type DispatchResult<T> = Result<T, DispatchError>;
pub type FleetResult<T> = Result<T, FleetError>;
