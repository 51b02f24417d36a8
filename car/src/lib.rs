pub mod car;
pub mod controller;
pub mod display;
pub mod requests;
pub mod worker;

pub use car::{Car, CarState};
pub use controller::Controller;
pub use display::{DisplaySink, DisplayUpdate, LogDisplay};
pub use requests::RequestQueues;
pub use worker::ControllerWorker;
