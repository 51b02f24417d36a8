pub mod call;
pub mod car_id;
pub mod config;
pub mod direction;
pub mod error;
pub mod request;
