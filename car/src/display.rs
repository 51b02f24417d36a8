/// ----- DISPLAY -----
/// Cars report every floor they pass through. What happens with the report
/// (a status board, a log line, a test recording it) is up to the sink.

use crossbeam_channel::Sender;
use log::{debug, info};

use shared_resources::car_id::CarId;
use shared_resources::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayUpdate {
    pub car: CarId,
    pub floor: u8,
    pub direction: Direction,
}

impl DisplayUpdate {
    /// An update with an idle car is the car stopping at a requested floor.
    pub fn is_arrival(&self) -> bool {
        self.direction == Direction::Idle
    }
}

pub trait DisplaySink: Send + Sync {
    fn show(&self, update: DisplayUpdate);
}

impl DisplaySink for Sender<DisplayUpdate> {
    fn show(&self, update: DisplayUpdate) {
        if self.send(update).is_err() {
            debug!("display for {} disconnected, dropping update", update.car);
        }
    }
}

/// Writes every step to the log instead of a screen.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn show(&self, update: DisplayUpdate) {
        info!("{}: floor {} {}", update.car, update.floor, update.direction);
    }
}
