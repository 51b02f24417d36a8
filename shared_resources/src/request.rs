use super::call::Call;
use super::direction::Direction;

/// A button press, as a plain value. Once a controller has queued it the
/// request only exists as a floor number in one of its containers.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: u8,
    pub call: Call,
}

impl Request {
    /// Hall call from `floor`. Returns `None` for `Direction::Idle`, which no
    /// hall button produces.
    pub fn hall(floor: u8, direction: Direction) -> Option<Self> {
        direction.to_call().map(|call| Request { floor, call })
    }

    pub fn cab(floor: u8) -> Self {
        Request { floor, call: Call::Cab }
    }

    /// Container a controller files this request under when its car is at
    /// `car_floor`.
    pub fn direction_from(&self, car_floor: u8) -> Direction {
        match self.call.direction() {
            Some(direction) => direction,
            None => Direction::towards(car_floor, self.floor),
        }
    }
}
