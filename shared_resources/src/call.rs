use crate::direction::Direction;

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Call {
    HallUp = 0,
    HallDown = 1,
    Cab = 2,
}

impl Call {
    /// Travel direction carried by a hall call. Car calls carry none; it is
    /// inferred from the car's position when they are submitted.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Call::HallUp => Some(Direction::Up),
            Call::HallDown => Some(Direction::Down),
            Call::Cab => None,
        }
    }
}
