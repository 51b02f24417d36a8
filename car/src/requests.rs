/// ----- REQUEST QUEUES -----
/// The two containers a controller drains: floors to visit going up, served
/// lowest first, and floors to visit going down, served highest first.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use shared_resources::direction::Direction;

#[derive(Debug, Clone, Default)]
pub struct RequestQueues {
    up: BinaryHeap<Reverse<u8>>,
    down: BinaryHeap<u8>,
    dedupe: bool,
}

impl RequestQueues {
    pub fn new(dedupe: bool) -> Self {
        RequestQueues {
            up: BinaryHeap::new(),
            down: BinaryHeap::new(),
            dedupe: dedupe,
        }
    }

    /// Queues `floor` in the container for `direction`; `Direction::Idle` is
    /// filed with the downward floors. Returns false if deduplication is on
    /// and the floor was already waiting in that container.
    pub fn push(&mut self, direction: Direction, floor: u8) -> bool {
        match direction {
            Direction::Up => {
                if self.dedupe && self.up.iter().any(|&Reverse(f)| f == floor) {
                    return false
                }
                self.up.push(Reverse(floor));
            },
            Direction::Down | Direction::Idle => {
                if self.dedupe && self.down.iter().any(|&f| f == floor) {
                    return false
                }
                self.down.push(floor);
            },
        }
        true
    }

    /// Next floor of the sweep in `direction`: the lowest pending upward
    /// floor, or the highest pending downward floor.
    pub fn pop(&mut self, direction: Direction) -> Option<u8> {
        match direction {
            Direction::Up => self.up.pop().map(|Reverse(floor)| floor),
            Direction::Down => self.down.pop(),
            Direction::Idle => None,
        }
    }

    pub fn has_pending(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => !self.up.is_empty(),
            Direction::Down => !self.down.is_empty(),
            Direction::Idle => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.up.is_empty() && self.down.is_empty()
    }

    /// Pending floors in the order they would be served: upward ascending,
    /// downward descending.
    pub fn snapshot(&self) -> (Vec<u8>, Vec<u8>) {
        let mut up: Vec<u8> = self.up.iter().map(|&Reverse(f)| f).collect();
        up.sort_unstable();
        let mut down: Vec<u8> = self.down.iter().copied().collect();
        down.sort_unstable_by(|a, b| b.cmp(a));
        (up, down)
    }
}
