/// ----- CONTROLLER -----
/// One controller per car. Dispatchers push floors into its two request
/// containers from any thread; the controller's own worker is the only one
/// draining them, driving the car with the SCAN discipline: finish every
/// pending floor in the current direction, nearest first, then reverse.

use std::sync::Arc;

use crossbeam_channel::{bounded, Receiver, Sender};
use log::debug;
use parking_lot::Mutex;

use shared_resources::car_id::CarId;
use shared_resources::config::ControllerConfig;
use shared_resources::direction::Direction;
use shared_resources::error::{DispatchError, DispatchResult, MoveError};
use shared_resources::request::Request;

use crate::car::Car;
use crate::display::DisplaySink;
use crate::requests::RequestQueues;

pub struct Controller {
    car: Arc<Car>,
    num_floors: u8,
    queues: Mutex<RequestQueues>,
    doorbell_tx: Sender<()>,
    doorbell_rx: Receiver<()>,
    display: Arc<dyn DisplaySink>,
}

impl Controller {
    pub fn new(
        car: Arc<Car>,
        num_floors: u8,
        config: &ControllerConfig,
        display: Arc<dyn DisplaySink>,
    ) -> Self {
        // A single pending ring is enough to make the worker look at the
        // queues again, so extra rings are dropped.
        let (doorbell_tx, doorbell_rx) = bounded(1);
        Controller {
            car: car,
            num_floors: num_floors,
            queues: Mutex::new(RequestQueues::new(config.dedupe_requests)),
            doorbell_tx: doorbell_tx,
            doorbell_rx: doorbell_rx,
            display: display,
        }
    }

    pub fn id(&self) -> CarId {
        self.car.id()
    }

    pub fn car(&self) -> &Arc<Car> {
        &self.car
    }

    pub fn num_floors(&self) -> u8 {
        self.num_floors
    }

    /// Hall call: the floor goes into the container for its direction.
    pub fn submit_external_request(&self, floor: u8, direction: Direction) -> DispatchResult<()> {
        let request = Request::hall(floor, direction).ok_or(DispatchError::InvalidDirection(direction))?;
        self.enqueue(request)
    }

    /// Car call: the container is picked from where the car is right now.
    /// It is not revisited if the car moves before the floor is drained.
    pub fn submit_internal_request(&self, floor: u8) -> DispatchResult<()> {
        self.enqueue(Request::cab(floor))
    }

    fn enqueue(&self, request: Request) -> DispatchResult<()> {
        if request.floor >= self.num_floors {
            return Err(DispatchError::InvalidFloor { floor: request.floor, num_floors: self.num_floors })
        }
        let direction = request.direction_from(self.car.floor());
        let accepted = self.queues.lock().push(direction, request.floor);
        if accepted {
            debug!("{} queued floor {} going {} ({:?})", self.id(), request.floor, direction, request.call);
            // Full means the worker has not picked up an earlier ring yet.
            let _ = self.doorbell_tx.try_send(());
        } else {
            debug!("{} already has floor {} going {}", self.id(), request.floor, direction);
        }
        Ok(())
    }

    /// Drains both containers, reversing as often as needed, and returns
    /// once nothing is pending with the car idle. Meant to be called from a
    /// single thread per controller at a time.
    pub fn run(&self) {
        loop {
            if matches!(self.car.direction(), Direction::Up | Direction::Idle) {
                self.sweep(Direction::Up);
            }
            if matches!(self.car.direction(), Direction::Down | Direction::Idle) {
                self.sweep(Direction::Down);
            }

            let queues = self.queues.lock();
            if queues.is_empty() {
                self.car.set_direction(Direction::Idle);
                return
            }
        }
    }

    fn sweep(&self, direction: Direction) {
        while let Some((floor, heading)) = self.next_floor(direction) {
            match self.car.walk(direction, floor, heading, self.display.as_ref()) {
                Ok(()) => {
                    // Floors may have come in while the car was moving.
                    let queues = self.queues.lock();
                    if let Some(next) = next_heading(&queues, direction) {
                        self.car.set_direction(next);
                    }
                },
                Err(MoveError::Unreachable { from, .. }) => {
                    // Behind the car for this sweep: it is on the way back.
                    debug!("{} deferring floor {} from {} to the {} sweep", self.id(), floor, from, direction.opposite());
                    self.queues.lock().push(direction.opposite(), floor);
                },
                Err(MoveError::NoDirection) => unreachable!("sweeps always have a direction"),
            }
        }

        let queues = self.queues.lock();
        if queues.has_pending(direction.opposite()) {
            self.car.set_direction(direction.opposite());
        }
    }

    /// Pops the next floor of the sweep together with the heading the car
    /// keeps once it stops there. The car takes the sweep direction before
    /// the lock is released, so it never looks idle with a floor in hand.
    /// Only this controller's loop pops, so whatever is pending now is still
    /// pending on arrival.
    fn next_floor(&self, direction: Direction) -> Option<(u8, Direction)> {
        let mut queues = self.queues.lock();
        let floor = queues.pop(direction)?;
        self.car.set_direction(direction);
        let heading = next_heading(&queues, direction).unwrap_or(Direction::Idle);
        Some((floor, heading))
    }

    /// Pending floors in service order: (upward ascending, downward descending).
    pub fn pending(&self) -> (Vec<u8>, Vec<u8>) {
        self.queues.lock().snapshot()
    }

    pub fn is_idle(&self) -> bool {
        let queues = self.queues.lock();
        queues.is_empty() && self.car.direction() == Direction::Idle
    }

    pub(crate) fn doorbell(&self) -> Receiver<()> {
        self.doorbell_rx.clone()
    }
}

/// Keep going while the sweep has floors left, otherwise turn around if the
/// other container has any.
fn next_heading(queues: &RequestQueues, direction: Direction) -> Option<Direction> {
    if queues.has_pending(direction) {
        Some(direction)
    } else if queues.has_pending(direction.opposite()) {
        Some(direction.opposite())
    } else {
        None
    }
}
