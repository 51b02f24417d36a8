/// ----- CONTROLLER WORKER -----
/// Each controller gets its own thread so cars move independently. The
/// thread sleeps until a submission rings the controller's doorbell, drains
/// the queues, and goes back to sleep. A stop signal (or dropping the
/// worker handle) makes it serve what is still queued and exit.

use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, select, Receiver, Sender};
use log::{debug, info};

use shared_resources::car_id::CarId;
use shared_resources::error::FleetError;

use crate::controller::Controller;

pub struct ControllerWorker {
    id: CarId,
    stop_tx: Sender<()>,
    handle: JoinHandle<()>,
}

impl ControllerWorker {
    pub fn spawn(controller: Arc<Controller>) -> io::Result<Self> {
        let id = controller.id();
        let (stop_tx, stop_rx) = bounded(1);
        let handle = thread::Builder::new()
            .name(id.to_string())
            .spawn(move || main(controller, stop_rx))?;
        Ok(ControllerWorker { id: id, stop_tx: stop_tx, handle: handle })
    }

    pub fn id(&self) -> CarId {
        self.id
    }

    /// Signals the worker and waits for it to finish its remaining requests.
    pub fn stop(self) -> Result<(), FleetError> {
        if self.stop_tx.send(()).is_err() {
            debug!("{} worker already gone", self.id);
        }
        self.handle.join().map_err(|_| FleetError::WorkerPanicked(self.id))
    }
}

fn main(controller: Arc<Controller>, stop_rx: Receiver<()>) {
    info!("{} controller started", controller.id());
    let doorbell_rx = controller.doorbell();

    loop {
        select! {
            recv(doorbell_rx) -> _ => {
                controller.run();
            },
            recv(stop_rx) -> _ => {
                controller.run();
                break;
            },
        }
    }
    info!("{} controller stopped at floor {}", controller.id(), controller.car().floor());
}
