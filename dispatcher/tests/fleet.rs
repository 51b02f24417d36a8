use std::collections::HashMap;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver};

use car::{Car, CarState, Controller, DisplayUpdate};
use dispatcher::Fleet;
use shared_resources::car_id::CarId;
use shared_resources::config::{ControllerConfig, FleetConfig};
use shared_resources::direction::Direction;
use shared_resources::error::{DispatchError, FleetError};

const TIMEOUT: Duration = Duration::from_secs(5);

fn config(num_floors: u8, num_cars: u8) -> FleetConfig {
    let mut config = FleetConfig::default();
    config.elevator.num_floors = num_floors;
    config.elevator.num_cars = num_cars;
    config
}

fn start(num_floors: u8, num_cars: u8) -> (Fleet, Receiver<DisplayUpdate>) {
    let (display_tx, display_rx) = unbounded();
    let fleet = Fleet::start(&config(num_floors, num_cars), Arc::new(display_tx)).unwrap();
    (fleet, display_rx)
}

fn wait_idle(fleet: &Fleet) {
    let deadline = Instant::now() + TIMEOUT;
    while !fleet.is_idle() {
        assert!(Instant::now() < deadline, "fleet never settled");
        thread::sleep(Duration::from_millis(2));
    }
}

fn arrivals(display_rx: &Receiver<DisplayUpdate>) -> Vec<(CarId, u8)> {
    display_rx.try_iter().filter(DisplayUpdate::is_arrival).map(|u| (u.car, u.floor)).collect()
}

#[test]
fn hall_call_is_served_and_car_rests_there() {
    let (fleet, display_rx) = start(10, 1);

    let car = fleet.floor(5).unwrap().press_button(Direction::Up).unwrap();
    assert_eq!(car, CarId(0));
    fleet.shutdown().unwrap();

    assert_eq!(arrivals(&display_rx), vec![(CarId(0), 5)]);
}

#[test]
fn car_calls_go_to_the_car_they_were_made_in() {
    let (fleet, display_rx) = start(6, 2);

    fleet.car_buttons(CarId(1)).unwrap().press_button(4).unwrap();
    fleet.car_buttons(CarId(0)).unwrap().press_button(2).unwrap();
    wait_idle(&fleet);

    let first = fleet.registry().get(CarId(0)).unwrap();
    let second = fleet.registry().get(CarId(1)).unwrap();
    assert_eq!(first.car().state(), CarState { floor: 2, direction: Direction::Idle });
    assert_eq!(second.car().state(), CarState { floor: 4, direction: Direction::Idle });

    fleet.shutdown().unwrap();
    let mut served = arrivals(&display_rx);
    served.sort();
    assert_eq!(served, vec![(CarId(0), 2), (CarId(1), 4)]);
}

#[test]
fn concurrent_submissions_are_each_served_once() {
    let (fleet, display_rx) = start(20, 1);
    let controller = Arc::clone(fleet.registry().get(CarId(0)).unwrap());

    let producers: Vec<_> = [(Direction::Up, [3, 7, 11, 15]), (Direction::Down, [18, 12, 8, 2])]
        .into_iter()
        .map(|(direction, floors)| {
            let controller = Arc::clone(&controller);
            thread::spawn(move || {
                for floor in floors {
                    controller.submit_external_request(floor, direction).unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }
    fleet.shutdown().unwrap();

    let mut served: HashMap<u8, usize> = HashMap::new();
    for (_, floor) in arrivals(&display_rx) {
        *served.entry(floor).or_default() += 1;
    }
    let expected: HashMap<u8, usize> = [3, 7, 11, 15, 18, 12, 8, 2].into_iter().map(|f| (f, 1)).collect();
    assert_eq!(served, expected);
}

#[test]
fn every_step_is_a_single_floor() {
    let (fleet, display_rx) = start(12, 1);
    let floors = fleet.floors();

    floors[9].press_button(Direction::Down).unwrap();
    floors[4].press_button(Direction::Up).unwrap();
    fleet.car_buttons(CarId(0)).unwrap().press_button(11).unwrap();
    fleet.shutdown().unwrap();

    let steps: Vec<u8> = display_rx.try_iter().map(|u| u.floor).collect();
    assert!(!steps.is_empty());
    for pair in steps.windows(2) {
        assert!(pair[0].abs_diff(pair[1]) <= 1, "car jumped from {} to {}", pair[0], pair[1]);
    }
}

#[test]
fn hall_call_goes_to_nearest_eligible_car() {
    let (display_tx, _display_rx) = unbounded::<DisplayUpdate>();
    let controllers = [(2, Direction::Up), (8, Direction::Idle)]
        .into_iter()
        .enumerate()
        .map(|(i, (floor, direction))| {
            let car = Arc::new(Car::with_state(CarId(i as u8), floor, direction));
            Arc::new(Controller::new(car, 10, &ControllerConfig::default(), Arc::new(display_tx.clone())))
        })
        .collect();
    let fleet = Fleet::from_controllers(controllers).unwrap();

    assert_eq!(fleet.external_dispatcher().select_car(4, Direction::Up).id(), CarId(0));
    fleet.shutdown().unwrap();
}

#[test]
fn bad_calls_are_reported_and_fleet_keeps_working() {
    let (fleet, display_rx) = start(4, 2);

    assert_eq!(fleet.floor(4).err(), Some(DispatchError::InvalidFloor { floor: 4, num_floors: 4 }));
    assert_eq!(fleet.car_buttons(CarId(5)).err(), Some(DispatchError::UnknownCar(CarId(5))));
    assert_eq!(
        fleet.floor(1).unwrap().press_button(Direction::Idle),
        Err(DispatchError::InvalidDirection(Direction::Idle))
    );
    assert_eq!(
        fleet.car_buttons(CarId(0)).unwrap().press_button(9),
        Err(DispatchError::InvalidFloor { floor: 9, num_floors: 4 })
    );

    let foreign = Car::new(CarId(0));
    assert_eq!(
        fleet.internal_dispatcher().submit_internal_request(1, &foreign),
        Err(DispatchError::UnknownCar(CarId(0)))
    );

    fleet.floor(3).unwrap().press_button(Direction::Down).unwrap();
    fleet.shutdown().unwrap();
    assert_eq!(arrivals(&display_rx).len(), 1);
}

#[test]
fn empty_fleet_is_rejected_at_startup() {
    assert!(matches!(Fleet::from_controllers(Vec::new()), Err(FleetError::EmptyRegistry)));

    let (display_tx, _display_rx) = unbounded::<DisplayUpdate>();
    let result = Fleet::start(&config(4, 0), Arc::new(display_tx));
    assert!(matches!(result, Err(FleetError::Config(_))));
}

#[test]
fn start_floors_place_the_cars() {
    let mut config = config(8, 2);
    config.elevator.start_floors = vec![6];
    let (display_tx, _display_rx) = unbounded::<DisplayUpdate>();
    let fleet = Fleet::start(&config, Arc::new(display_tx)).unwrap();

    let floors: Vec<u8> = fleet.registry().iter().map(|c| c.car().floor()).collect();
    assert_eq!(floors, vec![6, 0]);
    assert_eq!(fleet.floors().len(), 8);
    assert_eq!(fleet.num_floors(), 8);

    // Car 0 is idle and closest to floor 5.
    assert_eq!(fleet.floor(5).unwrap().press_button(Direction::Down), Ok(CarId(0)));
    fleet.shutdown().unwrap();
}

struct BrokenDisplay;

impl car::DisplaySink for BrokenDisplay {
    fn show(&self, update: DisplayUpdate) {
        panic!("display for {} broke", update.car);
    }
}

#[test]
fn panicking_car_does_not_take_the_fleet_down() {
    let (display_tx, display_rx) = unbounded::<DisplayUpdate>();
    let broken = Arc::new(Controller::new(
        Arc::new(Car::new(CarId(0))),
        8,
        &ControllerConfig::default(),
        Arc::new(BrokenDisplay),
    ));
    let healthy = Arc::new(Controller::new(
        Arc::new(Car::new(CarId(1))),
        8,
        &ControllerConfig::default(),
        Arc::new(display_tx),
    ));
    let fleet = Fleet::from_controllers(vec![Arc::clone(&broken), Arc::clone(&healthy)]).unwrap();

    broken.submit_external_request(3, Direction::Up).unwrap();
    healthy.submit_external_request(5, Direction::Up).unwrap();

    let arrival = loop {
        let update = display_rx.recv_timeout(TIMEOUT).expect("healthy car never arrived");
        if update.is_arrival() {
            break update
        }
    };
    assert_eq!((arrival.car, arrival.floor), (CarId(1), 5));

    let result = fleet.shutdown();
    assert!(matches!(result, Err(FleetError::WorkerPanicked(CarId(0)))), "got {:?}", result);
    assert_eq!(healthy.car().state(), CarState { floor: 5, direction: Direction::Idle });
}
