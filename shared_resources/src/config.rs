/// ----- CONFIGURATION -----
/// Fleet settings are read from `config.json`, falling back to `_config.json`
/// and then to built-in defaults. `--cars N` and `--floors N` on the command
/// line override whatever the file says.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use log::{info, warn};

use crate::error::ConfigError;

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub num_floors: u8,
    pub num_cars: u8,
    /// Floor each car starts on, by car index. Missing entries start at 0.
    pub start_floors: Vec<u8>,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            num_floors: 4,
            num_cars: 2,
            start_floors: Vec::new(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ControllerConfig {
    /// Drop a submission when the same floor is already queued in the same
    /// container. Off by default, so a duplicate is served twice in a row.
    pub dedupe_requests: bool,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render the crossterm status board instead of logging every step.
    pub terminal: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { terminal: true }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub elevator: ElevatorConfig,
    pub controller: ControllerConfig,
    pub display: DisplayConfig,
}

impl FleetConfig {
    /// Reads the configuration file and command line of this process.
    pub fn get() -> Result<Self, ConfigError> {
        let mut config = match read_config_file(Path::new(CONFIG_FILE_PATH)) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("No configuration file provided, using default settings...");
                match read_config_file(Path::new(FALLBACK_CONFIG_FILE_PATH)) {
                    Ok(config) => config,
                    Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => FleetConfig::default(),
                    Err(e) => return Err(e),
                }
            },
            Err(e) => return Err(e),
        };
        let args: Vec<String> = env::args().skip(1).collect();
        config.apply_args(&args);
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: FleetConfig = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies `--cars N` / `--floors N` pairs. Anything unparseable is
    /// skipped with a warning.
    pub fn apply_args(&mut self, args: &[String]) {
        for arg_pair in args.chunks_exact(2) {
            match arg_pair[0].as_str() {
                "--cars" => match arg_pair[1].parse::<u8>() {
                    Ok(num) => self.elevator.num_cars = num,
                    Err(_) => warn!("cars {} is not a number, skipping...", arg_pair[1]),
                },
                "--floors" => match arg_pair[1].parse::<u8>() {
                    Ok(num) => self.elevator.num_floors = num,
                    Err(_) => warn!("floors {} is not a number, skipping...", arg_pair[1]),
                },
                _ => warn!("illegal argument {}, skipping...", arg_pair[0]),
            }
        }
        if args.len() % 2 == 1 {
            warn!("argument {} has no value, skipping...", args[args.len() - 1]);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let elevator = &self.elevator;
        if elevator.num_floors == 0 {
            return Err(ConfigError::Invalid(String::from("num_floors must be at least 1")));
        }
        if elevator.num_cars == 0 {
            return Err(ConfigError::Invalid(String::from("num_cars must be at least 1")));
        }
        if elevator.start_floors.len() > elevator.num_cars as usize {
            return Err(ConfigError::Invalid(format!(
                "{} start floors given for {} cars",
                elevator.start_floors.len(),
                elevator.num_cars
            )));
        }
        if let Some(floor) = elevator.start_floors.iter().find(|&&f| f >= elevator.num_floors) {
            return Err(ConfigError::Invalid(format!(
                "start floor {} is outside 0..{}",
                floor, elevator.num_floors
            )));
        }
        Ok(())
    }

    pub fn start_floor(&self, car_index: u8) -> u8 {
        self.elevator.start_floors.get(car_index as usize).copied().unwrap_or(0)
    }
}

fn read_config_file(path: &Path) -> Result<FleetConfig, ConfigError> {
    let config_contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&config_contents)?)
}
