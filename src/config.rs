/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use std::fs;
use std::path::Path;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{ConfigError, Direction, TrafficMode};

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub elevator: ElevatorConfig,
    pub dispatch: DispatchConfig,
    pub traffic: TrafficConfig,
    pub pacing: PacingConfig,
    pub simulation: SimulationConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub floor_count: u8,
    pub capacity: u8,
    // Defaults to the top floor
    pub start_floor: Option<u8>,
    pub start_direction: Direction,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DispatchConfig {
    pub emergency_wait_threshold: u32,
    pub saturation_cycle_threshold: u32,
    pub efficiency_threshold: f32,
    pub stop_cost: f32,
    pub long_wait_cycles: u32,
    pub long_wait_bonus: f32,
    pub proximity_window: u8,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TrafficConfig {
    pub mode: TrafficMode,
    pub new_call_percent: u8,
    pub cruise_disembark_percent: u8,
    pub min_disembark: u8,
    pub max_disembark: u8,
}

// Presentation only, the engine never reads these
#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PacingConfig {
    pub travel_time_ms: u64,
    pub door_time_ms: u64,
    pub cycle_pause_ms: u64,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: Option<u64>,
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            floor_count: 10,
            capacity: 8,
            start_floor: None,
            start_direction: Direction::Down,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        DispatchConfig {
            emergency_wait_threshold: 15,
            saturation_cycle_threshold: 8,
            efficiency_threshold: 0.65,
            stop_cost: 2.0,
            long_wait_cycles: 5,
            long_wait_bonus: 1.2,
            proximity_window: 2,
        }
    }
}

impl Default for TrafficConfig {
    fn default() -> Self {
        TrafficConfig {
            mode: TrafficMode::Medium,
            new_call_percent: 10,
            cruise_disembark_percent: 15,
            min_disembark: 1,
            max_disembark: 4,
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        PacingConfig {
            travel_time_ms: 400,
            door_time_ms: 800,
            cycle_pause_ms: 800,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let elevator = &self.elevator;
        if elevator.floor_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "floor_count must be at least 2, got {}",
                elevator.floor_count
            )));
        }
        if elevator.capacity == 0 {
            return Err(ConfigError::Invalid("capacity must be positive".into()));
        }
        if let Some(floor) = elevator.start_floor {
            if floor >= elevator.floor_count {
                return Err(ConfigError::Invalid(format!(
                    "start_floor {} is outside 0..{}",
                    floor, elevator.floor_count
                )));
            }
        }

        let traffic = &self.traffic;
        if traffic.min_disembark == 0 || traffic.min_disembark > traffic.max_disembark {
            return Err(ConfigError::Invalid(format!(
                "disembark range {}..={} is empty or starts at zero",
                traffic.min_disembark, traffic.max_disembark
            )));
        }
        if traffic.new_call_percent > 100 || traffic.cruise_disembark_percent > 100 {
            return Err(ConfigError::Invalid("percentages must be within 0..=100".into()));
        }

        if !(self.dispatch.stop_cost > 0.0) {
            return Err(ConfigError::Invalid("stop_cost must be positive".into()));
        }

        Ok(())
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn parse_config(config_str: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(config_str)?;
    config.validate()?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path)?;
    parse_config(&config_str)
}
