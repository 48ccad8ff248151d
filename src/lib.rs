//! Single-car elevator dispatch engine.
//!
//! The engine decides, one discrete cycle at a time, where the car should
//! stop using a layered priority ladder (emergency, manual override, onboard
//! destinations, saturation, proximity, the SmartStop efficiency heuristic
//! and fallbacks), then moves the car and applies boarding and disembarking.
//! Input devices, lights and console output live outside the engine and talk
//! to it through [`Simulation`].

pub mod config;
pub mod dispatch;
pub mod elevator;
pub mod input;
pub mod registry;
pub mod report;
pub mod shared;
pub mod simulation;
mod input_tests;
mod report_tests;

pub use config::Config;
pub use shared::{CallOrigin, DispatchError, Direction, ElevatorState, HallCall, Stats, TrafficMode};
pub use simulation::{Action, DecisionReport, Simulation};
