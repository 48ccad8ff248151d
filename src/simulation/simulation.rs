/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info};
use rand::Rng;
use serde::Serialize;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, ElevatorConfig};
use crate::dispatch::{DispatchRule, Dispatcher};
use crate::elevator::{CarState, MovementFsm};
use crate::input::Button;
use crate::registry::{age_and_generate, estimate_passengers};
use crate::registry::{CallRegistry, InternalDestinations, ManualOverrides};
use crate::shared::{CallOrigin, ConfigError, DispatchError, ElevatorState, HallCall, Stats, TrafficMode};
use crate::simulation::SimRng;

/***************************************/
/*       Public data structures        */
/***************************************/

/**
 * Everything the engine mutates, owned in one place and handed to each step.
 *
 * # Fields
 * - `calls`:               Pending hall calls per floor.
 * - `overrides`:           Manual trigger flags per floor.
 * - `destinations`:        Onboard drop-off floors.
 * - `elevator`:            Car position, direction and occupancy.
 * - `stats`:               Running counters.
 * - `saturated_cycles`:    Consecutive cycles started with a full car.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    pub calls: CallRegistry,
    pub overrides: ManualOverrides,
    pub destinations: InternalDestinations,
    pub elevator: ElevatorState,
    pub stats: Stats,
    pub saturated_cycles: u32,
}

impl SimulationState {
    pub fn new(floor_count: u8, capacity: u8) -> SimulationState {
        SimulationState {
            calls: CallRegistry::new(floor_count),
            overrides: ManualOverrides::new(floor_count),
            destinations: InternalDestinations::new(floor_count),
            elevator: ElevatorState::new(floor_count, capacity),
            stats: Stats::new(),
            saturated_cycles: 0,
        }
    }

    pub fn from_config(config: &ElevatorConfig) -> SimulationState {
        let mut state = SimulationState::new(config.floor_count, config.capacity);
        if let Some(floor) = config.start_floor {
            state.elevator.current_floor = floor.min(state.elevator.top_floor());
        }
        state.elevator.direction = config.start_direction;
        state
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Action {
    Cruise,
    Stop { floor: u8, rule: DispatchRule },
}

/// Outcome of one cycle, for presentation collaborators.
///
/// `skipped_floors` lists the call SmartStop bypassed first, then the calls
/// passed while travelling, one entry per increment of `stats.stops_skipped`.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    pub cycle: u64,
    pub action: Action,
    pub deferred_emergency: Option<u8>,
    pub new_calls: Vec<u8>,
    pub skipped_floors: Vec<u8>,
    pub floors_travelled: u8,
    pub boarded: u8,
    pub disembarked: u8,
    pub refused_full: bool,
    pub elevator: ElevatorState,
    pub stats: Stats,
}

/**
 * Single-car dispatch simulation.
 *
 * Each `tick` runs one full cycle: traffic generation, degenerate-call
 * cleanup, the priority decision and the resulting movement. Manual calls
 * raised between ticks take effect in the next one.
 *
 * # Fields
 * - `config`:          Configuration the simulation was built from.
 * - `state`:           Mutable simulation context.
 * - `dispatcher`:      Priority ladder choosing the next target.
 * - `movement`:        State machine executing the choice.
 * - `rng`:             Random source for every draw.
 */
#[derive(Debug, Clone)]
pub struct Simulation {
    config: Config,
    state: SimulationState,
    dispatcher: Dispatcher,
    movement: MovementFsm,
    rng: SimRng,
}

impl Simulation {
    // Seeds from `simulation.seed`, or from entropy when it is unset
    pub fn new(config: Config) -> Result<Simulation, ConfigError> {
        let rng = match config.simulation.seed {
            Some(seed) => SimRng::from_seed_u64(seed),
            None => SimRng::from_entropy(),
        };
        Simulation::with_rng(config, rng)
    }

    pub fn with_rng(config: Config, rng: SimRng) -> Result<Simulation, ConfigError> {
        config.validate()?;

        Ok(Simulation {
            state: SimulationState::from_config(&config.elevator),
            dispatcher: Dispatcher::new(&config.dispatch),
            movement: MovementFsm::new(&config.traffic),
            config,
            rng,
        })
    }

    /**
     * Registers a manually triggered call.
     *
     * Internal calls add an onboard destination, external calls activate a
     * hall call with a drawn demand estimate unless one is already pending.
     * Either way the floor is flagged until the car stops there. An invalid
     * floor is rejected without touching the state.
     */
    pub fn raise_manual_call(&mut self, origin: CallOrigin, floor: u8) -> Result<(), DispatchError> {
        self.state.calls.check_floor(floor)?;

        match origin {
            CallOrigin::Internal => {
                self.state.destinations.insert(floor);
                info!("[MANUAL] Rider asked for floor {} (onboard call)", floor);
            }
            CallOrigin::External => {
                if !self.state.calls.is_active(floor) {
                    let estimate = estimate_passengers(&mut self.rng.0, self.config.traffic.mode);
                    self.state.calls.activate(floor, estimate)?;
                    info!("[MANUAL] Hall call at floor {} ({} waiting)", floor, estimate);
                }
            }
        }
        self.state.overrides.flag(origin, floor);

        Ok(())
    }

    /**
     * Handles a button press the way the demo panel does.
     *
     * Button A requests a random floor other than the current one. Button B
     * raises a hall call at a random floor and is ignored when that floor
     * already has a pending call. Returns the floor that was requested.
     */
    pub fn press_button(&mut self, button: Button) -> Option<u8> {
        let floor_count = self.state.elevator.floor_count;
        let mut floor = self.rng.0.gen_range(0..floor_count);

        match button {
            Button::A => {
                if floor == self.state.elevator.current_floor {
                    floor = (floor + 1) % floor_count;
                }
            }
            Button::B => {
                if self.state.calls.is_active(floor) {
                    debug!("Button B ignored, floor {} already has a call", floor);
                    return None;
                }
            }
        }

        self.raise_manual_call(button.origin(), floor).ok()?;
        Some(floor)
    }

    pub fn tick(&mut self, mode: TrafficMode) -> DecisionReport {
        self.state.stats.cycles += 1;

        let new_calls = age_and_generate(
            &mut self.state.calls,
            &self.state.elevator,
            mode,
            self.config.traffic.new_call_percent,
            &mut self.rng.0,
        );
        let removed = self.state.calls.cleanup_degenerate_calls();
        if !removed.is_empty() {
            debug!("Removed calls without riders at floors {:?}", removed);
        }

        if self.state.elevator.is_full() {
            self.state.saturated_cycles += 1;
        } else {
            self.state.saturated_cycles = 0;
        }

        let outcome = self.dispatcher.choose_next_floor(&mut self.state);
        let (action, car_state) = match outcome.decision {
            Some(decision) => (
                Action::Stop { floor: decision.floor, rule: decision.rule },
                CarState::Servicing(decision.floor),
            ),
            None => {
                debug!("Continuous movement, no stop worth making");
                (Action::Cruise, CarState::Cruising)
            }
        };

        let movement = self.movement.execute(car_state, &mut self.state, &mut self.rng.0);
        let skipped_floors: Vec<u8> = outcome.bypassed.into_iter().chain(movement.skipped_floors).collect();

        DecisionReport {
            cycle: self.state.stats.cycles,
            action,
            deferred_emergency: outcome.deferred_emergency,
            new_calls,
            skipped_floors,
            floors_travelled: movement.floors_travelled,
            boarded: movement.boarded,
            disembarked: movement.disembarked,
            refused_full: movement.refused_full,
            elevator: self.state.elevator.clone(),
            stats: self.state.stats,
        }
    }

    pub fn calls(&self) -> &[HallCall] {
        self.state.calls.calls()
    }

    pub fn elevator(&self) -> &ElevatorState {
        &self.state.elevator
    }

    pub fn stats(&self) -> &Stats {
        &self.state.stats
    }

    pub fn destinations(&self) -> &InternalDestinations {
        &self.state.destinations
    }

    pub fn overrides(&self) -> &ManualOverrides {
        &self.state.overrides
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    // For hosts that need to seed a scenario before running it
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }
}
