/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{info, warn};
use serde::{Deserialize, Serialize};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DispatchConfig;
use crate::dispatch::{SmartStop, Verdict};
use crate::registry::{CallRegistry, InternalDestinations, ManualOverrides};
use crate::shared::ElevatorState;
use crate::simulation::SimulationState;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DispatchRule {
    Emergency,
    Manual,
    Internal,
    ForcedDisembark,
    Proximity,
    SmartStop,
    Crowded,
    EmptyCar,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub floor: u8,
    pub rule: DispatchRule,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmergencyCheck {
    None,
    Direct(u8),
    Deferred { floor: u8, calls_in_path: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchOutcome {
    pub decision: Option<Decision>,
    pub deferred_emergency: Option<u8>,
    // Floor SmartStop judged not worth a stop this cycle
    pub bypassed: Option<u8>,
}

/**
 * Layered floor selection for a single car.
 *
 * Rules are tried in order, the first one yielding a floor wins:
 * emergency, manual override, onboard destination, forced disembark,
 * proximity, SmartStop, crowded direction, empty car. The emergency rule
 * may defer instead of deciding; the ladder then continues below it.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatcher {
    config: DispatchConfig,
    smartstop: SmartStop,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher::new(&DispatchConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: &DispatchConfig) -> Dispatcher {
        Dispatcher {
            config: config.clone(),
            smartstop: SmartStop::from_config(config),
        }
    }

    pub fn choose_next_floor(&self, state: &mut SimulationState) -> DispatchOutcome {
        let mut outcome = DispatchOutcome::default();
        let elevator = &state.elevator;

        match check_emergency(&state.calls, elevator, self.config.emergency_wait_threshold) {
            EmergencyCheck::Direct(floor) => {
                info!(
                    "[EMERGENCY] Floor {} waited {} cycles, serving it first",
                    floor,
                    state.calls.get(floor).map_or(0, |call| call.wait_cycles)
                );
                state.stats.emergency_dispatches += 1;
                outcome.decision = Some(Decision { floor, rule: DispatchRule::Emergency });
                return outcome;
            }
            EmergencyCheck::Deferred { floor, calls_in_path } => {
                warn!(
                    "[EMERGENCY DEFERRED] Floor {} is overdue but {} calls lie on the way",
                    floor, calls_in_path
                );
                outcome.deferred_emergency = Some(floor);
            }
            EmergencyCheck::None => (),
        }

        outcome.decision = self.choose_below_emergency(state, &mut outcome.bypassed);
        outcome
    }

    fn choose_below_emergency(&self, state: &mut SimulationState, bypassed: &mut Option<u8>) -> Option<Decision> {
        let elevator = &state.elevator;
        let decide = |floor, rule| Some(Decision { floor, rule });

        if let Some(floor) = manual_rule(&state.overrides, elevator) {
            info!("[MANUAL] Serving manual call at floor {}", floor);
            return decide(floor, DispatchRule::Manual);
        }

        if let Some(floor) = internal_rule(&state.destinations, elevator) {
            info!("[INTERNAL] Serving onboard destination {}", floor);
            return decide(floor, DispatchRule::Internal);
        }

        if let Some(floor) = forced_disembark_rule(
            elevator,
            state.saturated_cycles,
            self.config.saturation_cycle_threshold,
        ) {
            info!(
                "[FORCED DISEMBARK] Car full for {} cycles, stopping at floor {}",
                state.saturated_cycles, floor
            );
            state.saturated_cycles = 0;
            return decide(floor, DispatchRule::ForcedDisembark);
        }

        if let Some(floor) = proximity_rule(&state.calls, elevator, self.config.proximity_window) {
            info!("[PROXIMITY] Call close ahead at floor {}", floor);
            return decide(floor, DispatchRule::Proximity);
        }

        if (elevator.occupancy as i16) < elevator.capacity as i16 - 2 {
            match self.smartstop.decide(
                &state.calls,
                elevator,
                &mut state.stats,
                self.config.efficiency_threshold,
            ) {
                Verdict::Stop(floor) => {
                    info!("[SMARTSTOP] Efficient stop at floor {}", floor);
                    return decide(floor, DispatchRule::SmartStop);
                }
                Verdict::Bypass(floor) => *bypassed = Some(floor),
                Verdict::NoCandidate => (),
            }
        }

        if let Some(floor) = crowded_rule(&state.calls, elevator) {
            info!("[CROWDED] Heading for floor {} in the direction of travel", floor);
            return decide(floor, DispatchRule::Crowded);
        }

        if let Some(floor) = empty_car_rule(&state.calls, elevator) {
            info!("[EMPTY CAR] Collecting closest call at floor {}", floor);
            return decide(floor, DispatchRule::EmptyCar);
        }

        None
    }
}

/***************************************/
/*               Rules                 */
/***************************************/

// Demand-positive call with the longest wait; lowest floor on ties
pub fn find_emergency_call(calls: &CallRegistry, threshold: u32) -> Option<u8> {
    let mut worst: Option<(u8, u32)> = None;
    for (floor, call) in calls.demand_floors() {
        if call.wait_cycles > worst.map_or(0, |(_, wait)| wait) {
            worst = Some((floor, call.wait_cycles));
        }
    }

    match worst {
        Some((floor, wait)) if wait >= threshold => Some(floor),
        _ => None,
    }
}

pub fn check_emergency(calls: &CallRegistry, elevator: &ElevatorState, threshold: u32) -> EmergencyCheck {
    let floor = match find_emergency_call(calls, threshold) {
        Some(floor) => floor,
        None => return EmergencyCheck::None,
    };

    let calls_in_path = calls.demand_between(elevator.current_floor, floor);
    if calls_in_path < 2 || elevator.occupancy < 2 {
        EmergencyCheck::Direct(floor)
    } else {
        EmergencyCheck::Deferred { floor, calls_in_path }
    }
}

// Closest floor to the car; the first (lowest) floor wins ties
fn closest(floors: impl Iterator<Item = u8>, elevator: &ElevatorState) -> Option<u8> {
    floors.min_by_key(|&floor| elevator.distance_to(floor))
}

pub fn manual_rule(overrides: &ManualOverrides, elevator: &ElevatorState) -> Option<u8> {
    closest(overrides.flagged_floors(), elevator)
}

pub fn internal_rule(destinations: &InternalDestinations, elevator: &ElevatorState) -> Option<u8> {
    let ahead = destinations
        .floors()
        .filter(|&floor| elevator.direction.admits(elevator.delta_to(floor)));

    closest(ahead, elevator).or_else(|| closest(destinations.floors(), elevator))
}

pub fn forced_disembark_rule(elevator: &ElevatorState, saturated_cycles: u32, threshold: u32) -> Option<u8> {
    if elevator.occupancy != elevator.capacity || saturated_cycles < threshold {
        return None;
    }
    elevator.floor_ahead(1)
}

pub fn proximity_rule(calls: &CallRegistry, elevator: &ElevatorState, window: u8) -> Option<u8> {
    (0..=window)
        .filter_map(|offset| elevator.floor_ahead(offset))
        .find(|&floor| calls.has_demand(floor))
}

pub fn crowded_rule(calls: &CallRegistry, elevator: &ElevatorState) -> Option<u8> {
    if (elevator.occupancy as i16) < elevator.capacity as i16 - 1 {
        return None;
    }

    (1..elevator.floor_count)
        .map_while(|offset| elevator.floor_ahead(offset))
        .find(|&floor| calls.has_demand(floor))
}

pub fn empty_car_rule(calls: &CallRegistry, elevator: &ElevatorState) -> Option<u8> {
    if elevator.occupancy != 0 {
        return None;
    }
    closest(calls.demand_floors().map(|(floor, _)| floor), elevator)
}

