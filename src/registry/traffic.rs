/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::trace;
use rand::Rng;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::registry::CallRegistry;
use crate::shared::{ElevatorState, TrafficMode};

/// Draws a demand estimate for a new hall call.
pub fn estimate_passengers<R: Rng + ?Sized>(rng: &mut R, mode: TrafficMode) -> u8 {
    rng.gen_range(0..mode.demand_bound())
}

/**
 * Ages pending calls and creates new ones.
 *
 * Every floor except the car's own is visited once. A pending call gets one
 * more wait cycle; an idle floor gets a new call with probability
 * `new_call_percent`. Demand of a new call may be zero, the degenerate-call
 * cleanup removes those before dispatch.
 *
 * Returns the floors where a call was created.
 */
pub fn age_and_generate<R: Rng + ?Sized>(
    registry: &mut CallRegistry,
    elevator: &ElevatorState,
    mode: TrafficMode,
    new_call_percent: u8,
    rng: &mut R,
) -> Vec<u8> {
    let mut created = Vec::new();

    for floor in 0..registry.floor_count() {
        if floor == elevator.current_floor {
            continue;
        }

        if registry.is_active(floor) {
            registry.age(floor);
            continue;
        }

        if rng.gen_range(0..100u8) < new_call_percent {
            let estimate = estimate_passengers(rng, mode);
            if let Ok(true) = registry.activate(floor, estimate) {
                trace!("New hall call at floor {} ({} waiting)", floor, estimate);
                created.push(floor);
            }
        }
    }

    created
}
