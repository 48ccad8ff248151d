/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::debug;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::DispatchConfig;
use crate::registry::CallRegistry;
use crate::shared::{ElevatorState, Stats};

/**
 * Cost/efficiency heuristic for calls lying ahead of the car.
 *
 * A stop costs the floors travelled plus a fixed `stop_cost` for the dwell
 * time. Efficiency is the estimated demand divided by that cost, with a
 * `long_wait_bonus` multiplier for calls pending more than
 * `long_wait_cycles`.
 *
 * # Fields
 * - `stop_cost`:           Fixed cost added to every stop.
 * - `long_wait_cycles`:    Wait above which a call earns the bonus.
 * - `long_wait_bonus`:     Efficiency multiplier for long-waiting calls.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct SmartStop {
    stop_cost: f32,
    long_wait_cycles: u32,
    long_wait_bonus: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Stop(u8),
    // Best candidate missed the threshold; the call stays pending
    Bypass(u8),
    NoCandidate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub floor: u8,
    pub efficiency: f32,
}

impl Default for SmartStop {
    fn default() -> Self {
        SmartStop::from_config(&DispatchConfig::default())
    }
}

impl SmartStop {
    pub fn from_config(config: &DispatchConfig) -> SmartStop {
        SmartStop {
            stop_cost: config.stop_cost,
            long_wait_cycles: config.long_wait_cycles,
            long_wait_bonus: config.long_wait_bonus,
        }
    }

    pub fn efficiency(&self, distance: u8, estimated_passengers: u8, wait_cycles: u32) -> f32 {
        let cost = distance as f32 + self.stop_cost;
        let efficiency = estimated_passengers as f32 / cost;
        if wait_cycles > self.long_wait_cycles {
            efficiency * self.long_wait_bonus
        } else {
            efficiency
        }
    }

    /// Best call strictly ahead of the car in its direction of travel.
    ///
    /// Floors are scanned ascending and the first maximum wins.
    pub fn best_candidate(&self, calls: &CallRegistry, elevator: &ElevatorState) -> Option<Candidate> {
        let mut best: Option<Candidate> = None;

        for (floor, call) in calls.demand_floors() {
            let delta = elevator.delta_to(floor);
            if delta == 0 || !elevator.direction.admits(delta) {
                continue;
            }

            let efficiency = self.efficiency(
                elevator.distance_to(floor),
                call.estimated_passengers,
                call.wait_cycles,
            );
            if best.map_or(true, |b| efficiency > b.efficiency) {
                best = Some(Candidate { floor, efficiency });
            }
        }

        best
    }

    /**
     * Picks the floor worth stopping at, if any.
     *
     * When the best candidate falls below `efficiency_threshold` the call is
     * counted as skipped (it stays pending) and returned as `Bypass`.
     */
    pub fn decide(
        &self,
        calls: &CallRegistry,
        elevator: &ElevatorState,
        stats: &mut Stats,
        efficiency_threshold: f32,
    ) -> Verdict {
        let candidate = match self.best_candidate(calls, elevator) {
            Some(candidate) => candidate,
            None => return Verdict::NoCandidate,
        };

        if candidate.efficiency < efficiency_threshold {
            debug!(
                "SmartStop passes floor {} (efficiency {:.2} < {:.2})",
                candidate.floor, candidate.efficiency, efficiency_threshold
            );
            stats.stops_skipped += 1;
            return Verdict::Bypass(candidate.floor);
        }

        Verdict::Stop(candidate.floor)
    }
}
