/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, info, warn};
use rand::Rng;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::TrafficConfig;
use crate::registry::{CallRegistry, InternalDestinations};
use crate::shared::{Direction, ElevatorState, Stats};
use crate::simulation::SimulationState;

// Chance (percent) that riders leave at an ordinary floor
const BASE_EXIT_PERCENT: u8 = 35;
// Chance at the ground and top floor
const TERMINAL_EXIT_PERCENT: u8 = 70;
// Added when people are waiting at the floor
const WAITING_CALL_EXIT_BONUS: u8 = 25;
// Riders kept on board, no one leaves at or below this occupancy
const MIN_RIDERSHIP: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarState {
    Cruising,
    Servicing(u8),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MovementReport {
    pub floors_travelled: u8,
    pub skipped_floors: Vec<u8>,
    pub disembarked: u8,
    pub boarded: u8,
    // A call at the target was left waiting because the car was full
    pub refused_full: bool,
}

/**
 * Executes one dispatch decision on the car.
 *
 * `Cruising` moves the car one floor along its direction. `Servicing` drives
 * it floor by floor to the target, counting the demand it passes without
 * stopping, then lets riders off before boarding the waiting call.
 *
 * # Fields
 * - `cruise_disembark_percent`:    Chance of a disembark check while cruising.
 * - `min_disembark`:               Lower bound of riders leaving at once.
 * - `max_disembark`:               Upper bound of riders leaving at once.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementFsm {
    cruise_disembark_percent: u8,
    min_disembark: u8,
    max_disembark: u8,
}

impl Default for MovementFsm {
    fn default() -> Self {
        MovementFsm::new(&TrafficConfig::default())
    }
}

impl MovementFsm {
    pub fn new(config: &TrafficConfig) -> MovementFsm {
        MovementFsm {
            cruise_disembark_percent: config.cruise_disembark_percent,
            min_disembark: config.min_disembark,
            max_disembark: config.max_disembark,
        }
    }

    pub fn execute<R: Rng + ?Sized>(
        &self,
        car_state: CarState,
        state: &mut SimulationState,
        rng: &mut R,
    ) -> MovementReport {
        match car_state {
            CarState::Cruising => self.cruise(state, rng),
            CarState::Servicing(target) => self.service(target, state, rng),
        }
    }

    fn cruise<R: Rng + ?Sized>(&self, state: &mut SimulationState, rng: &mut R) -> MovementReport {
        let mut report = MovementReport::default();
        let floor = state.elevator.current_floor;

        if state.elevator.occupancy > 0 && rng.gen_range(0..100u8) < self.cruise_disembark_percent {
            report.disembarked = self.disembark(state, floor, false, rng);
        }

        let reversed = step_floor(&mut state.elevator);
        report.floors_travelled = 1;
        debug!(
            "Cruising {} -> {}{}",
            floor,
            state.elevator.current_floor,
            if reversed { " (reversing)" } else { "" }
        );

        report
    }

    fn service<R: Rng + ?Sized>(&self, target: u8, state: &mut SimulationState, rng: &mut R) -> MovementReport {
        let mut report = MovementReport::default();

        if let Some(direction) = Direction::towards(state.elevator.current_floor, target) {
            state.elevator.direction = direction;
        }

        // A valid target is reached in fewer steps than there are floors
        for _ in 0..state.elevator.floor_count {
            if state.elevator.current_floor == target {
                break;
            }
            step_floor(&mut state.elevator);
            report.floors_travelled += 1;

            let floor = state.elevator.current_floor;
            if floor != target && state.calls.has_demand(floor) {
                debug!("Passing floor {} without stopping", floor);
                state.stats.stops_skipped += 1;
                report.skipped_floors.push(floor);
            }
        }

        info!("Stopping at floor {}", target);
        let call_waiting = state.calls.is_active(target);
        if state.elevator.occupancy > 0 {
            report.disembarked = self.disembark(state, target, call_waiting, rng);
        }

        match state.calls.get(target).copied() {
            Some(call) if call.active && call.estimated_passengers == 0 => {
                state.calls.clear(target);
                debug!("Removed empty call at floor {}", target);
            }
            Some(call) if call.active && state.elevator.is_full() => {
                warn!(
                    "Car full, {} rider(s) at floor {} keep waiting",
                    call.estimated_passengers, target
                );
                report.refused_full = true;
            }
            Some(call) if call.active => {
                report.boarded = board(&mut state.calls, &mut state.elevator, &mut state.stats, target);
            }
            _ => (),
        }

        state.overrides.clear_floor(target);
        // Cleared even when the ridership reserve kept everyone on board,
        // otherwise the internal rule keeps picking this floor
        state.destinations.remove(target);

        report
    }

    fn disembark<R: Rng + ?Sized>(&self, state: &mut SimulationState, floor: u8, call_waiting: bool, rng: &mut R) -> u8 {
        let count = disembark(
            &mut state.elevator,
            &mut state.destinations,
            floor,
            call_waiting,
            (self.min_disembark, self.max_disembark),
            rng,
        );
        state.stats.disembarked += count as u64;
        count
    }
}

/// Moves the car one floor along its direction.
///
/// Landing on the ground floor turns it up, landing on the top floor turns
/// it down. Returns whether the direction was forced.
pub fn step_floor(elevator: &mut ElevatorState) -> bool {
    let next = elevator.current_floor as i16 + elevator.direction.step();
    let top = elevator.top_floor() as i16;
    let before = elevator.direction;

    if next <= 0 {
        elevator.current_floor = 0;
        elevator.direction = Direction::Up;
    } else if next >= top {
        elevator.current_floor = top as u8;
        elevator.direction = Direction::Down;
    } else {
        elevator.current_floor = next as u8;
    }

    elevator.direction != before
}

/**
 * Lets riders off at `floor`.
 *
 * Nothing happens at or below the minimum ridership. A pending onboard
 * destination for the floor makes the exit certain and is consumed;
 * otherwise the exit chance depends on the floor and on waiting riders.
 * The number leaving is drawn from `range` and capped at the occupancy.
 */
pub fn disembark<R: Rng + ?Sized>(
    elevator: &mut ElevatorState,
    destinations: &mut InternalDestinations,
    floor: u8,
    call_waiting: bool,
    range: (u8, u8),
    rng: &mut R,
) -> u8 {
    if elevator.occupancy <= MIN_RIDERSHIP {
        return 0;
    }

    let mut exit_percent = if elevator.is_terminal(floor) {
        TERMINAL_EXIT_PERCENT
    } else {
        BASE_EXIT_PERCENT
    };
    if call_waiting {
        exit_percent += WAITING_CALL_EXIT_BONUS;
    }

    let someone_exits = destinations.remove(floor) || rng.gen_range(0..100u8) < exit_percent;
    if !someone_exits {
        return 0;
    }

    let (min, max) = range;
    let count = rng.gen_range(min..=max).min(elevator.occupancy);
    elevator.occupancy -= count;
    info!("DISEMBARK: {} rider(s) left at floor {}", count, floor);
    count
}

/// Boards the call at `floor` up to the free capacity and clears it.
pub fn board(calls: &mut CallRegistry, elevator: &mut ElevatorState, stats: &mut Stats, floor: u8) -> u8 {
    let call = match calls.get(floor) {
        Some(call) if call.active => *call,
        _ => return 0,
    };

    let boarded = call.estimated_passengers.min(elevator.free_capacity());
    elevator.occupancy = elevator.occupancy.saturating_add(boarded).min(elevator.capacity);

    stats.boarded += boarded as u64;
    stats.stops_made += 1;
    calls.clear(floor);

    info!(
        "BOARD: {} rider(s) at floor {} ({}/{})",
        boarded, floor, elevator.occupancy, elevator.capacity
    );
    boarded
}
