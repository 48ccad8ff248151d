/*
 * Unit tests for the dispatch priority engine
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_proximity_prefers_direction_of_travel
 * - test_emergency_direct_with_light_car
 * - test_emergency_beats_manual
 * - test_emergency_deferred_falls_through
 * - test_emergency_direct_with_short_path
 * - test_emergency_needs_threshold
 * - test_manual_beats_proximity_and_smartstop
 * - test_manual_tie_takes_lower_floor
 * - test_internal_in_direction_first
 * - test_forced_disembark_after_saturation
 * - test_forced_disembark_out_of_bounds
 * - test_smartstop_rule
 * - test_smartstop_not_consulted_when_busy
 * - test_crowded_direction
 * - test_empty_car_tie_takes_lower_floor
 * - test_no_stop_warranted
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod dispatch_tests {
    use crate::dispatch::{Decision, DispatchRule, Dispatcher};
    use crate::shared::{CallOrigin, Direction, HallCall};
    use crate::simulation::SimulationState;

    fn setup_state(current_floor: u8, direction: Direction, occupancy: u8) -> SimulationState {
        let mut state = SimulationState::new(10, 8);
        state.elevator.current_floor = current_floor;
        state.elevator.direction = direction;
        state.elevator.occupancy = occupancy;
        state
    }

    fn add_call(state: &mut SimulationState, floor: u8, estimated_passengers: u8, wait_cycles: u32) {
        state
            .calls
            .insert(floor, HallCall { active: true, estimated_passengers, wait_cycles })
            .unwrap();
    }

    fn stop(floor: u8, rule: DispatchRule) -> Option<Decision> {
        Some(Decision { floor, rule })
    }

    #[test]
    fn test_proximity_prefers_direction_of_travel() {
        // Arrange
        let mut state = setup_state(5, Direction::Up, 0);
        add_call(&mut state, 2, 2, 0);
        add_call(&mut state, 7, 2, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(7, DispatchRule::Proximity));
        assert_eq!(outcome.deferred_emergency, None);
    }

    #[test]
    fn test_emergency_direct_with_light_car() {
        // Purpose: two calls on the way do not hold back a car with fewer than 2 riders

        // Arrange
        let mut state = setup_state(2, Direction::Up, 1);
        add_call(&mut state, 4, 2, 0);
        add_call(&mut state, 6, 2, 0);
        add_call(&mut state, 9, 1, 15);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(9, DispatchRule::Emergency));
        assert_eq!(state.stats.emergency_dispatches, 1);
    }

    #[test]
    fn test_emergency_beats_manual() {
        // Arrange
        let mut state = setup_state(4, Direction::Down, 0);
        add_call(&mut state, 3, 2, 0);
        state.overrides.flag(CallOrigin::External, 3);
        add_call(&mut state, 8, 3, 20);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(8, DispatchRule::Emergency));
    }

    #[test]
    fn test_emergency_deferred_falls_through() {
        // Purpose: a loaded car with two calls on the way serves the way first

        // Arrange
        let mut state = setup_state(2, Direction::Up, 3);
        add_call(&mut state, 4, 2, 0);
        add_call(&mut state, 6, 2, 0);
        add_call(&mut state, 9, 1, 20);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.deferred_emergency, Some(9));
        assert_eq!(outcome.decision, stop(4, DispatchRule::Proximity));
        assert_eq!(state.stats.emergency_dispatches, 0);
        assert_eq!(state.calls.get(9).unwrap().wait_cycles, 20);
    }

    #[test]
    fn test_emergency_direct_with_short_path() {
        // Arrange
        let mut state = setup_state(0, Direction::Up, 8);
        add_call(&mut state, 3, 2, 0);
        add_call(&mut state, 7, 4, 16);
        add_call(&mut state, 8, 1, 2);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(7, DispatchRule::Emergency));
    }

    #[test]
    fn test_emergency_needs_threshold() {
        // Arrange
        let mut state = setup_state(2, Direction::Up, 0);
        add_call(&mut state, 9, 1, 14);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.deferred_emergency, None);
        assert_eq!(outcome.decision, stop(9, DispatchRule::EmptyCar));
    }

    #[test]
    fn test_manual_beats_proximity_and_smartstop() {
        // Arrange
        let mut state = setup_state(5, Direction::Up, 0);
        add_call(&mut state, 6, 5, 0);
        state.destinations.insert(0);
        state.overrides.flag(CallOrigin::Internal, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(0, DispatchRule::Manual));
    }

    #[test]
    fn test_manual_tie_takes_lower_floor() {
        // Arrange
        let mut state = setup_state(5, Direction::Up, 0);
        state.overrides.flag(CallOrigin::External, 7);
        state.overrides.flag(CallOrigin::Internal, 3);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(3, DispatchRule::Manual));
    }

    #[test]
    fn test_internal_in_direction_first() {
        // Arrange
        let mut ahead = setup_state(5, Direction::Up, 4);
        ahead.destinations.insert(4);
        ahead.destinations.insert(8);

        let mut behind = setup_state(5, Direction::Up, 4);
        behind.destinations.insert(1);
        behind.destinations.insert(3);

        let mut here = setup_state(5, Direction::Down, 4);
        here.destinations.insert(5);
        here.destinations.insert(4);

        let dispatcher = Dispatcher::default();

        // Act
        let ahead_outcome = dispatcher.choose_next_floor(&mut ahead);
        let behind_outcome = dispatcher.choose_next_floor(&mut behind);
        let here_outcome = dispatcher.choose_next_floor(&mut here);

        // Assert
        assert_eq!(ahead_outcome.decision, stop(8, DispatchRule::Internal));
        assert_eq!(behind_outcome.decision, stop(3, DispatchRule::Internal));
        assert_eq!(here_outcome.decision, stop(5, DispatchRule::Internal));
    }

    #[test]
    fn test_forced_disembark_after_saturation() {
        // Arrange
        let mut state = setup_state(5, Direction::Up, 8);
        state.saturated_cycles = 8;
        let mut short = setup_state(5, Direction::Up, 8);
        short.saturated_cycles = 7;
        let dispatcher = Dispatcher::default();

        // Act
        let outcome = dispatcher.choose_next_floor(&mut state);
        let short_outcome = dispatcher.choose_next_floor(&mut short);

        // Assert
        assert_eq!(outcome.decision, stop(6, DispatchRule::ForcedDisembark));
        assert_eq!(state.saturated_cycles, 0);
        assert_eq!(short_outcome.decision, None);
        assert_eq!(short.saturated_cycles, 7);
    }

    #[test]
    fn test_forced_disembark_out_of_bounds() {
        // Purpose: no floor beyond the top, the counter stays and lower rules apply

        // Arrange
        let mut state = setup_state(9, Direction::Up, 8);
        state.saturated_cycles = 10;

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, None);
        assert_eq!(state.saturated_cycles, 10);
    }

    #[test]
    fn test_smartstop_rule() {
        // Arrange
        let mut state = setup_state(0, Direction::Up, 1);
        add_call(&mut state, 4, 5, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(4, DispatchRule::SmartStop));
    }

    #[test]
    fn test_smartstop_not_consulted_when_busy() {
        // Arrange
        let mut state = setup_state(0, Direction::Up, 6);
        add_call(&mut state, 4, 5, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, None);
        assert_eq!(state.stats.stops_skipped, 0);
    }

    #[test]
    fn test_crowded_direction() {
        // Arrange
        let mut state = setup_state(2, Direction::Up, 7);
        add_call(&mut state, 0, 3, 0);
        add_call(&mut state, 9, 1, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(9, DispatchRule::Crowded));
    }

    #[test]
    fn test_empty_car_tie_takes_lower_floor() {
        // Purpose: SmartStop rejects floor 9 and counts it, then the empty car takes the closest call

        // Arrange
        let mut state = setup_state(5, Direction::Up, 0);
        add_call(&mut state, 1, 1, 0);
        add_call(&mut state, 9, 1, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, stop(1, DispatchRule::EmptyCar));
        assert_eq!(state.stats.stops_skipped, 1);
        assert_eq!(outcome.bypassed, Some(9));
    }

    #[test]
    fn test_no_stop_warranted() {
        // Arrange
        let mut state = setup_state(5, Direction::Up, 3);
        add_call(&mut state, 1, 4, 0);

        // Act
        let outcome = Dispatcher::default().choose_next_floor(&mut state);

        // Assert
        assert_eq!(outcome.decision, None);
        assert_eq!(outcome.deferred_emergency, None);
        assert_eq!(outcome.bypassed, None);
    }
}
