/*
 * Unit tests for the report module
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_cycle_record_from_stop
 * - test_cycle_record_deferred_emergency
 * - test_run_summary_aggregates
 * - test_json_lines_output
 * - test_render_calls_marks_overdue
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod report_tests {
    use crate::dispatch::DispatchRule;
    use crate::report::{self, CycleRecord, JsonLinesWriter, RunSummary};
    use crate::shared::{Direction, ElevatorState, HallCall, Stats};
    use crate::simulation::{Action, DecisionReport};

    fn setup_report(action: Action) -> DecisionReport {
        let mut elevator = ElevatorState::new(10, 8);
        elevator.current_floor = 4;
        elevator.occupancy = 5;

        DecisionReport {
            cycle: 12,
            action,
            deferred_emergency: None,
            new_calls: vec![1],
            skipped_floors: vec![6, 5],
            floors_travelled: 5,
            boarded: 3,
            disembarked: 1,
            refused_full: false,
            elevator,
            stats: Stats::new(),
        }
    }

    #[test]
    fn test_cycle_record_from_stop() {
        // Arrange
        let decision = setup_report(Action::Stop { floor: 4, rule: DispatchRule::Emergency });

        // Act
        let record = CycleRecord::from(&decision);

        // Assert
        assert_eq!(record.cycle, 12);
        assert_eq!(record.floor, 4);
        assert_eq!(record.direction, Direction::Down);
        assert_eq!(record.occupancy, 5);
        assert_eq!(record.decision_floor, Some(4));
        assert_eq!(record.rule, Some(DispatchRule::Emergency));
        assert!(record.emergency);
        assert_eq!(record.skipped_calls, 2);
    }

    #[test]
    fn test_cycle_record_deferred_emergency() {
        // Arrange
        let mut decision = setup_report(Action::Cruise);
        let plain = CycleRecord::from(&decision);
        decision.deferred_emergency = Some(9);

        // Act
        let record = CycleRecord::from(&decision);

        // Assert
        assert!(!plain.emergency);
        assert!(record.emergency);
        assert_eq!(record.decision_floor, None);
        assert_eq!(record.rule, None);
    }

    #[test]
    fn test_run_summary_aggregates() {
        // Arrange
        let mut summary = RunSummary::new();
        assert_eq!(summary.mean_occupancy(), None);
        let stop = CycleRecord::from(&setup_report(Action::Stop { floor: 4, rule: DispatchRule::Proximity }));
        let mut cruise = CycleRecord::from(&setup_report(Action::Cruise));
        cruise.occupancy = 2;
        cruise.boarded = 0;

        // Act
        summary.record(&stop);
        summary.record(&cruise);

        // Assert
        assert_eq!(summary.cycles, 2);
        assert_eq!(summary.stops, 1);
        assert_eq!(summary.emergency_cycles, 0);
        assert_eq!(summary.boarded, 3);
        assert_eq!(summary.disembarked, 2);
        assert_eq!(summary.skipped_calls, 4);
        assert_eq!(summary.max_occupancy, 5);
        assert_eq!(summary.mean_occupancy(), Some(3.5));
        assert!(summary.to_string().contains("Stops:               1"));
    }

    #[test]
    fn test_json_lines_output() {
        // Arrange
        let records = [
            CycleRecord::from(&setup_report(Action::Stop { floor: 4, rule: DispatchRule::SmartStop })),
            CycleRecord::from(&setup_report(Action::Cruise)),
        ];
        let mut writer = JsonLinesWriter::new(Vec::new());

        // Act
        for record in &records {
            writer.write(record).unwrap();
        }
        let output = String::from_utf8(writer.into_inner()).unwrap();

        // Assert
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\"rule\":\"smartStop\""));
        for (line, record) in lines.iter().zip(records.iter()) {
            let parsed: CycleRecord = serde_json::from_str(line).unwrap();
            assert_eq!(&parsed, record);
        }
    }

    #[test]
    fn test_render_calls_marks_overdue() {
        // Arrange
        let calls = [
            HallCall::default(),
            HallCall { active: true, estimated_passengers: 2, wait_cycles: 15 },
            HallCall { active: true, estimated_passengers: 0, wait_cycles: 3 },
            HallCall { active: true, estimated_passengers: 1, wait_cycles: 4 },
        ];

        // Act
        let rendered = report::render_calls(&calls, 15);
        let empty = report::render_calls(&[HallCall::default(); 4], 15);

        // Assert
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Floor  1") && lines[1].ends_with(" !"));
        assert!(lines[2].contains("Floor  3") && !lines[2].ends_with(" !"));
        assert_eq!(empty, "(no active hall calls)\n");
    }
}
