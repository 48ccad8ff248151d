/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io::Write;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::dispatch::DispatchRule;
use crate::shared::{Direction, ElevatorState, HallCall, Stats};
use crate::simulation::{Action, DecisionReport};

/***************************************/
/*       Public data structures        */
/***************************************/

/// Flat per-cycle row, one JSON object per line in the run log.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CycleRecord {
    pub cycle: u64,
    pub floor: u8,
    pub direction: Direction,
    pub occupancy: u8,
    pub capacity: u8,
    pub decision_floor: Option<u8>,
    pub rule: Option<DispatchRule>,
    pub boarded: u8,
    pub disembarked: u8,
    pub emergency: bool,
    pub skipped_calls: usize,
}

impl From<&DecisionReport> for CycleRecord {
    fn from(report: &DecisionReport) -> Self {
        let (decision_floor, rule) = match report.action {
            Action::Stop { floor, rule } => (Some(floor), Some(rule)),
            Action::Cruise => (None, None),
        };

        CycleRecord {
            cycle: report.cycle,
            floor: report.elevator.current_floor,
            direction: report.elevator.direction,
            occupancy: report.elevator.occupancy,
            capacity: report.elevator.capacity,
            decision_floor,
            rule,
            boarded: report.boarded,
            disembarked: report.disembarked,
            emergency: rule == Some(DispatchRule::Emergency) || report.deferred_emergency.is_some(),
            skipped_calls: report.skipped_floors.len(),
        }
    }
}

/**
 * Aggregate over a run.
 *
 * # Fields
 * - `cycles`:              Cycles recorded.
 * - `stops`:               Cycles that ended with a stop.
 * - `emergency_cycles`:    Cycles where an emergency was served or deferred.
 * - `boarded`:             Riders boarded.
 * - `disembarked`:         Riders that left.
 * - `skipped_calls`:       Calls bypassed by SmartStop or passed on the way.
 * - `occupancy_sum`:       Sum of post-cycle occupancy, for the mean.
 * - `max_occupancy`:       Highest post-cycle occupancy seen.
 */
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct RunSummary {
    pub cycles: u64,
    pub stops: u64,
    pub emergency_cycles: u64,
    pub boarded: u64,
    pub disembarked: u64,
    pub skipped_calls: u64,
    pub occupancy_sum: u64,
    pub max_occupancy: u8,
}

impl RunSummary {
    pub fn new() -> RunSummary {
        RunSummary::default()
    }

    pub fn record(&mut self, record: &CycleRecord) {
        self.cycles += 1;
        if record.decision_floor.is_some() {
            self.stops += 1;
        }
        if record.emergency {
            self.emergency_cycles += 1;
        }
        self.boarded += record.boarded as u64;
        self.disembarked += record.disembarked as u64;
        self.skipped_calls += record.skipped_calls as u64;
        self.occupancy_sum += record.occupancy as u64;
        self.max_occupancy = self.max_occupancy.max(record.occupancy);
    }

    pub fn mean_occupancy(&self) -> Option<f64> {
        if self.cycles == 0 {
            return None;
        }
        Some(self.occupancy_sum as f64 / self.cycles as f64)
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Run summary ===")?;
        writeln!(f, "Cycles:              {}", self.cycles)?;
        writeln!(f, "Stops:               {}", self.stops)?;
        writeln!(f, "Emergency cycles:    {}", self.emergency_cycles)?;
        writeln!(f, "Boarded:             {}", self.boarded)?;
        writeln!(f, "Disembarked:         {}", self.disembarked)?;
        writeln!(f, "Calls skipped:       {}", self.skipped_calls)?;
        if let Some(mean) = self.mean_occupancy() {
            writeln!(f, "Mean occupancy:      {:.2}", mean)?;
        }
        write!(f, "Max occupancy:       {}", self.max_occupancy)
    }
}

/// Writes cycle records as JSON lines.
pub struct JsonLinesWriter<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(out: W) -> JsonLinesWriter<W> {
        JsonLinesWriter { out }
    }

    pub fn write(&mut self, record: &CycleRecord) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.out, record)?;
        self.out.write_all(b"\n")
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/***************************************/
/*             Rendering               */
/***************************************/
pub fn render_header(cycle: u64, elevator: &ElevatorState) -> String {
    format!(
        "Cycle: {:3} | Floor: {:2} | Dir: {:<4} | Occupancy: {}/{}{}",
        cycle,
        elevator.current_floor,
        elevator.direction,
        elevator.occupancy,
        elevator.capacity,
        if elevator.is_full() { " FULL" } else { "" }
    )
}

// Calls with riders waiting, flagged when they reached the emergency threshold
pub fn render_calls(calls: &[HallCall], emergency_wait_threshold: u32) -> String {
    let mut out = String::new();

    for (floor, call) in calls.iter().enumerate().filter(|(_, call)| call.has_demand()) {
        if out.is_empty() {
            out.push_str("Active calls:\n");
        }
        let _ = writeln!(
            out,
            "  - Floor {:2}: {} waiting | {:2} cycles{}",
            floor,
            call.estimated_passengers,
            call.wait_cycles,
            if call.wait_cycles >= emergency_wait_threshold { " !" } else { "" }
        );
    }

    if out.is_empty() {
        out.push_str("(no active hall calls)\n");
    }
    out
}

pub fn render_decision(report: &DecisionReport) -> String {
    let mut out = String::new();

    match report.action {
        Action::Cruise => out.push_str("-> Continuous movement (no efficient stop)\n"),
        Action::Stop { floor, rule } => {
            let _ = writeln!(out, "-> DECISION: stop at floor {} ({:?})", floor, rule);
        }
    }
    if let Some(floor) = report.deferred_emergency {
        let _ = writeln!(out, "   emergency at floor {} deferred", floor);
    }
    for floor in &report.skipped_floors {
        let _ = writeln!(out, "   skipped call at floor {}", floor);
    }
    if report.disembarked > 0 {
        let _ = writeln!(out, "   {} rider(s) left", report.disembarked);
    }
    if report.boarded > 0 {
        let _ = writeln!(out, "   {} rider(s) boarded", report.boarded);
    }
    if report.refused_full {
        out.push_str("   car full, riders keep waiting\n");
    }
    out
}

pub fn render_stats(stats: &Stats) -> String {
    let mut out = String::from("--- Stats ---\n");
    let _ = writeln!(out, "Cycles:          {}", stats.cycles);
    let _ = writeln!(out, "Stops made:      {}", stats.stops_made);
    let _ = writeln!(out, "Stops skipped:   {}", stats.stops_skipped);
    let _ = writeln!(out, "Boarded:         {}", stats.boarded);
    let _ = writeln!(out, "Disembarked:     {}", stats.disembarked);
    let _ = writeln!(out, "Emergencies:     {}", stats.emergency_dispatches);
    if let Some(rate) = stats.skip_rate() {
        let _ = writeln!(out, "Skip rate:       {:.1} %", rate);
    }
    out
}
