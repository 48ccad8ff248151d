/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn step(&self) -> i16 {
        match *self {
            Direction::Up => 1,
            Direction::Down => -1,
        }
    }

    pub fn reversed(&self) -> Direction {
        match *self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    // Direction from `from` towards `to`, None when they are the same floor
    pub fn towards(from: u8, to: u8) -> Option<Direction> {
        if to > from {
            Some(Direction::Up)
        } else if to < from {
            Some(Direction::Down)
        } else {
            None
        }
    }

    // True when `delta` points along this direction (zero counts as along)
    pub fn admits(&self, delta: i16) -> bool {
        match *self {
            Direction::Up => delta >= 0,
            Direction::Down => delta <= 0,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrafficMode {
    Low,
    Medium,
    High,
}

impl TrafficMode {
    // Exclusive upper bound of the uniform demand estimate
    pub fn demand_bound(&self) -> u8 {
        match *self {
            TrafficMode::Low => 2,
            TrafficMode::Medium => 4,
            TrafficMode::High => 6,
        }
    }
}

impl std::str::FromStr for TrafficMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(TrafficMode::Low),
            "medium" => Ok(TrafficMode::Medium),
            "high" => Ok(TrafficMode::High),
            other => Err(format!("unknown traffic mode '{}'", other)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CallOrigin {
    Internal,
    External,
}

/**
 * A pending hall request at a single floor.
 *
 * The registry keeps one per floor and the floor number is the index.
 * An inactive call always has zero demand and zero wait.
 *
 * # Fields
 * - `active`:                  A request is pending at this floor.
 * - `estimated_passengers`:    Demand estimate for the request.
 * - `wait_cycles`:             Cycles the request has been pending.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HallCall {
    pub active: bool,
    #[serde(rename = "estimatedPassengers")]
    pub estimated_passengers: u8,
    #[serde(rename = "waitCycles")]
    pub wait_cycles: u32,
}

impl HallCall {
    pub fn new(estimated_passengers: u8) -> HallCall {
        HallCall {
            active: true,
            estimated_passengers,
            wait_cycles: 0,
        }
    }

    pub fn has_demand(&self) -> bool {
        self.active && self.estimated_passengers > 0
    }

    pub fn clear(&mut self) {
        *self = HallCall::default();
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ElevatorState {
    #[serde(rename = "currentFloor")]
    pub current_floor: u8,
    pub direction: Direction,
    pub occupancy: u8,
    pub capacity: u8,
    #[serde(rename = "floorCount")]
    pub floor_count: u8,
}

impl ElevatorState {
    pub fn new(floor_count: u8, capacity: u8) -> ElevatorState {
        ElevatorState {
            current_floor: floor_count.saturating_sub(1),
            direction: Direction::Down,
            occupancy: 0,
            capacity,
            floor_count,
        }
    }

    pub fn top_floor(&self) -> u8 {
        self.floor_count.saturating_sub(1)
    }

    pub fn is_terminal(&self, floor: u8) -> bool {
        floor == 0 || floor == self.top_floor()
    }

    pub fn is_full(&self) -> bool {
        self.occupancy >= self.capacity
    }

    pub fn free_capacity(&self) -> u8 {
        self.capacity.saturating_sub(self.occupancy)
    }

    // Floor `offset` positions along the current direction, if it exists
    pub fn floor_ahead(&self, offset: u8) -> Option<u8> {
        let floor = self.current_floor as i16 + offset as i16 * self.direction.step();
        if floor >= 0 && floor < self.floor_count as i16 {
            Some(floor as u8)
        } else {
            None
        }
    }

    pub fn distance_to(&self, floor: u8) -> u8 {
        self.current_floor.abs_diff(floor)
    }

    // Signed offset from the car to `floor`
    pub fn delta_to(&self, floor: u8) -> i16 {
        floor as i16 - self.current_floor as i16
    }
}

/**
 * Running counters for a simulation run. All of them only grow.
 *
 * # Fields
 * - `cycles`:                  Cycles processed.
 * - `stops_made`:              Stops where riders boarded.
 * - `stops_skipped`:           Calls bypassed by SmartStop or passed through while moving.
 * - `boarded`:                 Passengers boarded in total.
 * - `disembarked`:             Passengers that left the car in total.
 * - `emergency_dispatches`:    Cycles where the emergency rule picked the target.
 */
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    pub cycles: u64,
    #[serde(rename = "stopsMade")]
    pub stops_made: u64,
    #[serde(rename = "stopsSkipped")]
    pub stops_skipped: u64,
    pub boarded: u64,
    pub disembarked: u64,
    #[serde(rename = "emergencyDispatches")]
    pub emergency_dispatches: u64,
}

impl Stats {
    pub fn new() -> Stats {
        Stats::default()
    }

    // Share of stop opportunities that were skipped, in percent
    pub fn skip_rate(&self) -> Option<f64> {
        let opportunities = self.stops_made + self.stops_skipped;
        if opportunities == 0 {
            return None;
        }
        Some(self.stops_skipped as f64 / opportunities as f64 * 100.0)
    }
}
