/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::CallOrigin;

/**
 * Marks floors whose request came from a manual trigger.
 *
 * The flags are metadata on top of the hall call table and the onboard
 * destination set; the demand lives there. Only a stop at the floor clears
 * them.
 *
 * # Fields
 * - `internal`:    Floors requested from inside the car.
 * - `external`:    Floors requested from the hall.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualOverrides {
    internal: Vec<bool>,
    external: Vec<bool>,
}

impl ManualOverrides {
    pub fn new(floor_count: u8) -> ManualOverrides {
        ManualOverrides {
            internal: vec![false; floor_count as usize],
            external: vec![false; floor_count as usize],
        }
    }

    pub fn flag(&mut self, origin: CallOrigin, floor: u8) {
        let flags = match origin {
            CallOrigin::Internal => &mut self.internal,
            CallOrigin::External => &mut self.external,
        };
        if let Some(flag) = flags.get_mut(floor as usize) {
            *flag = true;
        }
    }

    pub fn is_flagged(&self, floor: u8) -> bool {
        let floor = floor as usize;
        self.internal.get(floor).copied().unwrap_or(false)
            || self.external.get(floor).copied().unwrap_or(false)
    }

    pub fn is_flagged_as(&self, origin: CallOrigin, floor: u8) -> bool {
        let flags = match origin {
            CallOrigin::Internal => &self.internal,
            CallOrigin::External => &self.external,
        };
        flags.get(floor as usize).copied().unwrap_or(false)
    }

    // Flagged floors of either origin, ascending
    pub fn flagged_floors(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.internal.len())
            .filter(|&floor| self.internal[floor] || self.external[floor])
            .map(|floor| floor as u8)
    }

    pub fn clear_floor(&mut self, floor: u8) {
        let floor = floor as usize;
        if floor < self.internal.len() {
            self.internal[floor] = false;
            self.external[floor] = false;
        }
    }
}

/// Drop-off floors requested by riders currently on board.
///
/// One flag per floor: set means at least one group wants to leave there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalDestinations {
    floors: Vec<bool>,
}

impl InternalDestinations {
    pub fn new(floor_count: u8) -> InternalDestinations {
        InternalDestinations {
            floors: vec![false; floor_count as usize],
        }
    }

    pub fn insert(&mut self, floor: u8) {
        if let Some(slot) = self.floors.get_mut(floor as usize) {
            *slot = true;
        }
    }

    // Returns whether the floor was pending
    pub fn remove(&mut self, floor: u8) -> bool {
        match self.floors.get_mut(floor as usize) {
            Some(slot) => std::mem::replace(slot, false),
            None => false,
        }
    }

    pub fn contains(&self, floor: u8) -> bool {
        self.floors.get(floor as usize).copied().unwrap_or(false)
    }

    pub fn is_empty(&self) -> bool {
        !self.floors.iter().any(|&pending| pending)
    }

    pub fn floors(&self) -> impl Iterator<Item = u8> + '_ {
        self.floors
            .iter()
            .enumerate()
            .filter(|(_, &pending)| pending)
            .map(|(floor, _)| floor as u8)
    }
}
