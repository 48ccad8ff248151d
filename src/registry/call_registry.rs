/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{DispatchError, HallCall};

/**
 * Per-floor table of pending hall calls.
 *
 * Index is the floor number. Every mutation keeps the invariant that an
 * inactive entry carries no demand and no wait.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallRegistry {
    calls: Vec<HallCall>,
}

impl CallRegistry {
    pub fn new(floor_count: u8) -> CallRegistry {
        CallRegistry {
            calls: vec![HallCall::default(); floor_count as usize],
        }
    }

    pub fn floor_count(&self) -> u8 {
        self.calls.len() as u8
    }

    pub fn check_floor(&self, floor: u8) -> Result<(), DispatchError> {
        if (floor as usize) < self.calls.len() {
            Ok(())
        } else {
            Err(DispatchError::InvalidFloor {
                floor,
                floor_count: self.floor_count(),
            })
        }
    }

    pub fn get(&self, floor: u8) -> Option<&HallCall> {
        self.calls.get(floor as usize)
    }

    pub fn calls(&self) -> &[HallCall] {
        &self.calls
    }

    pub fn is_active(&self, floor: u8) -> bool {
        self.get(floor).map_or(false, |call| call.active)
    }

    pub fn has_demand(&self, floor: u8) -> bool {
        self.get(floor).map_or(false, HallCall::has_demand)
    }

    // Floors holding an active call with positive demand, ascending
    pub fn demand_floors(&self) -> impl Iterator<Item = (u8, &HallCall)> + '_ {
        self.calls
            .iter()
            .enumerate()
            .filter(|(_, call)| call.has_demand())
            .map(|(floor, call)| (floor as u8, call))
    }

    // Activates a call at `floor`. Returns false if one was already pending.
    pub fn activate(&mut self, floor: u8, estimated_passengers: u8) -> Result<bool, DispatchError> {
        self.check_floor(floor)?;
        let call = &mut self.calls[floor as usize];
        if call.active {
            return Ok(false);
        }
        *call = HallCall::new(estimated_passengers);
        Ok(true)
    }

    // Overwrites the entry at `floor`; an inactive call is stored as the empty call
    pub fn insert(&mut self, floor: u8, call: HallCall) -> Result<(), DispatchError> {
        self.check_floor(floor)?;
        self.calls[floor as usize] = if call.active { call } else { HallCall::default() };
        Ok(())
    }

    pub fn clear(&mut self, floor: u8) {
        if let Some(call) = self.calls.get_mut(floor as usize) {
            call.clear();
        }
    }

    pub fn age(&mut self, floor: u8) {
        if let Some(call) = self.calls.get_mut(floor as usize) {
            if call.active {
                call.wait_cycles = call.wait_cycles.saturating_add(1);
            }
        }
    }

    /// Deactivates every active call without demand.
    ///
    /// Returns the floors that were cleaned up. Running it twice in a row
    /// leaves the registry as the first run left it.
    pub fn cleanup_degenerate_calls(&mut self) -> Vec<u8> {
        let mut removed = Vec::new();
        for (floor, call) in self.calls.iter_mut().enumerate() {
            if call.active && call.estimated_passengers == 0 {
                call.clear();
                removed.push(floor as u8);
            }
        }
        removed
    }

    // Active calls with demand strictly between `from` and `to`
    pub fn demand_between(&self, from: u8, to: u8) -> usize {
        let (low, high) = if from < to { (from, to) } else { (to, from) };
        ((low + 1)..high).filter(|&floor| self.has_demand(floor)).count()
    }
}
