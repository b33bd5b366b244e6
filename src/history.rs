//! Chronological record of slot assignments.
//!
//! Each assignment gets a monotonically increasing sequence number; the
//! backtracking strategies query the record to find the most recent
//! assignment overall, the most recent among the slots connected to a
//! failure, or to walk the whole history from newest to oldest.

use std::collections::HashMap;

use crate::grid::{Grid, SlotId};

/// Sequence number reported for a slot that holds no assignment. Maximal, so
/// that "never assigned" sorts after every real stamp.
pub const UNASSIGNED: u64 = u64::MAX;

#[derive(Debug, Default)]
pub struct History {
    /// Slot -> sequence number of its current assignment.
    records: HashMap<SlotId, u64>,
    counter: u64,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps `slot` with the next sequence number.
    pub fn add_assignment(&mut self, slot: SlotId) {
        self.counter += 1;
        self.records.insert(slot, self.counter);
    }

    /// Clears the stamp of `slot`.
    pub fn remove_assignment(&mut self, slot: SlotId) {
        self.records.remove(&slot);
    }

    /// The stamp of `slot`, or [`UNASSIGNED`] if it has none.
    #[must_use]
    pub fn assignment_number(&self, slot: SlotId) -> u64 {
        self.records.get(&slot).copied().unwrap_or(UNASSIGNED)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recently assigned slot, if any assignment is on record.
    #[must_use]
    pub fn last_assigned(&self) -> Option<SlotId> {
        self.records
            .iter()
            .max_by_key(|&(_, &stamp)| stamp)
            .map(|(&slot, _)| slot)
    }

    /// The most recently assigned slot among those connected to `slot`.
    #[must_use]
    pub fn last_assigned_connected(&self, grid: &Grid, slot: SlotId) -> Option<SlotId> {
        grid.connected(slot)
            .iter()
            .copied()
            .filter_map(|other| self.records.get(&other).map(|&stamp| (stamp, other)))
            .max_by_key(|&(stamp, _)| stamp)
            .map(|(_, other)| other)
    }

    /// Assigned slots from most to least recent.
    #[must_use]
    pub fn explorer(&self) -> Vec<SlotId> {
        let mut stamped: Vec<(u64, SlotId)> =
            self.records.iter().map(|(&slot, &stamp)| (stamp, slot)).collect();
        stamped.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        stamped.into_iter().map(|(_, slot)| slot).collect()
    }
}
