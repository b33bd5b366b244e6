//! No-good store: remembers which (slot, value) pairs were rejected during
//! backtracking, and why.
//!
//! Each elimination carries a reason set: the slots whose current
//! assignments justify the rejection. The store is what makes backtracking
//! *dynamic*: the moment any reason slot is retracted, the records it
//! justified are dropped, and the rejected values become eligible again.
//!
//! A record with an empty reason set is justified by nothing and therefore
//! never purged: the value is permanently out for that slot.

use std::collections::{HashMap, HashSet};

use crate::grid::SlotId;

/// The no-goods accumulated during backtracking.
///
/// Indexed by slot, then by eliminated value; reads dominate writes, so the
/// value is the lookup key rather than the reason set.
#[derive(Debug, Default)]
pub struct EliminationSpace {
    eliminations: HashMap<SlotId, HashMap<String, HashSet<SlotId>>>,
}

impl EliminationSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `value` is forbidden for the just-unassigned `slot`,
    /// justified by `reasons` (unioned with any existing reasons for the same
    /// value).
    ///
    /// Side effect: `slot` no longer holds an assignment, so it can no longer
    /// justify anything; every stored record whose reason set contains
    /// `slot` is purged, across all slots.
    pub fn eliminate(&mut self, slot: SlotId, reasons: &[SlotId], value: String) {
        self.eliminations
            .entry(slot)
            .or_default()
            .entry(value)
            .or_default()
            .extend(reasons.iter().copied());

        for slot_eliminations in self.eliminations.values_mut() {
            slot_eliminations.retain(|_, record_reasons| !record_reasons.contains(&slot));
        }
    }

    /// Whether `value` is currently forbidden for `slot`.
    #[must_use]
    pub fn is_eliminated(&self, slot: SlotId, value: &str) -> bool {
        self.eliminations
            .get(&slot)
            .is_some_and(|values| values.contains_key(value))
    }

    /// The values currently forbidden for `slot`, in no particular order.
    pub fn eliminated_values(&self, slot: SlotId) -> impl Iterator<Item = &str> {
        self.eliminations
            .get(&slot)
            .into_iter()
            .flat_map(|values| values.keys().map(String::as_str))
    }

    /// Drops every record: full blacklist reset.
    pub fn clear(&mut self) {
        self.eliminations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eliminated_value_is_reported() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[1, 2], "ABC".to_string());
        assert!(space.is_eliminated(0, "ABC"));
        assert!(!space.is_eliminated(0, "ABD"));
        assert!(!space.is_eliminated(1, "ABC"));
    }

    #[test]
    fn eliminating_twice_is_idempotent() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[1], "ABC".to_string());
        space.eliminate(0, &[1], "ABC".to_string());
        assert!(space.is_eliminated(0, "ABC"));
        assert_eq!(space.eliminated_values(0).count(), 1);
    }

    #[test]
    fn retracting_a_reason_rehabilitates_the_value() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[1], "ABC".to_string());
        // Slot 1 gets unassigned in turn: its justification disappears.
        space.eliminate(1, &[], "XYZ".to_string());
        assert!(!space.is_eliminated(0, "ABC"));
        assert!(space.is_eliminated(1, "XYZ"));
    }

    #[test]
    fn any_retracted_reason_purges_the_whole_record() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[1, 2], "ABC".to_string());
        space.eliminate(2, &[], "XYZ".to_string());
        // Reason 1 still stands, but the record is justified as a whole:
        // losing any member invalidates it.
        assert!(!space.is_eliminated(0, "ABC"));
    }

    #[test]
    fn empty_reason_set_is_permanent() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[], "ABC".to_string());
        space.eliminate(1, &[], "DEF".to_string());
        space.eliminate(2, &[], "GHI".to_string());
        assert!(space.is_eliminated(0, "ABC"));
    }

    #[test]
    fn clear_resets_everything() {
        let mut space = EliminationSpace::new();
        space.eliminate(0, &[], "ABC".to_string());
        space.clear();
        assert!(!space.is_eliminated(0, "ABC"));
    }
}
