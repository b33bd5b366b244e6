//! Variable selection: which slot does the search instantiate next.
//!
//! Minimum-remaining-values ordering: the slot with the fewest viable
//! candidates goes first, so the branching factor stays small and dead ends
//! surface early. Ties break on the lowest empty-cell ratio (more crossing
//! letters already fixed = more constrained), then on slot id so the whole
//! ordering is reproducible.

use crate::cache::CachedDictionary;
use crate::elimination::EliminationSpace;
use crate::grid::{Grid, SlotId};

/// Returns the next slot needing instantiation, or `None` when every slot
/// holds a value that is still among its cached candidates, i.e. the search
/// is complete.
///
/// A slot "needs instantiation" if it has no value, or if the value it holds
/// has dropped out of its candidates (stale after backtracking elsewhere).
pub fn select_slot(
    grid: &Grid,
    cache: &mut CachedDictionary,
    eliminations: &EliminationSpace,
) -> Option<SlotId> {
    let mut best: Option<(u64, u32, SlotId)> = None;
    for slot in grid.slot_ids() {
        let needs_instantiation = match grid.value(slot) {
            None => true,
            Some(value) => !cache.contains(grid, eliminations, slot, &value),
        };
        if !needs_instantiation {
            continue;
        }
        let key = (
            cache.candidates_count(grid, eliminations, slot),
            grid.empty_cell_ratio(slot),
            slot,
        );
        if best.map_or(true, |b| key < b) {
            best = Some(key);
        }
    }
    best.map(|(_, _, slot)| slot)
}
