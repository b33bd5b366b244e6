//! Lookahead probe: how open would the grid stay after a hypothetical
//! assignment.
//!
//! The estimate for assigning `word` to a slot is the product of the
//! candidate counts every crossing slot would be left with. It is a local
//! measure, not a solution count: a nonzero estimate does not guarantee the
//! grid is still solvable, but a zero one proves the assignment is a dead
//! end. Only the crossing patterns change under the hypothesis, so the probe
//! substitutes the crossing letter into each neighbour's pattern instead of
//! mutating (and restoring) any grid state.

use crate::cache::CachedDictionary;
use crate::elimination::EliminationSpace;
use crate::grid::{Grid, SlotId};

/// Estimated number of local solutions if `word` were assigned to `slot`.
///
/// Saturates at `u128::MAX`; candidate counts get multiplied across every
/// crossing slot and real dictionaries make that astronomically large.
/// Saturation can only blur the ranking between two equally-open choices;
/// zero versus nonzero, the part correctness relies on, stays exact.
#[must_use]
pub fn local_solutions_estimate(
    grid: &Grid,
    cache: &CachedDictionary,
    eliminations: &EliminationSpace,
    slot: SlotId,
    word: &str,
) -> u128 {
    debug_assert!(grid.is_compatible(slot, word));
    let mut estimate: u128 = 1;
    for &other in grid.connected(slot) {
        let (index_in_slot, index_in_other) = grid
            .crossing(slot, other)
            .unwrap_or_else(|| panic!("connected slots {slot} and {other} do not cross"));
        let mut pattern = grid.pattern(other).into_bytes();
        pattern[index_in_other] = word.as_bytes()[index_in_slot];
        let count = cache.count_matching(eliminations, other, &pattern);
        if count == 0 {
            return 0;
        }
        estimate = estimate.saturating_mul(u128::from(count));
    }
    estimate
}
