//! Value selection: which word goes into the chosen slot.
//!
//! Least-constraining choice, guided by the lookahead probe: every candidate
//! is scored with the estimated number of local solutions the grid would
//! keep after the assignment, candidates scoring zero are discarded, and the
//! highest score wins (ties go to the lexicographically greatest word, for
//! reproducibility).
//!
//! Probing the whole candidate list would be quadratic in dictionary size,
//! so only the first [`MAX_PROBED_CANDIDATES`] candidates with a nonzero
//! estimate compete. Any viable value keeps the search correct; the cap
//! only limits how well ties are broken. The candidates arrive in
//! dictionary iteration order, so which ten get probed depends on that
//! order; this is documented, deliberate nondeterminism *across*
//! dictionaries, and full determinism for any fixed one.

use log::debug;

use crate::cache::CachedDictionary;
use crate::elimination::EliminationSpace;
use crate::grid::{Grid, SlotId};
use crate::lookahead::local_solutions_estimate;

/// Number of probed-viable candidates compared before settling.
const MAX_PROBED_CANDIDATES: usize = 10;

/// Picks a word for `slot`, or `None` if no candidate leaves the crossing
/// slots any way forward (the trigger for backtracking).
pub fn choose_candidate(
    grid: &Grid,
    cache: &CachedDictionary,
    eliminations: &EliminationSpace,
    slot: SlotId,
) -> Option<String> {
    let mut best: Option<(u128, &str)> = None;
    let mut probed = 0;
    for word in cache.candidates(grid, eliminations, slot) {
        let estimate = local_solutions_estimate(grid, cache, eliminations, slot, word);
        if estimate == 0 {
            continue;
        }
        if best.map_or(true, |(best_estimate, best_word)| {
            (estimate, word) > (best_estimate, best_word)
        }) {
            best = Some((estimate, word));
        }
        probed += 1;
        if probed == MAX_PROBED_CANDIDATES {
            break;
        }
    }
    match best {
        Some((estimate, word)) => {
            debug!("Chose {word:?} for slot {slot} (estimate {estimate})");
            Some(word.to_string())
        }
        None => None,
    }
}
