//! `cache`: the dictionary layer the search actually talks to.
//!
//! Scanning the raw dictionary for every candidate query would dominate the
//! whole search, so the cache front-loads one lookup per slot (against the
//! slot's *initial* pattern, which never loosens) and serves every later
//! query by filtering that list against the current pattern and the no-good
//! blacklist.
//!
//! Candidate *counts* feed the variable-selection heuristic on every
//! iteration and get their own memo: a count is computed lazily and reused
//! until [`CachedDictionary::invalidate`] drops it. Invalidation must cover
//! the modified slot *and* its crossings; their patterns changed too.
//!
//! The cache holds no reference to the grid or the elimination space; the
//! session passes them in per call, which keeps ownership flat (one owner,
//! no cycles) and makes the consistency rule visible at the call site.

use crate::dictionary::{matches_pattern, Dictionary};
use crate::elimination::EliminationSpace;
use crate::grid::{Grid, SlotId};

#[derive(Debug)]
pub struct CachedDictionary {
    /// Per-slot candidates compatible with the slot's initial pattern, in
    /// dictionary order. Later queries only ever narrow these lists.
    initial: Vec<Vec<String>>,
    /// Memoized candidate counts; `None` means invalidated.
    counts: Vec<Option<u64>>,
}

impl CachedDictionary {
    /// Runs the initial dictionary lookup for every slot of `grid`.
    pub fn new(dictionary: &dyn Dictionary, grid: &Grid) -> Self {
        let initial: Vec<Vec<String>> = grid
            .slot_ids()
            .map(|slot| dictionary.lookup(&grid.pattern(slot)))
            .collect();
        let counts = vec![None; initial.len()];
        Self { initial, counts }
    }

    /// The values still viable for `slot`: initial candidates matching the
    /// current pattern and not blacklisted. Dictionary order, recomputed on
    /// every call.
    pub fn candidates<'a>(
        &'a self,
        grid: &Grid,
        eliminations: &'a EliminationSpace,
        slot: SlotId,
    ) -> impl Iterator<Item = &'a str> {
        let pattern = grid.pattern(slot);
        self.initial[slot]
            .iter()
            .map(String::as_str)
            .filter(move |word| {
                matches_pattern(word, pattern.as_bytes()) && !eliminations.is_eliminated(slot, word)
            })
    }

    /// Membership test, cheaper than draining [`Self::candidates`]: checks
    /// the pattern directly and scans the initial list for an exact match.
    #[must_use]
    pub fn contains(
        &self,
        grid: &Grid,
        eliminations: &EliminationSpace,
        slot: SlotId,
        value: &str,
    ) -> bool {
        grid.is_compatible(slot, value)
            && !eliminations.is_eliminated(slot, value)
            && self.initial[slot].iter().any(|word| word == value)
    }

    /// The current candidate count for `slot`, memoized until invalidated.
    pub fn candidates_count(
        &mut self,
        grid: &Grid,
        eliminations: &EliminationSpace,
        slot: SlotId,
    ) -> u64 {
        if let Some(count) = self.counts[slot] {
            return count;
        }
        let count = self.candidates(grid, eliminations, slot).count() as u64;
        self.counts[slot] = Some(count);
        count
    }

    /// Count of initial candidates matching an arbitrary `pattern`, minus the
    /// blacklist. Used by the lookahead probe, which evaluates hypothetical
    /// patterns that are not the slot's current one; never memoized.
    #[must_use]
    pub fn count_matching(
        &self,
        eliminations: &EliminationSpace,
        slot: SlotId,
        pattern: &[u8],
    ) -> u64 {
        self.initial[slot]
            .iter()
            .filter(|word| {
                matches_pattern(word, pattern) && !eliminations.is_eliminated(slot, word)
            })
            .count() as u64
    }

    /// Drops the memoized counts of `slot` and of every slot crossing it.
    /// Must be called after each assignment or unassignment of `slot`.
    pub fn invalidate(&mut self, grid: &Grid, slot: SlotId) {
        self.counts[slot] = None;
        for &connected in grid.connected(slot) {
            self.counts[connected] = None;
        }
    }
}
