//! Progress listeners, the solver's only output channel besides the final
//! result.
//!
//! Listeners are called synchronously at defined points of the search and
//! exist for external instrumentation only: the engine never reads anything
//! back from them, and they must not mutate solver state (they only ever
//! receive shared data). Completion percentages are not monotonic; they
//! drop after backtracking.

use crate::grid::SlotId;

/// Callbacks invoked by the solver as it works.
///
/// Every method has an empty default so implementors override only what they
/// observe.
pub trait ProgressListener {
    /// Solver starts building its internal state (grid, caches).
    fn on_initialisation_start(&mut self) {}

    /// Internal state is ready; the search loop is about to run.
    fn on_initialisation_end(&mut self) {}

    /// Completion update, 0–100 filled-cell percent. May decrease.
    fn on_solver_progress(&mut self, _percent: u8) {}

    /// A word was just written into a slot.
    fn on_assignment(&mut self, _slot: SlotId, _word: &str) {}

    /// A slot was just cleared during backtracking.
    fn on_unassignment(&mut self, _slot: SlotId, _word: &str) {}
}
