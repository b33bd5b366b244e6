//! The solving session and its search engine.
//!
//! # Algorithm
//!
//! The engine runs the classic assign/backtrack loop over word slots:
//!
//! 1. pick the most constrained unassigned slot ([`crate::iteration`]);
//! 2. pick the least-constraining viable word for it
//!    ([`crate::instantiation`]);
//! 3. if a word was found, assign it; otherwise ask the backtracking
//!    strategy ([`crate::backtrack`]) which assignments to retract, record
//!    the retracted values as no-goods ([`crate::elimination`]) and loop.
//!
//! The loop ends when no slot needs work (success), when the backtracker has
//! nothing left to retract (impossible), or when the caller's
//! [`CancellationToken`] fires (cancelled; checked once per iteration, so
//! the grid always reflects a fully-applied state).
//!
//! All mutable search state (grid, candidate cache, assignment history and
//! elimination space) is owned by a single session value created inside
//! [`Solver::solve`]; components never hold references to each other, and
//! every cross-structure update (assign, then history, then cache, then
//! listeners) is spelled out in one place, in order.
//!
//! # Examples
//!
//! ```
//! use crossfill::dictionary::WordList;
//! use crossfill::puzzle::PuzzleDefinition;
//! use crossfill::solver::Solver;
//!
//! let puzzle = PuzzleDefinition::new(3, 3);
//! let words = WordList::new(["AAA", "ABC", "ABD", "ABE", "BBB", "CDE"]);
//! let result = Solver::new().solve(&puzzle, &words)?;
//! assert!(result.is_success());
//! # Ok::<(), crossfill::puzzle::PuzzleError>(())
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::backtrack::{backtrack_from, BacktrackStrategy};
use crate::cache::CachedDictionary;
use crate::dictionary::Dictionary;
use crate::elimination::EliminationSpace;
use crate::grid::{Grid, SlotId};
use crate::history::History;
use crate::instantiation::choose_candidate;
use crate::iteration::select_slot;
use crate::listener::ProgressListener;
use crate::puzzle::{PuzzleDefinition, PuzzleError};
use crate::result::{SolverResult, SolverResultKind, Statistics};

/// Cooperative cancellation signal, checked once per engine iteration.
///
/// Clone the token, hand one copy to the solver and keep the other; calling
/// [`CancellationToken::cancel`] from any thread makes the session stop with
/// [`SolverResultKind::Cancelled`] at the next iteration boundary. The
/// engine does no timing itself; callers wanting a timeout cancel from
/// outside.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// The mutable state of one solving session. Exclusively owned; independent
/// sessions can run concurrently with nothing shared but the (read-only)
/// dictionary.
struct Session {
    grid: Grid,
    cache: CachedDictionary,
    eliminations: EliminationSpace,
    history: History,
    statistics: Statistics,
}

impl Session {
    fn new(puzzle: &PuzzleDefinition, dictionary: &dyn Dictionary) -> Result<Self, PuzzleError> {
        let grid = Grid::new(puzzle)?;
        let cache = CachedDictionary::new(dictionary, &grid);
        Ok(Self {
            grid,
            cache,
            eliminations: EliminationSpace::new(),
            history: History::new(),
            statistics: Statistics::default(),
        })
    }

    /// Applies one assignment: grid, history, cache, counters, listeners.
    fn assign(&mut self, listeners: &mut [&mut dyn ProgressListener], slot: SlotId, word: &str) {
        debug!("Assigning {word:?} to slot {slot}");
        self.grid.assign(slot, word);
        self.history.add_assignment(slot);
        self.cache.invalidate(&self.grid, slot);
        self.statistics.assignments += 1;
        let percent = self.completion_percent();
        for listener in listeners.iter_mut() {
            listener.on_assignment(slot, word);
            listener.on_solver_progress(percent);
        }
    }

    /// Applies one retraction: grid, no-good store, history, cache,
    /// counters, listeners.
    fn unassign(
        &mut self,
        listeners: &mut [&mut dyn ProgressListener],
        slot: SlotId,
        reasons: &[SlotId],
    ) {
        let word = self.grid.unassign(slot);
        debug!("Unassigned {word:?} from slot {slot} (reasons: {reasons:?})");
        self.eliminations.eliminate(slot, reasons, word.clone());
        self.history.remove_assignment(slot);
        self.cache.invalidate(&self.grid, slot);
        self.statistics.unassignments += 1;
        let percent = self.completion_percent();
        for listener in listeners.iter_mut() {
            listener.on_unassignment(slot, &word);
            listener.on_solver_progress(percent);
        }
    }

    fn completion_percent(&self) -> u8 {
        let fillable = self.grid.fillable_cell_count();
        if fillable == 0 {
            return 100;
        }
        (self.grid.filled_cells().len() * 100 / fillable) as u8
    }

    /// Saturating product of every slot's candidate count: the pre-pruned
    /// size of the search space, logged before the loop starts.
    fn branch_estimate(&mut self) -> u128 {
        let mut branches: u128 = 1;
        for slot in self.grid.slot_ids() {
            let count = self.cache.candidates_count(&self.grid, &self.eliminations, slot);
            branches = branches.saturating_mul(u128::from(count));
        }
        branches
    }

    fn into_result(self, kind: SolverResultKind) -> SolverResult {
        let unsolvable_cells = if kind == SolverResultKind::Impossible {
            self.grid
                .slot_ids()
                .filter(|&slot| !self.grid.is_assigned(slot))
                .flat_map(|slot| self.grid.definition(slot).positions())
                .collect()
        } else {
            Default::default()
        };
        SolverResult {
            kind,
            filled_cells: self.grid.filled_cells(),
            unsolvable_cells,
            statistics: self.statistics,
        }
    }
}

/// A crossword solver: configuration plus the entry point,
/// [`Solver::solve`]. One `Solver` value runs one session and is consumed
/// by it.
#[derive(Default)]
pub struct Solver<'a> {
    strategy: BacktrackStrategy,
    listeners: Vec<&'a mut dyn ProgressListener>,
    cancellation: CancellationToken,
}

impl<'a> Solver<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the backtracking strategy (default: dynamic).
    #[must_use]
    pub fn with_strategy(mut self, strategy: BacktrackStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Registers a progress listener. Listeners are invoked synchronously,
    /// in registration order.
    #[must_use]
    pub fn with_listener(mut self, listener: &'a mut dyn ProgressListener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Installs an external cancellation signal.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Fills `puzzle` with words from `dictionary`.
    ///
    /// Returns the terminal [`SolverResult`]: success with a complete grid,
    /// impossibility with the best-known partial grid, or cancellation.
    /// Absence of a solution is *not* an error.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the puzzle definition itself is invalid;
    /// the search never starts in that case.
    pub fn solve(
        mut self,
        puzzle: &PuzzleDefinition,
        dictionary: &dyn Dictionary,
    ) -> Result<SolverResult, PuzzleError> {
        for listener in self.listeners.iter_mut() {
            listener.on_initialisation_start();
        }
        let mut session = Session::new(puzzle, dictionary)?;
        info!(
            "Initialised {} slots; pre-pruned search space holds {} branches",
            session.grid.slot_count(),
            session.branch_estimate()
        );
        for listener in self.listeners.iter_mut() {
            listener.on_initialisation_end();
        }

        let kind = loop {
            if self.cancellation.is_cancelled() {
                warn!("Solver cancelled");
                break SolverResultKind::Cancelled;
            }

            let Some(slot) = select_slot(&session.grid, &mut session.cache, &session.eliminations)
            else {
                break SolverResultKind::Success;
            };

            match choose_candidate(&session.grid, &session.cache, &session.eliminations, slot) {
                Some(word) => session.assign(&mut self.listeners, slot, &word),
                None => {
                    debug!("No candidate for slot {slot}, backtracking");
                    let eliminations =
                        backtrack_from(self.strategy, &session.grid, &session.history, slot);
                    if eliminations.is_empty() {
                        info!("Nothing left to retract, puzzle is impossible");
                        break SolverResultKind::Impossible;
                    }
                    for elimination in eliminations {
                        session.unassign(
                            &mut self.listeners,
                            elimination.slot,
                            &elimination.reasons,
                        );
                    }
                }
            }
        };

        if kind == SolverResultKind::Success {
            for listener in self.listeners.iter_mut() {
                listener.on_solver_progress(100);
            }
        }
        debug!("Final grid state:\n{}", session.grid);
        info!(
            "Solver finished: {kind:?} after {} assignments / {} unassignments",
            session.statistics.assignments, session.statistics.unassignments
        );
        Ok(session.into_result(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::WordList;
    use crate::puzzle::Pos;

    #[test]
    fn cancellation_before_start_yields_cancelled() {
        let token = CancellationToken::new();
        token.cancel();
        let words = WordList::new(["AAA"]);
        let result = Solver::new()
            .with_cancellation(token)
            .solve(&PuzzleDefinition::new(3, 3), &words)
            .unwrap();
        assert_eq!(result.kind, SolverResultKind::Cancelled);
        assert!(result.filled_cells.is_empty());
    }

    #[test]
    fn invalid_puzzle_is_reported_before_searching() {
        let words = WordList::new(["AAA"]);
        let puzzle = PuzzleDefinition::new(3, 3).shade(Pos::new(5, 5));
        assert!(Solver::new().solve(&puzzle, &words).is_err());
    }

    #[test]
    fn empty_dictionary_is_impossible_immediately() {
        let words = WordList::new(Vec::<String>::new());
        let result = Solver::new().solve(&PuzzleDefinition::new(3, 3), &words).unwrap();
        assert_eq!(result.kind, SolverResultKind::Impossible);
        assert_eq!(result.statistics, Statistics::default());
        // Every cell belongs to some unassignable slot.
        assert_eq!(result.unsolvable_cells.len(), 9);
    }
}
