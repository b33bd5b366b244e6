//! Backtracking strategies: which assignments to retract when a slot has no
//! viable candidate left.
//!
//! All three strategies answer with a list of [`Elimination`]s: pairs of an
//! unassignment target and the reason slots justifying the resulting
//! no-good. The engine applies them in order. An empty answer means the
//! search space is exhausted and the puzzle is impossible.
//!
//! The reason set is the same for every target: the failing slot's assigned
//! crossings, minus the targets themselves (a slot about to be retracted can
//! justify nothing, and a no-good must not name its own target, or it would
//! purge itself on application). An empty reason set is allowed and makes
//! the no-good permanent.

use log::debug;

use crate::grid::{Grid, SlotId};
use crate::history::History;

/// How the engine retracts assignments on a dead end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BacktrackStrategy {
    /// Retract the most recently assigned slot overall.
    Simple,
    /// Retract the most recently assigned slot *connected to* the failure:
    /// a locally relevant culprit, cheaper convergence.
    #[default]
    Dynamic,
    /// Retract every assignment from the most recent one down to (and
    /// including) the first one connected to the failure.
    Backjump,
}

/// One retraction order: unassign `slot`, blacklist its value with `reasons`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Elimination {
    pub slot: SlotId,
    pub reasons: Vec<SlotId>,
}

/// Decides which assignments to retract after `failed` ran out of
/// candidates. Empty result = nothing left to retract, signal impossibility.
#[must_use]
pub fn backtrack_from(
    strategy: BacktrackStrategy,
    grid: &Grid,
    history: &History,
    failed: SlotId,
) -> Vec<Elimination> {
    let targets: Vec<SlotId> = match strategy {
        BacktrackStrategy::Simple => history.last_assigned().into_iter().collect(),
        BacktrackStrategy::Dynamic => {
            history.last_assigned_connected(grid, failed).into_iter().collect()
        }
        BacktrackStrategy::Backjump => {
            let mut walked = Vec::new();
            for slot in history.explorer() {
                walked.push(slot);
                if grid.connected(failed).contains(&slot) {
                    break;
                }
            }
            walked
        }
    };

    let reasons: Vec<SlotId> = grid
        .connected(failed)
        .iter()
        .copied()
        .filter(|&slot| grid.is_assigned(slot) && !targets.contains(&slot))
        .collect();
    debug!("Backtracking from slot {failed} ({strategy:?}): retracting {targets:?}, blaming {reasons:?}");

    targets
        .into_iter()
        .map(|slot| Elimination { slot, reasons: reasons.clone() })
        .collect()
}
