//! The terminal artifact of a solving session.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::puzzle::Pos;

/// How a solving session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverResultKind {
    /// Every slot holds a word and all crossings agree.
    Success,
    /// The search space is exhausted: no assignment satisfies the puzzle.
    Impossible,
    /// The session was cancelled externally; the grid reflects the last
    /// fully-applied assignment.
    Cancelled,
}

/// Counters accumulated while solving.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub assignments: u64,
    pub unassignments: u64,
}

/// Outcome of a solving session: the kind, the (possibly partial) filled
/// grid, the cells judged unsolvable when the puzzle is impossible, and the
/// resolution statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverResult {
    pub kind: SolverResultKind,
    /// Filled cells, pre-filled ones included. Partial unless `Success`.
    pub filled_cells: HashMap<Pos, char>,
    /// Cells of the slots left unassigned; empty unless `Impossible`.
    pub unsolvable_cells: HashSet<Pos>,
    pub statistics: Statistics,
}

impl SolverResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.kind == SolverResultKind::Success
    }
}

impl fmt::Display for SolverResult {
    /// Renders the kind, the grid (`#` for unfilled or shaded cells) and the
    /// statistics.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Result: {:?}", self.kind)?;
        let width = self.filled_cells.keys().map(|pos| pos.x + 1).max().unwrap_or(0);
        let height = self.filled_cells.keys().map(|pos| pos.y + 1).max().unwrap_or(0);
        for y in 0..height {
            write!(f, "|")?;
            for x in 0..width {
                match self.filled_cells.get(&Pos::new(x, y)) {
                    Some(c) => write!(f, "{c}|")?,
                    None => write!(f, "#|")?,
                }
            }
            writeln!(f)?;
        }
        write!(
            f,
            "Statistics: {} assignments, {} unassignments",
            self.statistics.assignments, self.statistics.unassignments
        )
    }
}
