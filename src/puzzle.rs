//! Puzzle definition: the input contract of the solver.
//!
//! A [`PuzzleDefinition`] describes the board before any search starts: its
//! dimensions, which cells are shaded (blocked), and which cells come
//! pre-filled with a letter. It is a plain value type; the mutable search
//! state lives in [`crate::grid::Grid`].
//!
//! Validation happens once, in [`PuzzleDefinition::validate`], before the grid
//! is built. Anything that passes validation is guaranteed not to make the
//! grid constructor panic.

use std::collections::{HashMap, HashSet};
use std::fmt;

/// A cell position. `x` is the column index, `y` the row index, both
/// zero-based, with `(0, 0)` at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Pos {
    pub x: usize,
    pub y: usize,
}

impl Pos {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Ways a puzzle definition can be rejected before solving starts.
#[derive(Debug, thiserror::Error)]
pub enum PuzzleError {
    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("shaded cell {0} is outside the grid")]
    ShadedOutOfBounds(Pos),

    #[error("pre-filled cell {0} is outside the grid")]
    PrefilledOutOfBounds(Pos),

    #[error("pre-filled cell {0} is also shaded")]
    PrefilledShaded(Pos),

    #[error("pre-filled cell {pos} holds {letter:?}, expected an ASCII uppercase letter")]
    PrefilledNotUppercase { pos: Pos, letter: char },
}

/// The static description of a crossword puzzle to fill.
#[derive(Debug, Clone, Default)]
pub struct PuzzleDefinition {
    width: usize,
    height: usize,
    shaded: HashSet<Pos>,
    prefilled: HashMap<Pos, char>,
}

impl PuzzleDefinition {
    /// Creates an empty (fully open) puzzle of the given dimensions.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, shaded: HashSet::new(), prefilled: HashMap::new() }
    }

    /// Marks a cell as shaded. Returns `self` for chaining.
    #[must_use]
    pub fn shade(mut self, pos: Pos) -> Self {
        self.shaded.insert(pos);
        self
    }

    /// Fixes a letter at the given cell. Returns `self` for chaining.
    #[must_use]
    pub fn prefill(mut self, pos: Pos, letter: char) -> Self {
        self.prefilled.insert(pos, letter);
        self
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn is_shaded(&self, pos: Pos) -> bool {
        self.shaded.contains(&pos)
    }

    #[must_use]
    pub fn prefilled_letter(&self, pos: Pos) -> Option<char> {
        self.prefilled.get(&pos).copied()
    }

    /// Checks the definition for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns the first [`PuzzleError`] found: zero dimensions, out-of-bounds
    /// shaded or pre-filled cells, a pre-filled cell that is also shaded, or a
    /// pre-filled value outside `'A'..='Z'`.
    pub fn validate(&self) -> Result<(), PuzzleError> {
        if self.width == 0 || self.height == 0 {
            return Err(PuzzleError::InvalidDimensions { width: self.width, height: self.height });
        }
        for &pos in &self.shaded {
            if pos.x >= self.width || pos.y >= self.height {
                return Err(PuzzleError::ShadedOutOfBounds(pos));
            }
        }
        for (&pos, &letter) in &self.prefilled {
            if pos.x >= self.width || pos.y >= self.height {
                return Err(PuzzleError::PrefilledOutOfBounds(pos));
            }
            if self.shaded.contains(&pos) {
                return Err(PuzzleError::PrefilledShaded(pos));
            }
            if !letter.is_ascii_uppercase() {
                return Err(PuzzleError::PrefilledNotUppercase { pos, letter });
            }
        }
        Ok(())
    }
}
