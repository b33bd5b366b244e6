//! Mutable grid state and slot extraction.
//!
//! The grid owns every cell of the puzzle plus the derived word slots (the
//! variables of the satisfaction problem) and their connectivity. All slot
//! queries and mutations go through [`Grid`] methods taking a [`SlotId`];
//! there is no per-slot handle type holding a reference back into the grid,
//! which keeps ownership single and the update order explicit.
//!
//! Slot extraction runs once at construction: every maximal horizontal or
//! vertical run of at least two open cells becomes a slot. Single-cell runs
//! are ignored; they cannot hold a word.
//!
//! # Contract violations
//!
//! Unassigning a slot that holds no value, or writing a letter over a
//! conflicting pre-filled cell, panics: both indicate a defect in the calling
//! search code, not a recoverable condition.

use std::collections::HashMap;
use std::fmt;

use smallvec::SmallVec;

use crate::puzzle::{Pos, PuzzleDefinition, PuzzleError};

/// Index of a slot in the grid's slot table.
pub type SlotId = usize;

/// Direction of a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Across,
    Down,
}

/// Static description of a slot: the row (across) or column (down) it lives
/// on, and the half-open `[start, end)` span of cells along that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotDefinition {
    orientation: Orientation,
    /// Row index for across slots, column index for down slots.
    offset: usize,
    start: usize,
    end: usize,
}

impl SlotDefinition {
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Position of the `i`-th cell of the slot.
    #[must_use]
    pub fn cell(&self, i: usize) -> Pos {
        match self.orientation {
            Orientation::Across => Pos::new(self.start + i, self.offset),
            Orientation::Down => Pos::new(self.offset, self.start + i),
        }
    }

    /// All cell positions of the slot, in word order.
    #[must_use]
    pub fn positions(&self) -> Vec<Pos> {
        (0..self.len()).map(|i| self.cell(i)).collect()
    }

    /// If the two slots share a cell, returns the index of that cell within
    /// `self` and within `other`. Parallel slots never cross: maximal runs on
    /// the same line cannot overlap.
    #[must_use]
    pub fn crossing_with(&self, other: &SlotDefinition) -> Option<(usize, usize)> {
        if self.orientation == other.orientation {
            return None;
        }
        // `self.offset` indexes the perpendicular axis of `other` and vice versa.
        if (other.start..other.end).contains(&self.offset)
            && (self.start..self.end).contains(&other.offset)
        {
            Some((other.offset - self.start, self.offset - other.start))
        } else {
            None
        }
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Shaded,
    /// Fixed by the puzzle definition; immutable during search.
    Prefilled(char),
    Empty,
    /// Written by the solver; cleared on unassignment.
    Letter(char),
}

impl Cell {
    fn value(self) -> Option<char> {
        match self {
            Cell::Prefilled(c) | Cell::Letter(c) => Some(c),
            Cell::Shaded | Cell::Empty => None,
        }
    }

    fn set(&mut self, c: char) {
        match *self {
            Cell::Empty | Cell::Letter(_) => *self = Cell::Letter(c),
            Cell::Prefilled(fixed) => {
                // The caller is responsible for checking compatibility first.
                assert!(fixed == c, "attempt to overwrite pre-filled letter {fixed:?} with {c:?}");
            }
            Cell::Shaded => panic!("attempt to write into a shaded cell"),
        }
    }

    fn reset(&mut self) {
        match *self {
            Cell::Letter(_) | Cell::Empty => *self = Cell::Empty,
            Cell::Prefilled(_) => {} // pre-filled letters survive unassignment
            Cell::Shaded => panic!("attempt to reset a shaded cell"),
        }
    }
}

#[derive(Debug, Clone)]
struct SlotState {
    definition: SlotDefinition,
    /// Whether the slot has been assigned a word. Cell contents alone cannot
    /// tell: a slot may be entirely filled by side effect of its crossings.
    assigned: bool,
}

/// The mutable puzzle state: cells, slots and slot connectivity.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Row-major cells; `cells[y * width + x]`.
    cells: Vec<Cell>,
    slots: Vec<SlotState>,
    /// Per-slot list of crossing slots, in slot-id order.
    connections: Vec<SmallVec<[SlotId; 8]>>,
}

impl Grid {
    /// Builds the grid and extracts the slots from a puzzle definition.
    ///
    /// # Errors
    ///
    /// Returns a [`PuzzleError`] if the definition fails validation.
    pub fn new(puzzle: &PuzzleDefinition) -> Result<Self, PuzzleError> {
        puzzle.validate()?;

        let (width, height) = (puzzle.width(), puzzle.height());
        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                let pos = Pos::new(x, y);
                cells.push(if puzzle.is_shaded(pos) {
                    Cell::Shaded
                } else if let Some(letter) = puzzle.prefilled_letter(pos) {
                    Cell::Prefilled(letter)
                } else {
                    Cell::Empty
                });
            }
        }

        let definitions = extract_slots(puzzle);
        let connections = definitions
            .iter()
            .map(|def| {
                definitions
                    .iter()
                    .enumerate()
                    .filter(|(_, other)| def.crossing_with(other).is_some())
                    .map(|(id, _)| id)
                    .collect()
            })
            .collect();
        let slots = definitions
            .into_iter()
            .map(|definition| SlotState { definition, assigned: false })
            .collect();

        Ok(Self { width, height, cells, slots, connections })
    }

    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// All slot ids, in deterministic extraction order.
    pub fn slot_ids(&self) -> impl Iterator<Item = SlotId> {
        0..self.slots.len()
    }

    #[must_use]
    pub fn definition(&self, slot: SlotId) -> &SlotDefinition {
        &self.slots[slot].definition
    }

    /// Ids of the slots sharing at least one cell with `slot`.
    #[must_use]
    pub fn connected(&self, slot: SlotId) -> &[SlotId] {
        &self.connections[slot]
    }

    /// Index of the shared cell within `a` and within `b`, if the slots cross.
    #[must_use]
    pub fn crossing(&self, a: SlotId, b: SlotId) -> Option<(usize, usize)> {
        self.slots[a].definition.crossing_with(&self.slots[b].definition)
    }

    #[must_use]
    pub fn is_assigned(&self, slot: SlotId) -> bool {
        self.slots[slot].assigned
    }

    /// The word held by `slot`, if it has been assigned one.
    ///
    /// # Panics
    ///
    /// Panics if an assigned slot contains an empty cell; assignment always
    /// writes every cell, so that state is unreachable without a defect.
    #[must_use]
    pub fn value(&self, slot: SlotId) -> Option<String> {
        let state = &self.slots[slot];
        if !state.assigned {
            return None;
        }
        let word = (0..state.definition.len())
            .map(|i| {
                self.cell(state.definition.cell(i))
                    .value()
                    .unwrap_or_else(|| panic!("blank cell inside assigned slot {slot}"))
            })
            .collect();
        Some(word)
    }

    /// The slot's current letter pattern: one character per cell, `' '` where
    /// the cell is still open.
    #[must_use]
    pub fn pattern(&self, slot: SlotId) -> String {
        let definition = &self.slots[slot].definition;
        (0..definition.len())
            .map(|i| self.cell(definition.cell(i)).value().unwrap_or(' '))
            .collect()
    }

    /// Whether `word` fits the slot: same length, and every already-fixed cell
    /// agrees with the corresponding character.
    #[must_use]
    pub fn is_compatible(&self, slot: SlotId, word: &str) -> bool {
        let definition = &self.slots[slot].definition;
        definition.len() == word.len()
            && word.chars().enumerate().all(|(i, c)| {
                match self.cell(definition.cell(i)).value() {
                    Some(fixed) => fixed == c,
                    None => true,
                }
            })
    }

    /// Percentage (0–100) of the slot's cells not yet fixed by any letter.
    /// 0 means fully constrained, 100 fully free.
    #[must_use]
    pub fn empty_cell_ratio(&self, slot: SlotId) -> u32 {
        let definition = &self.slots[slot].definition;
        let empty = (0..definition.len())
            .filter(|&i| self.cell(definition.cell(i)).value().is_none())
            .count();
        (empty * 100 / definition.len()) as u32
    }

    /// Writes `word` into the slot and marks it assigned.
    ///
    /// The caller checks compatibility beforehand; this method only asserts
    /// the length invariant.
    pub fn assign(&mut self, slot: SlotId, word: &str) {
        let definition = self.slots[slot].definition;
        assert!(
            definition.len() == word.len(),
            "word length {} does not match slot {slot} length {}",
            word.len(),
            definition.len()
        );
        for (i, c) in word.chars().enumerate() {
            self.cell_mut(definition.cell(i)).set(c);
        }
        self.slots[slot].assigned = true;
    }

    /// Clears the slot and returns the word it held.
    ///
    /// Cells shared with an assigned crossing slot keep their letter, so a
    /// neighbour is never unassigned by side effect.
    ///
    /// # Panics
    ///
    /// Panics if the slot holds no value, a programming error in the caller.
    pub fn unassign(&mut self, slot: SlotId) -> String {
        let value = self
            .value(slot)
            .unwrap_or_else(|| panic!("illegal unassignment of slot {slot}: no value"));

        let definition = self.slots[slot].definition;
        let kept: SmallVec<[usize; 8]> = self.connections[slot]
            .iter()
            .filter(|&&other| self.slots[other].assigned)
            .filter_map(|&other| definition.crossing_with(&self.slots[other].definition))
            .map(|(index_in_self, _)| index_in_self)
            .collect();
        for i in 0..definition.len() {
            if !kept.contains(&i) {
                self.cell_mut(definition.cell(i)).reset();
            }
        }
        self.slots[slot].assigned = false;
        value
    }

    /// Every filled cell (pre-filled or solver-written) with its letter.
    #[must_use]
    pub fn filled_cells(&self) -> HashMap<Pos, char> {
        let mut filled = HashMap::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Pos::new(x, y);
                if let Some(c) = self.cell(pos).value() {
                    filled.insert(pos, c);
                }
            }
        }
        filled
    }

    /// Number of cells that can receive a letter (everything not shaded).
    #[must_use]
    pub fn fillable_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| !matches!(c, Cell::Shaded)).count()
    }

    fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.y * self.width + pos.x]
    }

    fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        &mut self.cells[pos.y * self.width + pos.x]
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            write!(f, "|")?;
            for x in 0..self.width {
                match self.cell(Pos::new(x, y)) {
                    Cell::Shaded => write!(f, "#|")?,
                    Cell::Empty => write!(f, " |")?,
                    Cell::Prefilled(c) | Cell::Letter(c) => write!(f, "{c}|")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Extracts every maximal run of at least two open cells, across slots first
/// (top to bottom), then down slots (left to right). The order is part of the
/// determinism contract: slot ids must not depend on hashing.
fn extract_slots(puzzle: &PuzzleDefinition) -> Vec<SlotDefinition> {
    let mut slots = Vec::new();
    for y in 0..puzzle.height() {
        let shaded = |x: usize| puzzle.is_shaded(Pos::new(x, y));
        for (start, end) in open_runs(puzzle.width(), shaded) {
            slots.push(SlotDefinition { orientation: Orientation::Across, offset: y, start, end });
        }
    }
    for x in 0..puzzle.width() {
        let shaded = |y: usize| puzzle.is_shaded(Pos::new(x, y));
        for (start, end) in open_runs(puzzle.height(), shaded) {
            slots.push(SlotDefinition { orientation: Orientation::Down, offset: x, start, end });
        }
    }
    slots
}

/// Maximal runs of non-shaded indices in `0..len`, keeping only runs of two
/// cells or more.
fn open_runs(len: usize, shaded: impl Fn(usize) -> bool) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for i in 0..=len {
        let open = i < len && !shaded(i);
        match (start, open) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                if i - s >= 2 {
                    runs.push((s, i));
                }
                start = None;
            }
            _ => {}
        }
    }
    runs
}
