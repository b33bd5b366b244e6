//! crossfill, a backtracking crossword grid filler.
//!
//! Give it a puzzle definition (dimensions, shaded cells, optional
//! pre-filled letters) and a word dictionary; it finds an assignment of
//! words to slots where every crossing agrees, or proves none exists. The
//! search combines minimum-remaining-values variable ordering,
//! lookahead-guided value selection and dynamic backtracking with
//! reason-tracked no-good elimination.

pub mod backtrack;
pub mod cache;
pub mod dictionary;
pub mod elimination;
pub mod grid;
pub mod history;
pub mod instantiation;
pub mod iteration;
pub mod listener;
pub mod log;
pub mod lookahead;
pub mod puzzle;
pub mod result;
pub mod solver;
