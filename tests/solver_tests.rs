//! End-to-end tests for the crossword filler.
//!
//! These tests drive the complete pipeline from a puzzle definition through
//! the search to the final result, using small hand-checked word lists so
//! every outcome is deterministic.

use std::fs;

use crossfill::backtrack::BacktrackStrategy;
use crossfill::dictionary::WordList;
use crossfill::grid::SlotId;
use crossfill::listener::ProgressListener;
use crossfill::puzzle::{Pos, PuzzleDefinition};
use crossfill::result::{SolverResult, SolverResultKind};
use crossfill::solver::{CancellationToken, Solver};

/// Records every listener callback in order.
#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl ProgressListener for Recorder {
    fn on_initialisation_start(&mut self) {
        self.events.push("init start".into());
    }

    fn on_initialisation_end(&mut self) {
        self.events.push("init end".into());
    }

    fn on_solver_progress(&mut self, percent: u8) {
        self.events.push(format!("progress {percent}"));
    }

    fn on_assignment(&mut self, slot: SlotId, word: &str) {
        self.events.push(format!("assign {slot} {word}"));
    }

    fn on_unassignment(&mut self, slot: SlotId, word: &str) {
        self.events.push(format!("unassign {slot} {word}"));
    }
}

/// Cancels its token as soon as the first word is placed.
struct CancelOnFirstAssignment {
    token: CancellationToken,
}

impl ProgressListener for CancelOnFirstAssignment {
    fn on_assignment(&mut self, _slot: SlotId, _word: &str) {
        self.token.cancel();
    }
}

/// Reads a filled word back out of the result, left to right.
fn row_word(result: &SolverResult, y: usize, width: usize) -> String {
    (0..width)
        .map(|x| result.filled_cells[&Pos::new(x, y)])
        .collect()
}

/// Reads a filled word back out of the result, top to bottom.
fn column_word(result: &SolverResult, x: usize, height: usize) -> String {
    (0..height)
        .map(|y| result.filled_cells[&Pos::new(x, y)])
        .collect()
}

fn small_word_list() -> WordList {
    WordList::new(["AAA", "ABC", "ABD", "ABE", "BBB", "CDE"])
}

mod open_grid {
    use super::*;

    #[test]
    fn fills_a_three_by_three_grid_completely() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = small_word_list();

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert_eq!(result.kind, SolverResultKind::Success);
        assert!(result.is_success());
        assert_eq!(result.filled_cells.len(), 9);
        assert!(result.unsolvable_cells.is_empty());
        assert!(result.statistics.assignments >= 6);
    }

    #[test]
    fn every_row_and_column_is_a_dictionary_word() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = small_word_list();
        let allowed = ["AAA", "ABC", "ABD", "ABE", "BBB", "CDE"];

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert!(result.is_success());
        for i in 0..3 {
            assert!(allowed.contains(&row_word(&result, i, 3).as_str()));
            assert!(allowed.contains(&column_word(&result, i, 3).as_str()));
        }
    }

    #[test]
    fn loads_a_word_list_file_and_solves() {
        let contents = fs::read_to_string("tests/fixtures/lexicon.txt")
            .expect("failed to read lexicon fixture");
        let words = WordList::parse(&contents);
        let puzzle = PuzzleDefinition::new(3, 3);

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert!(result.is_success());
        assert_eq!(result.filled_cells.len(), 9);
    }
}

mod shaded_and_prefilled {
    use super::*;

    #[test]
    fn shaded_cells_split_runs_and_stay_unfilled() {
        let puzzle = PuzzleDefinition::new(4, 4)
            .shade(Pos::new(1, 1))
            .shade(Pos::new(2, 2));
        let words = WordList::new(["AAAA", "AA"]);

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert!(result.is_success());
        assert_eq!(result.filled_cells.len(), 14);
        assert!(!result.filled_cells.contains_key(&Pos::new(1, 1)));
        assert!(!result.filled_cells.contains_key(&Pos::new(2, 2)));
    }

    #[test]
    fn prefilled_letters_constrain_the_whole_fill() {
        // A single prefilled B rules out every word not starting with B in
        // the first row and column, which cascades to an all-B fill.
        let puzzle = PuzzleDefinition::new(3, 3).prefill(Pos::new(0, 0), 'B');
        let words = WordList::new(["AAA", "BBB", "ABC"]);

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert!(result.is_success());
        assert_eq!(result.filled_cells.len(), 9);
        assert!(result.filled_cells.values().all(|&letter| letter == 'B'));
    }
}

mod impossible_grids {
    use super::*;

    #[test]
    fn empty_dictionary_is_reported_impossible() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = WordList::new(Vec::<&str>::new());

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert_eq!(result.kind, SolverResultKind::Impossible);
        assert!(result.filled_cells.is_empty());
        assert_eq!(result.unsolvable_cells.len(), 9);
        assert_eq!(result.statistics.assignments, 0);
    }

    /// A 4x2 grid whose first column can never spell a two-letter word: the
    /// search places one row, retracts it, exhausts the other and proves
    /// the grid impossible.
    #[test]
    fn detects_impossibility_after_retracting_a_placement() {
        let puzzle = PuzzleDefinition::new(4, 2);
        let words = WordList::new(["AAAA", "ABBB", "AB", "AC"]);

        let result = Solver::new().solve(&puzzle, &words).unwrap();

        assert_eq!(result.kind, SolverResultKind::Impossible);
        assert_eq!(result.statistics.assignments, 1);
        assert_eq!(result.statistics.unassignments, 1);
        assert!(result.filled_cells.is_empty());
        assert_eq!(result.unsolvable_cells.len(), 8);
    }

    #[test]
    fn all_strategies_agree_on_impossibility() {
        for strategy in [
            BacktrackStrategy::Simple,
            BacktrackStrategy::Dynamic,
            BacktrackStrategy::Backjump,
        ] {
            let puzzle = PuzzleDefinition::new(4, 2);
            let words = WordList::new(["AAAA", "ABBB", "AB", "AC"]);

            let result = Solver::new()
                .with_strategy(strategy)
                .solve(&puzzle, &words)
                .unwrap();

            assert_eq!(result.kind, SolverResultKind::Impossible, "{strategy:?}");
            assert_eq!(result.statistics.unassignments, 1, "{strategy:?}");
        }
    }
}

mod determinism {
    use super::*;

    #[test]
    fn identical_runs_produce_identical_fills_and_events() {
        let run = || {
            let puzzle = PuzzleDefinition::new(3, 3);
            let words = small_word_list();
            let mut recorder = Recorder::default();
            let result = Solver::new()
                .with_listener(&mut recorder)
                .solve(&puzzle, &words)
                .unwrap();
            (result.filled_cells, recorder.events)
        };

        let (first_fill, first_events) = run();
        let (second_fill, second_events) = run();

        assert_eq!(first_fill, second_fill);
        assert_eq!(first_events, second_events);
    }

    #[test]
    fn listeners_observe_initialisation_and_final_progress() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = small_word_list();
        let mut recorder = Recorder::default();

        let result = Solver::new()
            .with_listener(&mut recorder)
            .solve(&puzzle, &words)
            .unwrap();

        assert!(result.is_success());
        assert_eq!(recorder.events[0], "init start");
        assert_eq!(recorder.events[1], "init end");
        assert_eq!(recorder.events.last().unwrap(), "progress 100");
        let assignments = recorder
            .events
            .iter()
            .filter(|event| event.starts_with("assign "))
            .count() as u64;
        assert_eq!(assignments, result.statistics.assignments);
    }
}

mod cancellation {
    use super::*;

    #[test]
    fn cancelling_before_the_first_iteration_places_nothing() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = small_word_list();
        let token = CancellationToken::new();
        token.cancel();

        let result = Solver::new()
            .with_cancellation(token)
            .solve(&puzzle, &words)
            .unwrap();

        assert_eq!(result.kind, SolverResultKind::Cancelled);
        assert!(result.filled_cells.is_empty());
        assert_eq!(result.statistics.assignments, 0);
    }

    #[test]
    fn cancelling_mid_search_keeps_the_partial_fill() {
        let puzzle = PuzzleDefinition::new(3, 3);
        let words = small_word_list();
        let token = CancellationToken::new();
        let mut canceller = CancelOnFirstAssignment {
            token: token.clone(),
        };

        let result = Solver::new()
            .with_listener(&mut canceller)
            .with_cancellation(token)
            .solve(&puzzle, &words)
            .unwrap();

        assert_eq!(result.kind, SolverResultKind::Cancelled);
        assert_eq!(result.statistics.assignments, 1);
        // One three-letter word was placed before the stop took effect.
        assert_eq!(result.filled_cells.len(), 3);
    }
}
