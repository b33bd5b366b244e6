use std::error::Error;
use std::fs;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use crossfill::backtrack::BacktrackStrategy;
use crossfill::dictionary::WordList;
use crossfill::puzzle::{Pos, PuzzleDefinition};
use crossfill::solver::Solver;

/// crossfill grid filler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the grid layout file ('#' shaded, '.' empty, letters pre-filled)
    grid: String,

    /// Path to the word list file (one word per line, optional ';score' suffix)
    #[arg(short, long)]
    words: String,

    /// Backtracking strategy
    #[arg(short, long, value_enum, default_value_t = StrategyArg::Dynamic)]
    backtrack: StrategyArg,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StrategyArg {
    Simple,
    Dynamic,
    Backjump,
}

impl From<StrategyArg> for BacktrackStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Simple => BacktrackStrategy::Simple,
            StrategyArg::Dynamic => BacktrackStrategy::Dynamic,
            StrategyArg::Backjump => BacktrackStrategy::Backjump,
        }
    }
}

fn main() -> ExitCode {
    let debug_enabled = std::env::var("CROSSFILL_DEBUG").is_ok();
    crossfill::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        eprintln!("Error: {e}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let layout = fs::read_to_string(&cli.grid)?;
    let puzzle = parse_layout(&layout)?;
    let words = WordList::parse(&fs::read_to_string(&cli.words)?);
    log::info!("Loaded {} words", words.len());

    let start = Instant::now();
    let result = Solver::new().with_strategy(cli.backtrack.into()).solve(&puzzle, &words)?;
    log::info!("Solved in {:?}", start.elapsed());

    println!("{result}");
    Ok(())
}

/// Parses a grid layout: one line per row, `#` for a shaded cell, `.` for an
/// open one, a letter for a pre-filled cell. All rows must have the same
/// width.
fn parse_layout(text: &str) -> Result<PuzzleDefinition, Box<dyn Error>> {
    let rows: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.chars().count());

    let mut puzzle = PuzzleDefinition::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        if row.chars().count() != width {
            return Err(format!("row {y} has {} cells, expected {width}", row.chars().count()).into());
        }
        for (x, c) in row.chars().enumerate() {
            let pos = Pos::new(x, y);
            puzzle = match c {
                '#' => puzzle.shade(pos),
                '.' => puzzle,
                c if c.is_ascii_alphabetic() => puzzle.prefill(pos, c.to_ascii_uppercase()),
                other => return Err(format!("unexpected character {other:?} at {pos}").into()),
            };
        }
    }
    puzzle.validate()?;
    Ok(puzzle)
}
