#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives Alchemy Grid headlessly.

mod moves;

use std::{fs, path::PathBuf};

use alchemy_grid_core::{Catalog, Command, ElementId, Event};
use alchemy_grid_system_effects::EffectTuning;
use alchemy_grid_system_logic_puzzle::LogicPuzzle;
use alchemy_grid_system_word_puzzle::{self as word_puzzle, HintTier, LetterFeedback, PuzzleStatus, Theme};
use alchemy_grid_world::{self as world, query, World};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use moves::PlacementArg;

const DEFAULT_LOGIC_SIZE: usize = 4;

#[derive(Debug, Parser)]
#[command(name = "alchemy-grid", version, about = "Place elements, trigger reactions, solve puzzles.")]
struct Cli {
    /// Seed for every random decision; a fresh one is drawn when omitted.
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// TOML file replacing the builtin element catalog.
    #[arg(long, global = true, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Print machine-readable JSON instead of text.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Mode,
}

#[derive(Debug, Subcommand)]
enum Mode {
    /// Place elements on a board and report what happened.
    Play {
        /// Board rows.
        #[arg(long, default_value_t = 8)]
        rows: u32,
        /// Board columns.
        #[arg(long, default_value_t = 8)]
        columns: u32,
        /// Placements written as `element@row,column`, applied in order.
        placements: Vec<PlacementArg>,
    },
    /// Generate a word puzzle and score guesses against it.
    Word {
        /// Level controlling word length and attempts.
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Theme to draw from instead of the level's theme.
        #[arg(long)]
        theme: Option<Theme>,
        /// Print every hint tier.
        #[arg(long)]
        hints: bool,
        /// Guesses in the order they are submitted.
        guesses: Vec<String>,
    },
    /// Generate a logic puzzle and print it with its solution.
    Logic {
        /// Level controlling how many cells are emptied.
        #[arg(long, default_value_t = 1)]
        level: u32,
        /// Board side: 4, 6 or 9.
        #[arg(long, default_value_t = DEFAULT_LOGIC_SIZE)]
        size: usize,
    },
}

/// Entry point for the Alchemy Grid command-line interface.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let seed = cli.seed.unwrap_or_else(|| rand::thread_rng().gen());
    info!("using seed {seed}");

    match cli.command {
        Mode::Play {
            rows,
            columns,
            placements,
        } => {
            let catalog = load_catalog(cli.catalog.as_ref())?;
            play(catalog, seed, rows, columns, &placements, cli.json)
        }
        Mode::Word {
            level,
            theme,
            hints,
            guesses,
        } => word(seed, level, theme, hints, &guesses, cli.json),
        Mode::Logic { level, size } => logic(seed, level, size, cli.json),
    }
}

fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let document = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    Catalog::from_toml_str(&document)
        .with_context(|| format!("failed to load catalog {}", path.display()))
}

#[derive(Debug, Serialize)]
struct PlayReport {
    seed: u64,
    events: Vec<Event>,
    board: String,
    score: u64,
}

fn play(
    catalog: Catalog,
    seed: u64,
    rows: u32,
    columns: u32,
    placements: &[PlacementArg],
    json: bool,
) -> Result<()> {
    let mut world = World::with_config(catalog, EffectTuning::default(), seed);
    let mut events = Vec::new();
    world::apply(&mut world, Command::ConfigureBoard { rows, columns }, &mut events);
    if let Some(Event::BoardRejected { reason, .. }) = events.first() {
        bail!("cannot play on a {rows}x{columns} board: {reason}");
    }
    for placement in placements {
        world::apply(
            &mut world,
            Command::PlaceElement {
                cell: placement.cell,
                element: placement.element,
            },
            &mut events,
        );
    }

    let report = PlayReport {
        seed,
        events,
        board: query::grid(&world).render(),
        score: query::score(&world),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", query::welcome_banner(&world));
    for event in &report.events {
        println!("{}", describe(event));
    }
    print!("{}", report.board);
    println!("score: {}", report.score);
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::BoardConfigured { rows, columns } => format!("board {rows}x{columns}"),
        Event::BoardRejected {
            rows,
            columns,
            reason,
        } => format!("rejected board {rows}x{columns}: {reason}"),
        Event::PlacementRejected {
            cell,
            element,
            reason,
        } => format!("rejected {element} at ({}, {}): {reason}", cell.row(), cell.column()),
        Event::ElementPlaced { cell, element } => {
            format!("placed {element} at ({}, {})", cell.row(), cell.column())
        }
        Event::ReactionOccurred {
            first,
            second,
            result,
            score,
            position,
        } => format!(
            "  {first} + {second} -> {result} at ({}, {}) +{score}",
            position.row(),
            position.column()
        ),
        Event::EffectApplied { effect } => format!("  effect {effect:?}"),
        Event::ElementDiscovered { element } => format!("  discovered {element}"),
        Event::PatternMatched { kind, score, .. } => {
            format!("  pattern {} +{score}", kind.as_str())
        }
        Event::ScoreChanged { delta, score } => format!("  score +{delta} = {score}"),
        Event::PuzzleRecorded { puzzle } => format!("puzzle {puzzle:?} solved"),
        Event::ObjectiveCompleted { objective, points } => {
            format!("  objective {} completed +{points}", objective.get())
        }
        Event::LevelAdvanced { level } => format!("level {level}"),
    }
}

#[derive(Debug, Serialize)]
struct WordReport {
    seed: u64,
    theme: Theme,
    level: u32,
    letters: usize,
    max_attempts: u32,
    guesses: Vec<GuessReport>,
    rejected: Vec<String>,
    status: PuzzleStatus,
    hints: Vec<String>,
    target: Option<String>,
}

#[derive(Debug, Serialize)]
struct GuessReport {
    guess: String,
    feedback: Vec<LetterFeedback>,
}

fn word(
    seed: u64,
    level: u32,
    theme: Option<Theme>,
    hints: bool,
    guesses: &[String],
    json: bool,
) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut puzzle = word_puzzle::generate(level, theme, &mut rng);

    let mut rejected = Vec::new();
    for guess in guesses {
        if let Err(error) = puzzle.submit(guess) {
            warn!("guess '{guess}' rejected: {error}");
            rejected.push(error.to_string());
        }
    }

    let finished = puzzle.status() != PuzzleStatus::InProgress;
    let report = WordReport {
        seed,
        theme: puzzle.theme(),
        level: puzzle.level(),
        letters: puzzle.target().len(),
        max_attempts: puzzle.max_attempts(),
        guesses: puzzle
            .guesses()
            .iter()
            .map(|(guess, feedback)| GuessReport {
                guess: guess.clone(),
                feedback: feedback.clone(),
            })
            .collect(),
        rejected,
        status: puzzle.status(),
        hints: if hints {
            [HintTier::First, HintTier::Second, HintTier::Third]
                .map(|tier| puzzle.hint(tier))
                .to_vec()
        } else {
            Vec::new()
        },
        target: finished.then(|| puzzle.target().to_owned()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "theme {}, {} letters, {} attempts",
        report.theme, report.letters, report.max_attempts
    );
    for guess in &report.guesses {
        let row: String = guess.feedback.iter().map(|f| f.symbol()).collect();
        println!("{} {row}", guess.guess);
    }
    for error in &report.rejected {
        println!("rejected: {error}");
    }
    for hint in &report.hints {
        println!("hint: {hint}");
    }
    match report.status {
        PuzzleStatus::InProgress => println!("{} attempts left", puzzle.attempts_left()),
        PuzzleStatus::Solved => println!("solved"),
        PuzzleStatus::Failed => println!("failed, the word was {}", puzzle.target()),
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct LogicReport {
    seed: u64,
    size: usize,
    difficulty: f64,
    elements: Vec<ElementId>,
    puzzle: String,
    solution: String,
}

fn logic(seed: u64, level: u32, size: usize, json: bool) -> Result<()> {
    let all = ElementId::ALL;
    let elements = all
        .get(..size)
        .with_context(|| format!("no board of size {size}"))?;
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let puzzle = LogicPuzzle::generate(level, elements, &mut rng)
        .with_context(|| format!("failed to generate a {size}x{size} puzzle"))?;

    let report = LogicReport {
        seed,
        size: puzzle.size(),
        difficulty: puzzle.difficulty(),
        elements: puzzle.valid_elements().to_vec(),
        puzzle: puzzle.puzzle().render(),
        solution: puzzle.solution().render(),
    };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let legend: Vec<String> = report
        .elements
        .iter()
        .map(|element| format!("{}={element}", element.glyph()))
        .collect();
    println!(
        "{size}x{size}, {:.0}% empty, {}",
        report.difficulty * 100.0,
        legend.join(" ")
    );
    print!("{}", report.puzzle);
    println!();
    print!("{}", report.solution);
    Ok(())
}
