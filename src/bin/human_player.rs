use anyhow::{Context, Result};
use cascade_grid::config::EngineConfig;
use cascade_grid::engine::{CascadeEngine, CascadeObserver, Outcome};
use cascade_grid::input::GestureTracker;
use cascade_grid::matches::CollapseResult;
use cascade_grid::moves::{find_legal_swaps, has_legal_swap};
use cascade_grid::source::RandomSource;
use cascade_grid::token::Token;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Seed for board generation and refills
    #[clap(short, long, default_value_t = 514514)]
    seed: u64,

    /// JSON engine config; command line sizes override it
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Number of rows
    #[clap(long)]
    rows: Option<usize>,

    /// Number of columns
    #[clap(long)]
    columns: Option<usize>,

    /// Refill without creating immediate matches
    #[clap(long)]
    avoid_matches: bool,
}

/// Prints what each cascade pass did.
struct PassPrinter {
    pass: usize,
}

impl CascadeObserver for PassPrinter {
    fn on_destroy(&mut self, destroyed: &[((usize, usize), Token)]) {
        self.pass += 1;
        let letters: String = destroyed.iter().map(|(_, t)| t.to_char()).collect();
        println!("  pass {}: cleared {} ({})", self.pass, destroyed.len(), letters);
    }

    fn on_settle(
        &mut self,
        collapse: &CollapseResult,
        refill: &CollapseResult,
        max_distance: usize,
    ) {
        println!(
            "  {} fell, {} refilled, longest drop {}",
            collapse.affected.len(),
            refill.affected.len(),
            max_distance
        );
    }

    fn on_score(&mut self, delta: u32, total: u32) {
        println!("  +{} (total {})", delta, total);
    }
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(columns) = args.columns {
        config.columns = columns;
    }
    config.validate()?;
    Ok(config)
}

fn parse_numbers(input: &str) -> Option<Vec<usize>> {
    input
        .split_whitespace()
        .map(|part| part.parse::<usize>().ok())
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let source =
        RandomSource::new(args.seed, config.palette_size).with_avoid_matches(args.avoid_matches);
    let mut engine = CascadeEngine::new(config, source).context("Failed to set up the board")?;
    let mut tracker = GestureTracker::new();
    let mut highlight = Vec::new();

    println!("Welcome to Cascade Grid!");

    loop {
        println!("---------------------");
        println!("Score: {}", engine.score());
        println!("{}", engine.board().to_string_with_highlight(&highlight));
        highlight.clear();

        if !has_legal_swap(engine.board()) {
            println!();
            println!("---------------------");
            println!("No moves left!");
            println!("Final Score: {}", engine.score());
            println!("---------------------");
            break;
        }

        print!("Enter a swap (r1 c1 r2 c2), 'h' for a hint, 'r' to restart, 'q' to quit: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "q" => {
                println!("Thanks for playing!");
                break;
            }
            "h" => {
                if let Some(&(a, b)) = find_legal_swaps(engine.board()).first() {
                    println!("Try swapping {:?} with {:?}.", a, b);
                    highlight = vec![a, b];
                }
                continue;
            }
            "r" => {
                engine.restart()?;
                println!("New board.");
                continue;
            }
            other => {
                let Some(numbers) = parse_numbers(other).filter(|n| n.len() == 4) else {
                    println!("Invalid input format. Use 'r1 c1 r2 c2', 'h', 'r', or 'q'.");
                    continue;
                };
                let from = (numbers[0], numbers[1]);
                let to = (numbers[2], numbers[3]);

                tracker.press(from);
                let Some((a, b)) = tracker.drag(to) else {
                    tracker.release();
                    println!("Cells {:?} and {:?} are not neighbours.", from, to);
                    continue;
                };

                let mut printer = PassPrinter { pass: 0 };
                match engine.attempt_swap_observed(a, b, &mut printer) {
                    Ok(Outcome::Rejected) => println!("No match, swap undone."),
                    Ok(Outcome::Resolved {
                        score_gained,
                        passes,
                        ..
                    }) => println!("Scored {} over {} pass(es).", score_gained, passes),
                    Err(err) => println!("Invalid move: {}", err),
                }
                tracker.finish_update();
            }
        }
    }

    Ok(())
}
