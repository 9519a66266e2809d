use anyhow::{Context, Result};
use cascade_grid::config::EngineConfig;
use cascade_grid::engine::{CascadeEngine, Outcome};
use cascade_grid::moves::find_legal_swaps;
use cascade_grid::source::RandomSource;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    author,
    version,
    about = "Plays seeded games with the first legal swap and reports scores",
    long_about = None
)]
struct Args {
    /// Number of games to play
    #[clap(short, long, default_value_t = 20)]
    games: u64,

    /// Seed of the first game; game i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Stop a game after this many swaps
    #[clap(short, long, default_value_t = 200)]
    max_moves: u32,

    /// JSON engine config
    #[clap(short, long)]
    config: Option<PathBuf>,
}

struct GameStats {
    score: u32,
    moves: u32,
    longest_cascade: usize,
}

fn play_one(config: &EngineConfig, seed: u64, max_moves: u32) -> Result<GameStats> {
    let source = RandomSource::new(seed, config.palette_size);
    let mut engine = CascadeEngine::new(config.clone(), source)?;
    let mut stats = GameStats {
        score: 0,
        moves: 0,
        longest_cascade: 0,
    };

    while stats.moves < max_moves {
        let Some(&(a, b)) = find_legal_swaps(engine.board()).first() else {
            break;
        };
        match engine.attempt_swap(a, b)? {
            Outcome::Resolved { passes, .. } => {
                stats.longest_cascade = stats.longest_cascade.max(passes);
            }
            Outcome::Rejected => {
                anyhow::bail!("swap {:?} <-> {:?} was listed as legal but rejected", a, b);
            }
        }
        stats.moves += 1;
    }
    stats.score = engine.score();
    Ok(stats)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };

    println!("Playing {} games...", args.games);

    let mut scores = Vec::new();
    for game_idx in 0..args.games {
        let seed = args.seed + game_idx;
        let stats = play_one(&config, seed, args.max_moves)
            .with_context(|| format!("Game with seed {} failed", seed))?;
        info!(seed, score = stats.score, moves = stats.moves, "game finished");
        println!(
            "  Seed: {:<6} Score: {:<8} Moves: {:<4} Longest cascade: {}",
            seed, stats.score, stats.moves, stats.longest_cascade
        );
        scores.push(stats.score);
    }

    println!("\n--- Evaluation Complete ---");
    if scores.is_empty() {
        println!("No games played.");
    } else {
        let total: u64 = scores.iter().map(|&s| s as u64).sum();
        let avg = total as f64 / scores.len() as f64;
        println!("Average Score = {:.2}", avg);
        println!("Best Score = {}", scores.iter().max().copied().unwrap_or(0));
    }
    Ok(())
}
