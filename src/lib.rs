//! # Cascade Grid
//!
//! The state-mutation engine of a tile-matching puzzle: a grid of typed tokens where
//! a swap that lines up `min_run` or more equal tokens destroys them, lets the tokens
//! above fall, refills the gaps, and keeps resolving chained matches until the board
//! is stable.
//!
//! It is used by two binaries:
//! - `human_player`: interactive play on the command line.
//! - `auto_player`: plays seeded games automatically and reports scores.
//!
//! ## Modules
//! - `token`: token types (`Token`).
//! - `board`: the grid (`Board`, `Cell`) with swap/undo, run detection, collapse and refill.
//! - `matches`: result types (`MatchSet`, `CollapseResult`, `Refill`).
//! - `source`: token sources and initial population.
//! - `engine`: the cascade loop (`CascadeEngine`), whole-swap and stepped.
//! - `moves`: legal swap search for hints and automated play.
//! - `input`: a press/drag gesture tracker for input adapters.
//! - `config`: engine constants (`EngineConfig`).
//! - `error`: the shared error type (`EngineError`).
//! - `utils`: parsing boards from text.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod matches;
pub mod moves;
pub mod source;
pub mod token;
pub mod utils;
