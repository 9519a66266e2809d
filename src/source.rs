//! Token sources used to populate and refill the board.
//!
//! The engine never decides which token appears next; it asks a [`TokenSource`].
//! A source may apply its own policy (for example avoiding immediate re-matches),
//! and the cascade loop terminates correctly whether or not it does.
use crate::board::{Board, Coord};
use crate::error::EngineError;
use crate::token::Token;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::collections::VecDeque;

/// Candidate tokens `populate` tries for one cell before reporting the cell as unsatisfiable.
const MAX_PLACEMENT_ATTEMPTS: usize = 64;

/// Supplies a token for an empty cell.
///
/// `board` is the state at the time of the request, with `coord` still empty.
pub trait TokenSource {
    fn next_token(&mut self, board: &Board, coord: Coord) -> Result<Token, EngineError>;
}

/// Random tokens from a fixed palette, deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct RandomSource {
    rng: SmallRng,
    palette: &'static [Token],
    avoid_matches: bool,
}

impl RandomSource {
    /// Creates a source drawing from the first `palette_size` token types.
    /// A size of zero is treated as one.
    pub fn new(seed: u64, palette_size: usize) -> Self {
        RandomSource {
            rng: SmallRng::seed_from_u64(seed),
            palette: Token::palette(palette_size.max(1)),
            avoid_matches: false,
        }
    }

    /// When enabled, tokens that would immediately complete a run are excluded from
    /// the draw. If every palette entry would complete one, the draw is unrestricted.
    pub fn with_avoid_matches(mut self, avoid_matches: bool) -> Self {
        self.avoid_matches = avoid_matches;
        self
    }

    pub fn palette(&self) -> &[Token] {
        self.palette
    }
}

impl TokenSource for RandomSource {
    fn next_token(&mut self, board: &Board, coord: Coord) -> Result<Token, EngineError> {
        if self.avoid_matches {
            let allowed: Vec<Token> = self
                .palette
                .iter()
                .copied()
                .filter(|&t| !board.would_complete_run(coord, t))
                .collect();
            if !allowed.is_empty() {
                return Ok(Token::random_from(&allowed, &mut self.rng));
            }
        }
        Ok(Token::random_from(self.palette, &mut self.rng))
    }
}

/// A fixed queue of tokens handed out in order. Fails once empty.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    queue: VecDeque<Token>,
}

impl ScriptedSource {
    pub fn new<I: IntoIterator<Item = Token>>(tokens: I) -> Self {
        ScriptedSource {
            queue: tokens.into_iter().collect(),
        }
    }

    /// A source that is exhausted from the start.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a script from token letters, e.g. `"RGBY"`.
    ///
    /// # Examples
    /// ```
    /// use cascade_grid::source::ScriptedSource;
    /// let source = ScriptedSource::from_chars("RGB").unwrap();
    /// assert_eq!(source.remaining(), 3);
    /// assert!(ScriptedSource::from_chars("R.B").is_err());
    /// ```
    pub fn from_chars(letters: &str) -> Result<Self, EngineError> {
        let tokens = letters
            .chars()
            .map(|ch| {
                Token::from_char(ch)
                    .ok_or_else(|| EngineError::Parse(format!("unknown token letter '{}'", ch)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(tokens))
    }

    pub fn push(&mut self, token: Token) {
        self.queue.push_back(token);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TokenSource for ScriptedSource {
    fn next_token(&mut self, _board: &Board, coord: Coord) -> Result<Token, EngineError> {
        self.queue
            .pop_front()
            .ok_or_else(|| EngineError::exhausted(coord))
    }
}

/// Fills every cell of `board` exactly once, row by row, so that no run of
/// `min_run` exists when it finishes.
///
/// Each candidate is compared only with the `min_run - 1` cells placed just before
/// it to the left and just above it; a candidate equal to all of them in either
/// direction is drawn again.
///
/// The board is cleared first. Source errors are propagated.
pub fn populate(board: &mut Board, source: &mut dyn TokenSource) -> Result<(), EngineError> {
    board.clear();
    let lookback = board.min_run().saturating_sub(1);

    for row in 0..board.rows() {
        for col in 0..board.columns() {
            let mut attempts = 0;
            loop {
                let token = source.next_token(board, (row, col))?;
                let left = lookback > 0
                    && col >= lookback
                    && (1..=lookback).all(|k| board.token_at((row, col - k)) == Some(token));
                let above = lookback > 0
                    && row >= lookback
                    && (1..=lookback).all(|k| board.token_at((row - k, col)) == Some(token));
                if !left && !above {
                    board.set_token((row, col), Some(token));
                    break;
                }
                attempts += 1;
                if attempts >= MAX_PLACEMENT_ATTEMPTS {
                    return Err(EngineError::UnsatisfiablePlacement { row, column: col });
                }
            }
        }
    }
    Ok(())
}
