//! The cascade engine: swap validation and the destroy → collapse → refill → rescan loop.
//!
//! A host can either resolve a whole swap at once with [`CascadeEngine::attempt_swap`],
//! or drive the cascade one pass at a time with [`CascadeEngine::begin_cascade`],
//! [`CascadeEngine::step`] and [`CascadeEngine::is_stable`], pacing its animation
//! between passes from [`PassReport::max_distance`]. The engine itself never waits.
use crate::board::{are_neighbors, Board, Coord};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::matches::{CollapseResult, MatchSet};
use crate::source::{populate, TokenSource};
use crate::token::Token;
use std::collections::BTreeSet;
use tracing::{debug, instrument, warn};

/// Result of a player swap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The swap formed no run and has been undone. The board is unchanged.
    Rejected,
    /// The swap formed at least one run and the cascade has settled.
    Resolved {
        score_gained: u32,
        passes: usize,
        /// Largest travel distance seen in any pass.
        max_distance: usize,
        /// Cells the token source could not fill that are still empty.
        unfilled: Vec<Coord>,
    },
}

/// Everything that happened in one cascade pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassReport {
    /// The match that was destroyed in this pass.
    pub matched: MatchSet,
    /// Tokens removed from the board, for despawn effects.
    pub destroyed: Vec<(Coord, Token)>,
    pub collapse: CollapseResult,
    pub refill: CollapseResult,
    pub unfilled: Vec<Coord>,
    /// `max(collapse.max_distance, refill.max_distance)`.
    pub max_distance: usize,
    pub score_delta: u32,
    /// Number of cells re-scanned for the next pass.
    pub rescanned: usize,
    /// Whether another pass is pending.
    pub more: bool,
}

/// Presentation hooks called by [`CascadeEngine::attempt_swap_observed`].
///
/// All methods default to doing nothing. They are notifications; the engine does
/// not wait for them.
pub trait CascadeObserver {
    fn on_swap_rejected(&mut self, _a: Coord, _b: Coord) {}
    fn on_destroy(&mut self, _destroyed: &[(Coord, Token)]) {}
    fn on_settle(
        &mut self,
        _collapse: &CollapseResult,
        _refill: &CollapseResult,
        _max_distance: usize,
    ) {
    }
    fn on_score(&mut self, _delta: u32, _total: u32) {}
}

/// An observer that ignores every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl CascadeObserver for NoopObserver {}

/// Owns the board and the token source and resolves player swaps.
///
/// # Examples
/// ```
/// use cascade_grid::config::EngineConfig;
/// use cascade_grid::engine::{CascadeEngine, Outcome};
/// use cascade_grid::source::RandomSource;
///
/// let config = EngineConfig::default();
/// let source = RandomSource::new(42, config.palette_size);
/// let mut engine = CascadeEngine::new(config, source).unwrap();
///
/// match engine.attempt_swap((5, 3), (5, 4)).unwrap() {
///     Outcome::Rejected => println!("no match, board unchanged"),
///     Outcome::Resolved { score_gained, .. } => println!("scored {}", score_gained),
/// }
/// assert!(engine.is_stable());
/// ```
#[derive(Debug)]
pub struct CascadeEngine<S> {
    config: EngineConfig,
    board: Board,
    source: S,
    score: u32,
    pending: Option<MatchSet>,
    passes: usize,
}

impl<S: TokenSource> CascadeEngine<S> {
    /// Creates an engine with a freshly populated board (no initial runs).
    ///
    /// # Arguments
    /// * `config` - Board size, scoring and limits. Validated before use.
    /// * `source` - Supplies tokens for the initial fill and for every refill.
    ///
    /// # Returns
    /// * `Ok(CascadeEngine)` with a full, stable board and a score of zero.
    /// * `Err(EngineError::InvalidConfig)` if `config` fails validation.
    /// * Any error from [`populate`], e.g. `ExhaustedTokenSource` or `UnsatisfiablePlacement`.
    pub fn new(config: EngineConfig, mut source: S) -> Result<Self, EngineError> {
        config.validate()?;
        let mut board = Board::new(config.rows, config.columns, config.min_run);
        populate(&mut board, &mut source)?;
        Ok(CascadeEngine {
            config,
            board,
            source,
            score: 0,
            pending: None,
            passes: 0,
        })
    }

    /// Creates an engine around an existing board.
    ///
    /// The board's dimensions and `min_run` take precedence over those in `config`.
    pub fn with_board(
        mut config: EngineConfig,
        board: Board,
        source: S,
    ) -> Result<Self, EngineError> {
        config.rows = board.rows();
        config.columns = board.columns();
        config.min_run = board.min_run();
        config.validate()?;
        Ok(CascadeEngine {
            config,
            board,
            source,
            score: 0,
            pending: None,
            passes: 0,
        })
    }

    /// The current board, for rendering or inspection.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The active configuration.
    ///
    /// For an engine built with [`CascadeEngine::with_board`], `rows`, `columns` and
    /// `min_run` reflect the adopted board rather than the config passed in.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The token source feeding refills.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Total score accumulated since creation or the last restart.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Passes performed by the current (or most recent) cascade.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// `true` when no cascade pass is pending.
    pub fn is_stable(&self) -> bool {
        self.pending.is_none()
    }

    /// The match the next [`CascadeEngine::step`] will destroy, if any.
    pub fn pending_matches(&self) -> Option<&MatchSet> {
        self.pending.as_ref()
    }

    /// Clears and repopulates the board and resets the score.
    pub fn restart(&mut self) -> Result<(), EngineError> {
        self.pending = None;
        self.passes = 0;
        self.score = 0;
        populate(&mut self.board, &mut self.source)
    }

    /// Swaps `a` and `b` and resolves the full cascade.
    ///
    /// `a` and `b` are expected to be orthogonal neighbours. That is only enforced
    /// when [`EngineConfig::require_adjacent`] is set; identical coordinates are always
    /// accepted and simply rejected.
    pub fn attempt_swap(&mut self, a: Coord, b: Coord) -> Result<Outcome, EngineError> {
        self.attempt_swap_observed(a, b, &mut NoopObserver)
    }

    /// Like [`CascadeEngine::attempt_swap`], notifying `observer` about every pass.
    #[instrument(skip(self, observer))]
    pub fn attempt_swap_observed(
        &mut self,
        a: Coord,
        b: Coord,
        observer: &mut dyn CascadeObserver,
    ) -> Result<Outcome, EngineError> {
        if !self.begin_cascade(a, b)? {
            observer.on_swap_rejected(a, b);
            return Ok(Outcome::Rejected);
        }

        let mut score_gained: u32 = 0;
        let mut max_distance = 0;
        let mut unfilled = BTreeSet::new();
        while let Some(report) = self.step() {
            observer.on_destroy(&report.destroyed);
            observer.on_settle(&report.collapse, &report.refill, report.max_distance);
            observer.on_score(report.score_delta, self.score);

            score_gained = score_gained.saturating_add(report.score_delta);
            max_distance = max_distance.max(report.max_distance);
            unfilled.extend(report.unfilled);
        }

        let unfilled = unfilled
            .into_iter()
            .filter(|&coord| self.board.token_at(coord).is_none())
            .collect();
        Ok(Outcome::Resolved {
            score_gained,
            passes: self.passes,
            max_distance,
            unfilled,
        })
    }

    /// Swaps `a` and `b` and checks the result.
    ///
    /// Returns `Ok(false)` if the swap formed no run of at least `min_run`; the swap
    /// has then been undone. Returns `Ok(true)` if a cascade is now pending, to be
    /// driven with [`CascadeEngine::step`].
    pub fn begin_cascade(&mut self, a: Coord, b: Coord) -> Result<bool, EngineError> {
        if self.pending.is_some() {
            return Err(EngineError::CascadeInProgress);
        }
        self.board.check(a)?;
        self.board.check(b)?;
        if self.config.require_adjacent && a != b && !are_neighbors(a, b) {
            return Err(EngineError::NotAdjacent(a.0, a.1, b.0, b.1));
        }

        self.board.swap(a, b);
        let mut matches = self.board.match_at(a);
        matches.union_with(&self.board.match_at(b));

        if matches.len() < self.board.min_run() {
            self.board.undo_last_swap()?;
            debug!(?a, ?b, "swap rejected");
            return Ok(false);
        }

        debug!(?a, ?b, matched = matches.len(), "swap accepted");
        self.passes = 0;
        self.pending = Some(matches);
        Ok(true)
    }

    /// Performs one cascade pass: destroy the pending match, collapse the touched
    /// columns, refill them, and rescan only the cells that changed.
    ///
    /// Returns `None` when the board is already stable.
    pub fn step(&mut self) -> Option<PassReport> {
        let matched = self.pending.take()?;
        let min_run = self.board.min_run();

        // Saturates rather than wrapping for very large `match_score` values.
        let units = u32::try_from((matched.len() + 1).saturating_sub(min_run)).unwrap_or(u32::MAX);
        let score_delta = units.saturating_mul(self.config.match_score);
        self.score = self.score.saturating_add(score_delta);

        let destroyed = self.board.clear_cells(&matched);
        let columns = matched.columns();
        let collapse = self.board.collapse(columns.iter().copied());
        let refill = self.board.refill(columns.iter().copied(), &mut self.source);
        let max_distance = collapse.max_distance.max(refill.filled.max_distance);

        let mut changed = collapse.affected.clone();
        changed.extend(refill.filled.affected.iter().copied());
        let next = self.board.match_many(changed.iter().copied());
        self.passes += 1;

        if next.len() >= min_run {
            if self.passes >= self.config.max_cascade_passes {
                warn!(
                    passes = self.passes,
                    remaining = next.len(),
                    "cascade pass limit reached, leaving remaining matches"
                );
            } else {
                self.pending = Some(next);
            }
        }

        debug!(
            pass = self.passes,
            destroyed = destroyed.len(),
            score_delta,
            max_distance,
            rescanned = changed.len(),
            "cascade pass"
        );

        Some(PassReport {
            matched,
            destroyed,
            collapse,
            refill: refill.filled,
            unfilled: refill.unfilled,
            max_distance,
            score_delta,
            rescanned: changed.len(),
            more: self.pending.is_some(),
        })
    }
}
