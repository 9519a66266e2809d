//! Error type shared by the board, token sources and the cascade engine.
//!
//! Gameplay outcomes such as a swap that forms no match are not errors; they are
//! reported through `engine::Outcome`. Everything in here is either a caller mistake
//! at the API boundary or a collaborator (token source, config file) failing.

/// Errors produced by the cascade engine and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A coordinate from outside the engine does not lie on the board.
    #[error("coordinate ({row}, {column}) is outside the board")]
    InvalidCoordinate { row: usize, column: usize },

    /// `undo_last_swap` was called on a board that has never been swapped.
    #[error("no swap has been made yet, nothing to undo")]
    NoPriorSwap,

    /// The token source had nothing left for the named cell.
    #[error("token source could not supply a token for ({row}, {column})")]
    ExhaustedTokenSource { row: usize, column: usize },

    /// Only raised when `require_adjacent` is set.
    #[error("cells ({0}, {1}) and ({2}, {3}) are not orthogonal neighbours")]
    NotAdjacent(usize, usize, usize, usize),

    /// A new swap was started while a stepped cascade was still pending.
    #[error("a cascade is still resolving; step it to completion first")]
    CascadeInProgress,

    /// Initial population gave up on a cell after too many rejected candidates.
    #[error("no token could be placed at ({row}, {column}) without forming a run")]
    UnsatisfiablePlacement { row: usize, column: usize },

    /// A config value is out of range, or the JSON could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed text board or token script.
    #[error("parse error: {0}")]
    Parse(String),

    /// Reading a config file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn invalid_coordinate((row, column): (usize, usize)) -> Self {
        EngineError::InvalidCoordinate { row, column }
    }

    pub(crate) fn exhausted((row, column): (usize, usize)) -> Self {
        EngineError::ExhaustedTokenSource { row, column }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_coordinate() {
        let err = EngineError::invalid_coordinate((4, 9));
        assert_eq!(err.to_string(), "coordinate (4, 9) is outside the board");

        let err = EngineError::exhausted((0, 2));
        assert!(err.to_string().contains("(0, 2)"));
    }
}
