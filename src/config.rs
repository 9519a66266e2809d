//! Game constants, with JSON loading for hosts that keep them in a file.
use crate::error::EngineError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Tunables for a [`crate::engine::CascadeEngine`].
///
/// Missing JSON fields fall back to [`EngineConfig::default`].
///
/// # Examples
/// ```
/// use cascade_grid::config::EngineConfig;
/// let config = EngineConfig::from_json_str(r#"{ "rows": 9, "columns": 9 }"#).unwrap();
/// assert_eq!(config.rows, 9);
/// assert_eq!(config.min_run, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    /// Minimum run length that counts as a match.
    pub min_run: usize,
    /// Points for a run of exactly `min_run`; each extra cell adds one more unit.
    pub match_score: u32,
    /// How many token types the random source draws from.
    pub palette_size: usize,
    /// Reject swaps between cells that are not orthogonal neighbours.
    pub require_adjacent: bool,
    /// Upper bound on passes in one cascade.
    pub max_cascade_passes: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            rows: 12,
            columns: 8,
            min_run: 3,
            match_score: 100,
            palette_size: 5,
            require_adjacent: false,
            max_cascade_passes: 256,
        }
    }
}

impl EngineConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(EngineError::InvalidConfig(format!(
                "board must have at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }
        if self.min_run < 2 {
            return Err(EngineError::InvalidConfig(format!(
                "min_run must be at least 2, got {}",
                self.min_run
            )));
        }
        if !(1..=6).contains(&self.palette_size) {
            return Err(EngineError::InvalidConfig(format!(
                "palette_size must be between 1 and 6, got {}",
                self.palette_size
            )));
        }
        if self.max_cascade_passes == 0 {
            return Err(EngineError::InvalidConfig(
                "max_cascade_passes must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!((config.rows, config.columns, config.min_run), (12, 8, 3));
        assert_eq!(config.match_score, 100);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let config =
            EngineConfig::from_json_str(r#"{ "min_run": 4, "require_adjacent": true }"#)
                .unwrap();
        assert_eq!(config.min_run, 4);
        assert!(config.require_adjacent);
        assert_eq!(config.rows, 12);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields_and_bad_values() {
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "rowz": 4 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "min_run": 1 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "palette_size": 7 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json_str(r#"{ "columns": 0 }"#),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EngineConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
