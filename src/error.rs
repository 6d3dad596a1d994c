//! Error types for engine construction and search.

use std::fmt;

/// Invalid engine or table configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Table capacity below the minimum or not a power of two
    TableCapacity { requested: usize, minimum: usize },
    /// Maximum search depth below the first iterative deepening pass
    SearchDepth { requested: i32, minimum: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::TableCapacity { requested, minimum } => {
                write!(
                    f,
                    "Table capacity {requested} must be a power of two and at least {minimum}"
                )
            }
            ConfigError::SearchDepth { requested, minimum } => {
                write!(f, "Search depth {requested} is below the minimum of {minimum}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Failure to produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// The side to move has no pseudo-legal move, or the game is already over
    NoMoveAvailable,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::NoMoveAvailable => write!(f, "No move available in this position"),
        }
    }
}

impl std::error::Error for SearchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::TableCapacity {
            requested: 4,
            minimum: 8,
        };
        assert_eq!(
            err.to_string(),
            "Table capacity 4 must be a power of two and at least 8"
        );

        let err = ConfigError::SearchDepth {
            requested: 1,
            minimum: 2,
        };
        assert!(err.to_string().contains("depth 1"));
    }

    #[test]
    fn test_search_error_is_error() {
        let err: Box<dyn std::error::Error> = Box::new(SearchError::NoMoveAvailable);
        assert_eq!(err.to_string(), "No move available in this position");
    }
}
