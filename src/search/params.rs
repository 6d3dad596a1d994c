#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable search parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    pub null_move: bool,
    /// Extra depth removed from the null-move probe; also the depth it
    /// must exceed to be tried
    pub null_reduction: i32,
    /// Depth removed from a node whose null-move probe failed high
    pub null_depth_reduction: i32,
    /// Nodes within this many plies of the pass root get table entries
    pub transposition_depth: i32,
    pub use_transposition_table: bool,
    pub table_capacity: usize,
    pub max_table_capacity: Option<usize>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            null_move: true,
            null_reduction: 2,
            null_depth_reduction: 4,
            transposition_depth: 6,
            use_transposition_table: true,
            table_capacity: 1 << 10,
            max_table_capacity: Some(1 << 16),
        }
    }
}
