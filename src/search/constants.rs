//! Search constants.

/// First depth of every iterative deepening run; also the smallest
/// accepted maximum depth
pub const MIN_SEARCH_DEPTH: i32 = 2;

/// Depth cap used by the default configuration
pub const DEFAULT_MAX_DEPTH: i32 = 64;

/// Time budget used by the default configuration
pub const DEFAULT_TIME_LIMIT_MS: u64 = 3000;

/// Assumed ratio between the cost of depth d+1 and depth d. A new depth is
/// started only while `elapsed * ESTIMATED_BRANCHING_FACTOR` fits the budget.
pub const ESTIMATED_BRANCHING_FACTOR: f64 = 3.5;

/// Nodes between two clock reads while cancellation is armed
pub const TIME_CHECK_INTERVAL: u64 = 64;

/// Widest search window; negating either end cannot overflow
pub const INFINITY: i32 = i32::MAX;
