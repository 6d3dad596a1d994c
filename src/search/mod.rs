//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening from depth 2, stopped by a projected time budget
//! - Fail-hard alpha-beta search with null move pruning
//! - Bucketed move ordering (table move, captures, promotions, quiet moves)
//! - Transposition table for move ordering and cutoffs
//! - Cancellation through a stop flag, keeping the last completed depth

mod constants;
mod context;
mod eval;
mod move_list;
mod params;

use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use crate::board::Move;
use crate::error::{ConfigError, SearchError};
use crate::position::Position;
use crate::tt::TranspositionTable;

use context::SearchContext;

pub use constants::{
    DEFAULT_MAX_DEPTH, DEFAULT_TIME_LIMIT_MS, ESTIMATED_BRANCHING_FACTOR, INFINITY,
    MIN_SEARCH_DEPTH,
};
pub use eval::evaluate;
pub use move_list::{priority, MoveList, PRIORITIES};
pub use params::SearchParams;

/// Statistics of one top-level search
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes entered, table hits and leaves included
    pub nodes: u64,
    /// Static evaluations performed
    pub evaluations: u64,
    pub table_hits: u64,
    /// Table occupancy when the search finished
    pub table_size: usize,
    /// Entries dropped because the table reached its maximum capacity
    pub evictions: u64,
    pub elapsed: Duration,
}

/// Result of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    pub best_move: Move,
    /// Score of `best_move` from the mover's point of view, at `depth`
    pub score: i32,
    /// Deepest fully completed iteration
    pub depth: i32,
    pub stats: SearchStats,
}

/// Configuration for a search engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration to run (at least [`MIN_SEARCH_DEPTH`])
    pub max_depth: i32,
    /// Time budget in milliseconds (0 = unlimited)
    pub time_limit_ms: u64,
    /// Log per-depth progress and a summary through the `log` facade
    pub trace: bool,
    pub params: SearchParams,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
            time_limit_ms: DEFAULT_TIME_LIMIT_MS,
            trace: false,
            params: SearchParams::default(),
        }
    }
}

impl SearchConfig {
    /// Create a depth-limited search config with no time budget
    #[must_use]
    pub fn depth(max_depth: i32) -> Self {
        SearchConfig {
            max_depth,
            time_limit_ms: 0,
            ..Default::default()
        }
    }

    /// Create a time-limited search config
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchConfig {
            time_limit_ms,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: SearchParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn with_null_move(mut self, enabled: bool) -> Self {
        self.params.null_move = enabled;
        self
    }

    #[must_use]
    pub fn with_transposition_table(mut self, enabled: bool) -> Self {
        self.params.use_transposition_table = enabled;
        self
    }

    fn time_limit(&self) -> Option<Duration> {
        (self.time_limit_ms > 0).then(|| Duration::from_millis(self.time_limit_ms))
    }
}

/// Iterative deepening alpha-beta engine.
///
/// Owns its transposition table and move buffers; both are reused across
/// calls and the table is cleared at the start of each one.
///
/// # Example
/// ```
/// use minmax_chess::board::Board;
/// use minmax_chess::search::{MinMaxAi, SearchConfig};
///
/// let mut ai = MinMaxAi::new(SearchConfig::depth(3)).unwrap();
/// let mut board = Board::new();
/// let outcome = ai.choose_move(&mut board).unwrap();
/// assert_eq!(outcome.depth, 3);
/// ```
pub struct MinMaxAi<P: Position> {
    config: SearchConfig,
    table: TranspositionTable<P>,
    lists: Vec<MoveList>,
    last_stats: SearchStats,
}

impl<P: Position> MinMaxAi<P> {
    pub fn new(config: SearchConfig) -> Result<Self, ConfigError> {
        if config.max_depth < MIN_SEARCH_DEPTH {
            return Err(ConfigError::SearchDepth {
                requested: config.max_depth,
                minimum: MIN_SEARCH_DEPTH,
            });
        }
        let mut table = TranspositionTable::with_capacity(config.params.table_capacity)?;
        if let Some(max) = config.params.max_table_capacity {
            table = table.with_max_capacity(max)?;
        }
        Ok(MinMaxAi {
            config,
            table,
            lists: Vec::new(),
            last_stats: SearchStats::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Statistics of the most recent search
    #[must_use]
    pub fn last_stats(&self) -> &SearchStats {
        &self.last_stats
    }

    /// Pick a move for the side to move. `pos` is left unchanged.
    pub fn choose_move(&mut self, pos: &mut P) -> Result<SearchOutcome, SearchError> {
        let stop = AtomicBool::new(false);
        self.search(pos, &stop)
    }

    /// Pick a move and play it on `pos`.
    pub fn make_move(&mut self, pos: &mut P) -> Result<SearchOutcome, SearchError> {
        let outcome = self.choose_move(pos)?;
        pos.make_move(outcome.best_move);
        Ok(outcome)
    }

    /// Run iterative deepening on `pos`, abandoning the current iteration
    /// once `stop` is raised or the time budget runs out.
    ///
    /// The depth 2 iteration always completes. `pos` is restored before
    /// returning.
    pub fn search(&mut self, pos: &mut P, stop: &AtomicBool) -> Result<SearchOutcome, SearchError> {
        let start_time = Instant::now();
        self.table.clear();
        let time_limit = self.config.time_limit();
        let trace = self.config.trace;

        let mut ctx = SearchContext {
            pos,
            table: &mut self.table,
            lists: &mut self.lists,
            params: &self.config.params,
            stop,
            start_time,
            time_limit,
            trace,
            pass_depth: MIN_SEARCH_DEPTH,
            cancellable: false,
            aborted: false,
            nodes: 0,
            evaluations: 0,
            table_hits: 0,
            root_best: None,
        };

        let mut completed: Option<(Option<Move>, i32, i32)> = None;
        for depth in MIN_SEARCH_DEPTH..=self.config.max_depth {
            ctx.begin_pass(depth);
            let score = ctx.search_with_table(depth, -INFINITY, INFINITY, 0);
            if ctx.aborted {
                if trace {
                    log::debug!("depth {depth} abandoned after {} nodes", ctx.nodes);
                }
                break;
            }

            let best = ctx.root_move();
            completed = Some((best, score, depth));
            ctx.cancellable = true;

            let elapsed = start_time.elapsed();
            if trace {
                log::debug!(
                    "depth {depth} score {score} best {} nodes {} time {:.3}ms",
                    best.map_or_else(|| "none".to_string(), |mv| mv.to_string()),
                    ctx.nodes,
                    elapsed.as_secs_f64() * 1e3
                );
            }
            if let Some(limit) = time_limit {
                if elapsed.as_secs_f64() * ESTIMATED_BRANCHING_FACTOR > limit.as_secs_f64() {
                    break;
                }
            }
        }

        let stats = SearchStats {
            nodes: ctx.nodes,
            evaluations: ctx.evaluations,
            table_hits: ctx.table_hits,
            table_size: self.table.len(),
            evictions: self.table.evictions(),
            elapsed: start_time.elapsed(),
        };
        if trace {
            log::info!(
                "count={} transpCount={} transpTableSize={} evictions={} t={:.3}ms",
                stats.evaluations,
                stats.table_hits,
                stats.table_size,
                stats.evictions,
                stats.elapsed.as_secs_f64() * 1e3
            );
        }
        self.last_stats = stats.clone();

        match completed {
            Some((Some(best_move), score, depth)) => Ok(SearchOutcome {
                best_move,
                score,
                depth,
                stats,
            }),
            _ => Err(SearchError::NoMoveAvailable),
        }
    }
}
