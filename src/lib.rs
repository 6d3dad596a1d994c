pub mod board;
pub mod error;
pub mod position;
pub mod search;
pub mod tt;
mod zobrist;

pub use board::{Board, Color, Move, Piece, Square};
pub use error::{ConfigError, SearchError};
pub use position::Position;
pub use search::{
    evaluate, MinMaxAi, MoveList, SearchConfig, SearchOutcome, SearchParams, SearchStats,
};
pub use tt::{Bound, StateInfo, TranspositionTable};
