//! Chess board representation and game rules.
//!
//! Uses bitboards for move generation. Moves are pseudo-legal and the game
//! ends when a king is captured; castling is not modelled.
//!
//! # Example
//! ```
//! use minmax_chess::board::Board;
//!
//! let board = Board::new();
//! let moves = board.generate_moves();
//! println!("Starting position has {} moves", moves.len());
//! ```

mod attack_tables;
mod error;
mod fen;
mod make_unmake;
mod movegen;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{FenError, SquareError};
pub use state::{Board, UnmakeInfo};
pub use types::{Bitboard, BitboardIter, Color, Move, Piece, Square, PROMOTION_PIECES};

pub(crate) use types::MAX_MOVES;
