//! Core chess types.
//!
//! - `Piece` and `Color` - chess piece types and colors
//! - `Square` - board square index
//! - `Bitboard` - 64-bit board representation
//! - `Move` - packed move representation

mod bitboard;
mod moves;
mod piece;
mod square;

pub use bitboard::{Bitboard, BitboardIter};
pub use moves::Move;
pub use piece::{Color, Piece, PROMOTION_PIECES};
pub use square::Square;

pub(crate) use moves::MAX_MOVES;
