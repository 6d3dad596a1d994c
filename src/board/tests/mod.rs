//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `make_unmake.rs` - Make/unmake move correctness
//! - `edge_cases.rs` - Move generation in special positions
//! - `fen.rs` - FEN parsing and printing
//! - `proptest.rs` - Property-based tests

mod fen;

use super::{Board, Move, Piece, Square};

pub(super) fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

pub(super) fn find_move(board: &Board, from: &str, to: &str, promotion: Option<Piece>) -> Move {
    board
        .generate_moves()
        .into_iter()
        .find(|m| m.from() == sq(from) && m.to() == sq(to) && m.promotion() == promotion)
        .expect("Expected move not found")
}
