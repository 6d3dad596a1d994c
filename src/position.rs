//! The position interface the search is written against.

use crate::board::{Bitboard, Board, Color, Move, Piece, Square, UnmakeInfo};

/// A game position the engine can search.
///
/// `make_move`/`unmake_move` must be an exact inverse pair, and two calls to
/// `null_move` must restore the position. `identity` is the transposition
/// table key; positions that compare equal must share it. `Clone` is the
/// deep copy stored alongside table entries.
pub trait Position: Clone + PartialEq {
    /// Whatever `make_move` needs to hand back to `unmake_move`.
    type Undo;

    fn side_to_move(&self) -> Color;

    fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard;

    /// Destination squares for `color`'s `piece` on `from`, not filtered for
    /// king safety.
    fn pseudo_legal_moves(&self, color: Color, piece: Piece, from: Square) -> Bitboard;

    fn en_passant_square(&self) -> Option<Square>;

    fn make_move(&mut self, mv: Move) -> Self::Undo;

    fn unmake_move(&mut self, mv: Move, undo: Self::Undo);

    /// Hand the turn to the opponent without moving.
    fn null_move(&mut self);

    fn both_kings_alive(&self) -> bool;

    fn identity(&self) -> u64;

    /// Union of all of `color`'s pieces.
    fn pieces(&self, color: Color) -> Bitboard {
        Piece::ALL
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, piece| acc | self.pieces_of(color, piece))
    }

    /// Kind of `color`'s piece on `sq`, if any.
    fn piece_at(&self, color: Color, sq: Square) -> Option<Piece> {
        Piece::ALL
            .into_iter()
            .find(|&piece| self.pieces_of(color, piece).contains(sq))
    }
}

impl Position for Board {
    type Undo = UnmakeInfo;

    #[inline]
    fn side_to_move(&self) -> Color {
        Board::side_to_move(self)
    }

    #[inline]
    fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        Board::pieces_of(self, color, piece)
    }

    #[inline]
    fn pseudo_legal_moves(&self, color: Color, piece: Piece, from: Square) -> Bitboard {
        Board::pseudo_legal_moves(self, color, piece, from)
    }

    #[inline]
    fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_target()
    }

    #[inline]
    fn make_move(&mut self, mv: Move) -> UnmakeInfo {
        Board::make_move(self, mv)
    }

    #[inline]
    fn unmake_move(&mut self, mv: Move, undo: UnmakeInfo) {
        Board::unmake_move(self, mv, undo);
    }

    #[inline]
    fn null_move(&mut self) {
        self.make_null_move();
    }

    fn both_kings_alive(&self) -> bool {
        self.has_king(Color::White) && self.has_king(Color::Black)
    }

    #[inline]
    fn identity(&self) -> u64 {
        self.hash()
    }

    #[inline]
    fn pieces(&self, color: Color) -> Bitboard {
        Board::pieces(self, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_methods_match_board() {
        let board = Board::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1").unwrap();
        let d5: Square = "d5".parse().unwrap();
        assert_eq!(Position::piece_at(&board, Color::Black, d5), Some(Piece::Queen));
        assert_eq!(Position::piece_at(&board, Color::White, d5), None);

        let folded = Piece::ALL
            .into_iter()
            .fold(Bitboard::EMPTY, |acc, p| acc | board.pieces_of(Color::White, p));
        assert_eq!(Position::pieces(&board, Color::White), folded);
    }

    #[test]
    fn test_both_kings_alive() {
        let board = Board::new();
        assert!(board.both_kings_alive());
        let no_black_king = Board::from_fen("8/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert!(!no_black_king.both_kings_alive());
    }
}
