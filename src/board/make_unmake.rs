use crate::zobrist::ZOBRIST;

use super::{Board, Move, Piece, Square, UnmakeInfo};

impl Board {
    /// Square of the piece a move removes, and its kind.
    ///
    /// A pawn stepping diagonally onto the en passant target takes the pawn
    /// beside it rather than anything on the destination.
    fn capture_target(&self, m: Move) -> Option<(Piece, Square)> {
        let them = self.side_to_move.opponent();
        let to = m.to();
        if self.occupied[them.index()].contains(to) {
            return self.piece_at(to).map(|(_, piece)| (piece, to));
        }
        if m.piece() == Piece::Pawn
            && m.from().file() != to.file()
            && self.en_passant_target == Some(to)
        {
            let victim = Square::from_index(m.from().rank() * 8 + to.file());
            if self.pieces_of(them, Piece::Pawn).contains(victim) {
                return Some((Piece::Pawn, victim));
            }
        }
        None
    }

    pub fn make_move(&mut self, m: Move) -> UnmakeInfo {
        let previous_hash = self.hash;
        let previous_en_passant_target = self.en_passant_target;
        let color = self.side_to_move;

        let captured = self.capture_target(m);
        if let Some((piece, sq)) = captured {
            self.remove_piece(sq, color.opponent(), piece);
        }

        self.remove_piece(m.from(), color, m.piece());
        self.set_piece(m.to(), color, m.new_piece());

        if let Some(old_ep) = self.en_passant_target.take() {
            self.hash ^= ZOBRIST.en_passant(old_ep);
        }
        if m.piece() == Piece::Pawn && m.from().rank().abs_diff(m.to().rank()) == 2 {
            let ep_rank = usize::midpoint(m.from().rank(), m.to().rank());
            let ep_sq = Square::from_index(ep_rank * 8 + m.from().file());
            self.en_passant_target = Some(ep_sq);
            self.hash ^= ZOBRIST.en_passant(ep_sq);
        }

        self.side_to_move = color.opponent();
        self.hash ^= ZOBRIST.black_to_move_key;

        UnmakeInfo {
            captured,
            previous_en_passant_target,
            previous_hash,
        }
    }

    pub fn unmake_move(&mut self, m: Move, info: UnmakeInfo) {
        self.side_to_move = self.side_to_move.opponent();
        let color = self.side_to_move;

        self.remove_piece(m.to(), color, m.new_piece());
        self.set_piece(m.from(), color, m.piece());
        if let Some((piece, sq)) = info.captured {
            self.set_piece(sq, color.opponent(), piece);
        }

        self.en_passant_target = info.previous_en_passant_target;
        self.hash = info.previous_hash;
    }

    /// Pass the turn without moving a piece. The en passant target is kept,
    /// so two null moves in a row restore the position exactly.
    pub fn make_null_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
        self.hash ^= ZOBRIST.black_to_move_key;
    }
}
