use crate::board::Piece;
use crate::position::Position;

/// Static score from the side to move's point of view.
///
/// Material balance, less one point per occupied square, less the depth
/// still remaining so that quicker wins and slower losses score better.
#[must_use]
pub fn evaluate<P: Position>(pos: &P, depth: i32) -> i32 {
    let us = pos.side_to_move();
    let them = us.opponent();

    let mut score = -depth;
    for piece in Piece::ALL {
        let own = pos.pieces_of(us, piece).popcount() as i32;
        let their = pos.pieces_of(them, piece).popcount() as i32;
        score += (own - their) * piece.value();
    }
    score - (pos.pieces(us) | pos.pieces(them)).popcount() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_start_position_is_balanced() {
        assert_eq!(evaluate(&Board::new(), 0), -32);
        assert_eq!(evaluate(&Board::new(), 3), -35);
    }

    #[test]
    fn test_material_from_side_to_move() {
        let white = Board::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/8/8/3q4/8/2N5/8/4K3 b - - 0 1").unwrap();
        assert_eq!(evaluate(&white, 0), 320 - 900 - 4);
        assert_eq!(evaluate(&black, 0), 900 - 320 - 4);
    }

    #[test]
    fn test_missing_king_dominates() {
        let board = Board::from_fen("8/8/8/8/8/8/8/QQQQK3 b - - 0 1").unwrap();
        assert!(evaluate(&board, 0) < -19000);
    }
}
