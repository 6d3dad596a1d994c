use super::attack_tables::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks};
use super::{Bitboard, Board, Color, Move, Piece, Square, PROMOTION_PIECES};

impl Board {
    /// Destination squares reachable by `color`'s `piece` standing on `from`.
    ///
    /// Moves are pseudo-legal: leaving the own king attacked is allowed,
    /// since the game ends by capturing a king.
    pub fn pseudo_legal_moves(&self, color: Color, piece: Piece, from: Square) -> Bitboard {
        let own = self.occupied[color.index()];
        let occupancy = self.all_occupied();
        let targets = match piece {
            Piece::Pawn => return self.pawn_targets(color, from),
            Piece::Knight => knight_attacks(from),
            Piece::Bishop => bishop_attacks(from, occupancy),
            Piece::Rook => rook_attacks(from, occupancy),
            Piece::Queen => rook_attacks(from, occupancy) | bishop_attacks(from, occupancy),
            Piece::King => king_attacks(from),
        };
        targets & !own
    }

    fn pawn_targets(&self, color: Color, from: Square) -> Bitboard {
        let occupancy = self.all_occupied();
        let mut targets = Bitboard::EMPTY;

        let forward = match color {
            Color::White => from.index().checked_add(8).filter(|&i| i < 64),
            Color::Black => from.index().checked_sub(8),
        };
        if let Some(one) = forward.map(Square::from_index) {
            if !occupancy.contains(one) {
                targets |= Bitboard::from_square(one);
                if from.rank() == color.pawn_start_rank() {
                    let two = match color {
                        Color::White => Square::from_index(one.index() + 8),
                        Color::Black => Square::from_index(one.index() - 8),
                    };
                    if !occupancy.contains(two) {
                        targets |= Bitboard::from_square(two);
                    }
                }
            }
        }

        let attacks = pawn_attacks(color, from);
        targets |= attacks & self.occupied[color.opponent().index()];
        if let Some(ep) = self.en_passant_target {
            if ep.rank() == color.en_passant_capture_rank() && attacks.contains(ep) {
                targets |= Bitboard::from_square(ep);
            }
        }
        targets
    }

    /// All pseudo-legal moves for the side to move, in origin then
    /// destination order.
    pub fn generate_moves(&self) -> Vec<Move> {
        let color = self.side_to_move;
        let mut moves = Vec::new();
        for from in self.pieces(color).iter() {
            let Some((_, piece)) = self.piece_at(from) else {
                continue;
            };
            for to in self.pseudo_legal_moves(color, piece, from).iter() {
                let captured = self.piece_at(to).map(|(_, p)| p).or_else(|| {
                    (piece == Piece::Pawn && from.file() != to.file()).then_some(Piece::Pawn)
                });
                if piece == Piece::Pawn && from.rank() == color.pre_promotion_rank() {
                    for promo in PROMOTION_PIECES {
                        moves.push(Move::new(from, to, piece, captured, promo));
                    }
                } else {
                    moves.push(Move::new(from, to, piece, captured, piece));
                }
            }
        }
        moves
    }
}
