//! Move generation into priority buckets.
//!
//! Every pseudo-legal move of the side to move lands in one of
//! [`PRIORITIES`] buckets; consuming buckets from 0 upward gives the
//! search its move order.
//!
//! | bucket | moves                                             |
//! |--------|---------------------------------------------------|
//! | 0..=9  | captures, by attacker and victim (0 takes a king) |
//! | 3      | also: non-capturing promotion to a queen          |
//! | 10     | quiet moves                                       |
//! | 11     | non-capturing promotion to rook, bishop or knight |

use crate::board::{Bitboard, Color, Move, Piece, Square, MAX_MOVES, PROMOTION_PIECES};
use crate::position::Position;

/// Number of priority buckets.
pub const PRIORITIES: usize = 12;

/// Bucket of a capture, indexed `[attacker][victim]` in [`Piece::index`] order.
///
/// Cheap attackers taking expensive victims come first. Taking the king
/// ends the game and always comes first.
const CAPTURE_PRIORITY: [[usize; Piece::COUNT]; Piece::COUNT] = [
    // victim: P  N  B  R  Q  K
    [4, 3, 3, 2, 1, 0], // pawn
    [5, 4, 4, 3, 2, 0], // knight
    [5, 4, 4, 3, 2, 0], // bishop
    [6, 5, 5, 4, 3, 0], // rook
    [7, 6, 6, 5, 4, 0], // queen
    [9, 9, 9, 8, 8, 0], // king
];

const QUEEN_PROMOTION_PRIORITY: usize = 3;
const QUIET_PRIORITY: usize = 10;
const UNDER_PROMOTION_PRIORITY: usize = 11;

const NO_MOVE: Move = Move::from_u32(0);

/// Bucket a move belongs in.
#[must_use]
pub fn priority(mv: Move) -> usize {
    match (mv.captured(), mv.promotion()) {
        (Some(victim), _) => CAPTURE_PRIORITY[mv.piece().index()][victim.index()],
        (None, Some(Piece::Queen)) => QUEEN_PROMOTION_PRIORITY,
        (None, Some(_)) => UNDER_PROMOTION_PRIORITY,
        (None, None) => QUIET_PRIORITY,
    }
}

/// Fixed-capacity bucketed move buffer, refilled in place at every node.
pub struct MoveList {
    moves: [[Move; MAX_MOVES]; PRIORITIES],
    counts: [usize; PRIORITIES],
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl MoveList {
    #[must_use]
    pub fn new() -> Self {
        MoveList {
            moves: [[NO_MOVE; MAX_MOVES]; PRIORITIES],
            counts: [0; PRIORITIES],
        }
    }

    /// Refill with every pseudo-legal move of the side to move.
    pub fn populate<P: Position>(&mut self, pos: &P) {
        self.fill(pos, false);
    }

    /// Refill with capturing moves only (en passant included).
    pub fn populate_captures<P: Position>(&mut self, pos: &P) {
        self.fill(pos, true);
    }

    /// Number of moves in `bucket`.
    #[inline]
    #[must_use]
    pub fn count(&self, bucket: usize) -> usize {
        self.counts[bucket]
    }

    #[inline]
    #[must_use]
    pub fn get(&self, bucket: usize, idx: usize) -> Move {
        debug_assert!(idx < self.counts[bucket]);
        self.moves[bucket][idx]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.iter().sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All moves in search order.
    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves
            .iter()
            .zip(self.counts)
            .flat_map(|(bucket, count)| bucket[..count].iter().copied())
    }

    pub fn clear(&mut self) {
        self.counts = [0; PRIORITIES];
    }

    fn push(&mut self, mv: Move) {
        let bucket = priority(mv);
        let idx = self.counts[bucket];
        debug_assert!(idx < MAX_MOVES, "move bucket overflow");
        self.moves[bucket][idx] = mv;
        self.counts[bucket] = idx + 1;
    }

    fn fill<P: Position>(&mut self, pos: &P, captures_only: bool) {
        self.clear();
        let us = pos.side_to_move();
        let them = us.opponent();
        let en_passant = pos.en_passant_square();

        for from in pos.pieces(us).iter() {
            let Some(piece) = pos.piece_at(us, from) else {
                continue;
            };
            for to in pos.pseudo_legal_moves(us, piece, from).iter() {
                let captured = pos
                    .piece_at(them, to)
                    .or_else(|| takes_en_passant(piece, from, to, en_passant).then_some(Piece::Pawn));
                if captures_only && captured.is_none() {
                    continue;
                }
                if promotes(piece, us, to) {
                    for promo in PROMOTION_PIECES {
                        self.push(Move::new(from, to, piece, captured, promo));
                    }
                } else {
                    self.push(Move::new(from, to, piece, captured, piece));
                }
            }
        }
    }
}

fn takes_en_passant(piece: Piece, from: Square, to: Square, en_passant: Option<Square>) -> bool {
    piece == Piece::Pawn && from.file() != to.file() && en_passant == Some(to)
}

fn promotes(piece: Piece, color: Color, to: Square) -> bool {
    piece == Piece::Pawn && Bitboard::rank_mask(color.promotion_rank()).contains(to)
}
