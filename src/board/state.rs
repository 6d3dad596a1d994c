use crate::zobrist::ZOBRIST;

use super::{Bitboard, Color, Piece, Square};

/// Everything [`Board::unmake_move`] needs beyond the move itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnmakeInfo {
    pub(crate) captured: Option<(Piece, Square)>,
    pub(crate) previous_en_passant_target: Option<Square>,
    pub(crate) previous_hash: u64,
}

/// Bitboard position: twelve piece sets, side to move and en passant target.
///
/// Two boards compare equal exactly when they describe the same position;
/// the Zobrist `hash` is a function of the other fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    pub(crate) pieces: [[Bitboard; 6]; 2],
    pub(crate) occupied: [Bitboard; 2],
    pub(crate) side_to_move: Color,
    pub(crate) en_passant_target: Option<Square>,
    pub(crate) hash: u64, // Zobrist hash
}

impl Board {
    /// The standard starting position, White to move.
    pub fn new() -> Self {
        let mut board = Board::empty();
        let back_rank = [
            Piece::Rook,
            Piece::Knight,
            Piece::Bishop,
            Piece::Queen,
            Piece::King,
            Piece::Bishop,
            Piece::Knight,
            Piece::Rook,
        ];
        for (file, piece) in back_rank.iter().enumerate() {
            board.set_piece(Square::from_index(file), Color::White, *piece);
            board.set_piece(Square::from_index(56 + file), Color::Black, *piece);
            board.set_piece(Square::from_index(8 + file), Color::White, Piece::Pawn);
            board.set_piece(Square::from_index(48 + file), Color::Black, Piece::Pawn);
        }
        board.hash = board.calculate_hash();
        board
    }

    /// A board with no pieces, White to move.
    pub fn empty() -> Self {
        Board {
            pieces: [[Bitboard::EMPTY; 6]; 2],
            occupied: [Bitboard::EMPTY; 2],
            side_to_move: Color::White,
            en_passant_target: None,
            hash: 0,
        }
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Square a pawn may capture onto en passant, if the last move was a double push.
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.occupied[color.index()]
    }

    pub fn pieces_of(&self, color: Color, piece: Piece) -> Bitboard {
        self.pieces[color.index()][piece.index()]
    }

    pub fn all_occupied(&self) -> Bitboard {
        self.occupied[0] | self.occupied[1]
    }

    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        let color = Color::BOTH
            .into_iter()
            .find(|c| self.occupied[c.index()].contains(sq))?;
        Piece::ALL
            .into_iter()
            .find(|p| self.pieces[color.index()][p.index()].contains(sq))
            .map(|p| (color, p))
    }

    pub fn has_king(&self, color: Color) -> bool {
        !self.pieces_of(color, Piece::King).is_empty()
    }

    /// Place a piece, keeping the hash in sync. The square must be empty.
    pub(crate) fn set_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let bit = Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] |= bit;
        self.occupied[color.index()] |= bit;
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    pub(crate) fn remove_piece(&mut self, sq: Square, color: Color, piece: Piece) {
        let keep = !Bitboard::from_square(sq);
        self.pieces[color.index()][piece.index()] &= keep;
        self.occupied[color.index()] &= keep;
        self.hash ^= ZOBRIST.piece(color, piece, sq);
    }

    pub(crate) fn calculate_hash(&self) -> u64 {
        let mut hash = 0;
        for color in Color::BOTH {
            for piece in Piece::ALL {
                for sq in self.pieces_of(color, piece).iter() {
                    hash ^= ZOBRIST.piece(color, piece, sq);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= ZOBRIST.black_to_move_key;
        }
        if let Some(ep) = self.en_passant_target {
            hash ^= ZOBRIST.en_passant(ep);
        }
        hash
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
