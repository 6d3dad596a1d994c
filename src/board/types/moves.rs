//! Packed move representation.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Piece;
use super::square::Square;

const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CAPTURED_SHIFT: u32 = 15;
const NEW_PIECE_SHIFT: u32 = 18;
const SQUARE_MASK: u32 = 0x3F;
const KIND_MASK: u32 = 0x7;
/// Captured-kind field value meaning "no capture"
const NO_PIECE: u32 = 7;

/// Compact 32-bit move representation.
///
/// Encoding:
/// - bits 0-5:   from square (0-63)
/// - bits 6-11:  to square (0-63)
/// - bits 12-14: moving piece kind
/// - bits 15-17: captured piece kind (7 = none)
/// - bits 18-20: piece kind after the move (differs from the mover only on promotion)
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Move(u32);

impl Move {
    /// Create a move. `new_piece` equals `piece` unless the move promotes.
    #[inline]
    #[must_use]
    pub const fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        new_piece: Piece,
    ) -> Self {
        let captured_bits = match captured {
            Some(p) => p.index() as u32,
            None => NO_PIECE,
        };
        Move(
            from.index() as u32
                | (to.index() as u32) << TO_SHIFT
                | (piece.index() as u32) << PIECE_SHIFT
                | captured_bits << CAPTURED_SHIFT
                | (new_piece.index() as u32) << NEW_PIECE_SHIFT,
        )
    }

    /// Create a non-capturing, non-promoting move
    #[inline]
    #[must_use]
    pub const fn quiet(from: Square, to: Square, piece: Piece) -> Self {
        Move::new(from, to, piece, None, piece)
    }

    /// Get the source square
    #[inline]
    #[must_use]
    pub const fn from(self) -> Square {
        Square::from_index((self.0 & SQUARE_MASK) as usize)
    }

    /// Get the destination square
    #[inline]
    #[must_use]
    pub const fn to(self) -> Square {
        Square::from_index(((self.0 >> TO_SHIFT) & SQUARE_MASK) as usize)
    }

    /// The kind of the piece being moved
    #[inline]
    #[must_use]
    pub fn piece(self) -> Piece {
        kind_from_bits((self.0 >> PIECE_SHIFT) & KIND_MASK)
    }

    /// The kind of the captured piece, if any
    #[inline]
    #[must_use]
    pub fn captured(self) -> Option<Piece> {
        let bits = (self.0 >> CAPTURED_SHIFT) & KIND_MASK;
        Piece::from_index(bits as usize)
    }

    /// The kind the moving piece has after the move
    #[inline]
    #[must_use]
    pub fn new_piece(self) -> Piece {
        kind_from_bits((self.0 >> NEW_PIECE_SHIFT) & KIND_MASK)
    }

    /// Get the promotion piece, if this is a promotion move
    #[inline]
    #[must_use]
    pub fn promotion(self) -> Option<Piece> {
        let new_piece = self.new_piece();
        if new_piece == self.piece() {
            None
        } else {
            Some(new_piece)
        }
    }

    /// Returns true if this move captures a piece (including en passant)
    #[inline]
    #[must_use]
    pub const fn is_capture(self) -> bool {
        (self.0 >> CAPTURED_SHIFT) & KIND_MASK != NO_PIECE
    }

    /// Returns true if this move is a pawn promotion
    #[inline]
    #[must_use]
    pub fn is_promotion(self) -> bool {
        self.promotion().is_some()
    }

    /// Get the raw value (for hashing/storage)
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Create from raw value produced by [`Move::as_u32`]
    #[inline]
    #[must_use]
    pub const fn from_u32(value: u32) -> Self {
        Move(value)
    }
}

fn kind_from_bits(bits: u32) -> Piece {
    // Only `Move::new` builds moves, so the kind fields are always valid.
    Piece::from_index(bits as usize).unwrap_or(Piece::Pawn)
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}{}{}", self.piece().to_char(), self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "={}", promo.to_char().to_ascii_uppercase())?;
        }
        if let Some(captured) = self.captured() {
            write!(f, " x{}", captured.to_char())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Some(promo) = self.promotion() {
            write!(f, "{}", promo.to_char())?;
        }
        Ok(())
    }
}

pub(crate) const MAX_MOVES: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_fields() {
        let mv = Move::new(sq("e7"), sq("d8"), Piece::Pawn, Some(Piece::Rook), Piece::Queen);
        assert_eq!(mv.from(), sq("e7"));
        assert_eq!(mv.to(), sq("d8"));
        assert_eq!(mv.piece(), Piece::Pawn);
        assert_eq!(mv.captured(), Some(Piece::Rook));
        assert_eq!(mv.new_piece(), Piece::Queen);
        assert_eq!(mv.promotion(), Some(Piece::Queen));
        assert!(mv.is_capture());
        assert_eq!(mv.to_string(), "e7d8q");
    }

    #[test]
    fn test_quiet_move_has_no_capture_or_promotion() {
        let mv = Move::quiet(sq("g1"), sq("f3"), Piece::Knight);
        assert!(!mv.is_capture());
        assert!(!mv.is_promotion());
        assert_eq!(mv.captured(), None);
        assert_eq!(mv.new_piece(), Piece::Knight);
        assert_eq!(mv.to_string(), "g1f3");
    }

    #[test]
    fn test_raw_value_preserves_identity() {
        let mv = Move::new(sq("a2"), sq("b3"), Piece::Pawn, Some(Piece::King), Piece::Pawn);
        assert_eq!(Move::from_u32(mv.as_u32()), mv);
        assert_ne!(mv, Move::quiet(sq("a2"), sq("b3"), Piece::Pawn));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_json() {
        let mv = Move::quiet(sq("e2"), sq("e4"), Piece::Pawn);
        let json = serde_json::to_string(&mv).unwrap();
        let back: Move = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mv);
    }
}
