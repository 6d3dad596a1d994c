//! Square types and utilities.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::error::SquareError;

/// A square on the chess board as an index in `[0, 64)`: a1=0, b1=1, ..., h8=63.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Square(u8);

impl Square {
    /// Create a square from rank and file with bounds checking
    #[must_use]
    pub fn new(rank: usize, file: usize) -> Option<Self> {
        if rank < 8 && file < 8 {
            Some(Square((rank * 8 + file) as u8))
        } else {
            None
        }
    }

    /// Create a square from an index (0-63). Higher bits are masked off.
    #[inline]
    #[must_use]
    pub const fn from_index(idx: usize) -> Self {
        Square((idx & 63) as u8)
    }

    /// Get the square's index (0-63)
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the rank (0-7, where 0 = rank 1)
    #[inline]
    #[must_use]
    pub const fn rank(self) -> usize {
        (self.0 / 8) as usize
    }

    /// Get the file (0-7, where 0 = file a)
    #[inline]
    #[must_use]
    pub const fn file(self) -> usize {
        (self.0 % 8) as usize
    }

    /// Parse algebraic notation such as `e4`.
    pub fn from_algebraic(notation: &str) -> Result<Self, SquareError> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            return Err(SquareError::InvalidNotation {
                notation: notation.to_string(),
            });
        }
        let file = bytes[0].wrapping_sub(b'a') as usize;
        let rank = bytes[1].wrapping_sub(b'1') as usize;
        if file >= 8 {
            return Err(SquareError::FileOutOfBounds { file });
        }
        if rank >= 8 {
            return Err(SquareError::RankOutOfBounds { rank });
        }
        Ok(Square((rank * 8 + file) as u8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (self.file() as u8 + b'a') as char, self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Square::from_algebraic(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_layout() {
        let e4 = Square::new(3, 4).unwrap();
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.to_string(), "e4");
    }

    #[test]
    fn test_parse() {
        assert_eq!("a1".parse::<Square>().unwrap().index(), 0);
        assert_eq!("h8".parse::<Square>().unwrap().index(), 63);
        assert!(matches!(
            "i1".parse::<Square>(),
            Err(SquareError::FileOutOfBounds { file: 8 })
        ));
        assert!(matches!(
            "a9".parse::<Square>(),
            Err(SquareError::RankOutOfBounds { rank: 8 })
        ));
        assert!("e".parse::<Square>().is_err());
    }

    #[test]
    fn test_new_bounds() {
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());
    }
}
