//! FEN parsing and printing.

use super::sq;
use crate::board::{Board, Color, FenError, Piece};

#[test]
fn test_start_position_roundtrip() {
    let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";
    let board: Board = fen.parse().unwrap();
    assert_eq!(board, Board::new());
    assert_eq!(board.to_fen(), fen);
}

#[test]
fn test_castling_field_ignored_and_counters_optional() {
    let a = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 3 17").unwrap();
    let b = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w - -").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.hash(), b.hash());
}

#[test]
fn test_en_passant_and_side_parsed() {
    let board = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
    assert_eq!(board.side_to_move(), Color::Black);
    assert_eq!(board.en_passant_target(), Some(sq("e3")));
    assert_eq!(board.piece_at(sq("d4")), Some((Color::Black, Piece::Pawn)));
    assert_eq!(board.to_fen(), "4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1");
}

#[test]
fn test_hash_depends_on_side_and_en_passant() {
    let white = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 w - - 0 1").unwrap();
    let black = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1").unwrap();
    let black_ep = Board::from_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").unwrap();
    assert_ne!(white.hash(), black.hash());
    assert_ne!(black.hash(), black_ep.hash());
    assert_ne!(black, black_ep);
}

#[test]
fn test_errors() {
    assert_eq!(
        Board::from_fen("8/8/8/8 w"),
        Err(FenError::TooFewParts { found: 2 })
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/7x w - -"),
        Err(FenError::InvalidPiece { char: 'x' })
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/8 x - -"),
        Err(FenError::InvalidSideToMove {
            found: "x".to_string()
        })
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/8 w - e9"),
        Err(FenError::InvalidEnPassant {
            found: "e9".to_string()
        })
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8 w - -"),
        Err(FenError::InvalidRankCount { found: 7 })
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/7 w - -"),
        Err(FenError::TooFewFiles { rank: 7, files: 7 })
    );
    assert!(matches!(
        Board::from_fen("8/8/8/8/8/8/8/9 w - -"),
        Err(FenError::TooManyFiles { .. })
    ));
}
