use once_cell::sync::Lazy;

use super::{Bitboard, Color, Square};

fn step_table(deltas: &[(isize, isize)]) -> [u64; 64] {
    let mut attacks = [0u64; 64];
    for (sq, slot) in attacks.iter_mut().enumerate() {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        let mut mask = 0u64;
        for &(dr, df) in deltas {
            let nr = r + dr;
            let nf = f + df;
            if (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
            }
        }
        *slot = mask;
    }
    attacks
}

static KNIGHT_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    step_table(&[
        (2, 1),
        (1, 2),
        (-1, 2),
        (-2, 1),
        (-2, -1),
        (-1, -2),
        (1, -2),
        (2, -1),
    ])
});

static KING_ATTACKS: Lazy<[u64; 64]> = Lazy::new(|| {
    step_table(&[
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ])
});

static PAWN_ATTACKS: Lazy<[[u64; 64]; 2]> =
    Lazy::new(|| [step_table(&[(1, -1), (1, 1)]), step_table(&[(-1, -1), (-1, 1)])]);

const DIR_N: usize = 0;
const DIR_S: usize = 1;
const DIR_E: usize = 2;
const DIR_W: usize = 3;
const DIR_NE: usize = 4;
const DIR_NW: usize = 5;
const DIR_SE: usize = 6;
const DIR_SW: usize = 7;

const ROOK_DIRS: [usize; 4] = [DIR_N, DIR_S, DIR_E, DIR_W];
const BISHOP_DIRS: [usize; 4] = [DIR_NE, DIR_NW, DIR_SE, DIR_SW];

static RAYS: Lazy<[[u64; 64]; 8]> = Lazy::new(|| {
    let mut rays = [[0u64; 64]; 8];
    let dirs = [
        (1, 0),   // N
        (-1, 0),  // S
        (0, 1),   // E
        (0, -1),  // W
        (1, 1),   // NE
        (1, -1),  // NW
        (-1, 1),  // SE
        (-1, -1), // SW
    ];
    for sq in 0..64 {
        let r = (sq / 8) as isize;
        let f = (sq % 8) as isize;
        for (d, (dr, df)) in dirs.iter().enumerate() {
            let mut mask = 0u64;
            let mut nr = r + dr;
            let mut nf = f + df;
            while (0..8).contains(&nr) && (0..8).contains(&nf) {
                mask |= 1u64 << ((nr as usize) * 8 + (nf as usize));
                nr += dr;
                nf += df;
            }
            rays[d][sq] = mask;
        }
    }
    rays
});

fn is_increasing_dir(dir: usize) -> bool {
    matches!(dir, DIR_N | DIR_E | DIR_NE | DIR_NW)
}

fn ray_attacks(from_idx: usize, dir: usize, occupancy: u64) -> u64 {
    let ray = RAYS[dir][from_idx];
    let blockers = ray & occupancy;
    if blockers == 0 {
        return ray;
    }
    let blocker_idx = if is_increasing_dir(dir) {
        blockers.trailing_zeros() as usize
    } else {
        63 - blockers.leading_zeros() as usize
    };
    ray ^ RAYS[dir][blocker_idx]
}

fn slider_attacks(from: Square, occupancy: Bitboard, dirs: &[usize]) -> Bitboard {
    let mut attacks = 0u64;
    for &dir in dirs {
        attacks |= ray_attacks(from.index(), dir, occupancy.0);
    }
    Bitboard(attacks)
}

pub(crate) fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq.index()])
}

pub(crate) fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq.index()])
}

pub(crate) fn pawn_attacks(color: Color, sq: Square) -> Bitboard {
    Bitboard(PAWN_ATTACKS[color.index()][sq.index()])
}

pub(crate) fn rook_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &ROOK_DIRS)
}

pub(crate) fn bishop_attacks(sq: Square, occupancy: Bitboard) -> Bitboard {
    slider_attacks(sq, occupancy, &BISHOP_DIRS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn test_knight_corner() {
        let attacks = knight_attacks(sq("a1"));
        assert_eq!(attacks.popcount(), 2);
        assert!(attacks.contains(sq("b3")));
        assert!(attacks.contains(sq("c2")));
    }

    #[test]
    fn test_king_center() {
        assert_eq!(king_attacks(sq("e4")).popcount(), 8);
    }

    #[test]
    fn test_pawn_attacks_direction() {
        let white = pawn_attacks(Color::White, sq("e4"));
        assert!(white.contains(sq("d5")) && white.contains(sq("f5")));
        let black = pawn_attacks(Color::Black, sq("a5"));
        assert_eq!(black, Bitboard::from_square(sq("b4")));
    }

    #[test]
    fn test_rook_stops_at_blocker() {
        let occupancy = Bitboard::from_square(sq("a4"));
        let attacks = rook_attacks(sq("a1"), occupancy);
        assert!(attacks.contains(sq("a4")));
        assert!(!attacks.contains(sq("a5")));
        assert!(attacks.contains(sq("h1")));
        assert_eq!(attacks.popcount(), 10);
    }

    #[test]
    fn test_bishop_empty_board() {
        assert_eq!(bishop_attacks(sq("d4"), Bitboard::EMPTY).popcount(), 13);
    }
}
