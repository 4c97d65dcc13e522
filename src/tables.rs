//! Precomputed attack tables: sliding rays per square and direction, knight
//! hops, king steps, pawn capture targets, and the `between(a, b)` table.
//!
//! Built once per process behind a `once_cell::sync::Lazy`, mirroring the
//! teacher's `ATTACK_TABLES` static (`attack_tables/tables.rs`) and
//! `ZobristTable::get()` (`search/zobrist.rs`) one-shot-initialization idiom.

use once_cell::sync::Lazy;

use crate::bitboard::{Bitboard, Direction};
use crate::color::Color;

pub struct Tables {
    /// `rays[sq][dir]`: all squares reachable from `sq` walking in `dir`
    /// to the board edge, not including `sq` itself and with no blocker
    /// truncation (truncation against current occupancy happens at
    /// move-generation time).
    rays: [[Bitboard; 8]; 64],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    /// `pawn_attacks[color][sq]`: squares a pawn of `color` standing on
    /// `sq` attacks (diagonal capture targets), not push targets.
    pawn_attacks: [[Bitboard; 64]; 2],
    /// `between[a][b]`: inclusive ray from `a` to `b` if they lie on a
    /// common rank, file, or diagonal; `Bitboard::EMPTY` otherwise.
    between: [[Bitboard; 64]; 64],
}

pub static TABLES: Lazy<Tables> = Lazy::new(Tables::build);

impl Tables {
    fn build() -> Tables {
        let mut rays = [[Bitboard::EMPTY; 8]; 64];
        for sq in 0..64 {
            for (d_idx, &dir) in Direction::ALL.iter().enumerate() {
                rays[sq][d_idx] = ray_from(sq, dir);
            }
        }

        let mut knight = [Bitboard::EMPTY; 64];
        let mut king = [Bitboard::EMPTY; 64];
        for sq in 0..64 {
            knight[sq] = knight_hops(sq);
            king[sq] = king_steps(sq);
        }

        let mut pawn_attacks = [[Bitboard::EMPTY; 64]; 2];
        for sq in 0..64 {
            let bb = Bitboard::from_square(sq);
            pawn_attacks[Color::White.index()][sq] =
                bb.shift(Direction::NorthEast) | bb.shift(Direction::NorthWest);
            pawn_attacks[Color::Black.index()][sq] =
                bb.shift(Direction::SouthEast) | bb.shift(Direction::SouthWest);
        }

        let mut between = [[Bitboard::EMPTY; 64]; 64];
        for a in 0..64 {
            for &dir in &Direction::ALL {
                let mut acc = Bitboard::EMPTY;
                let mut cur = Bitboard::from_square(a);
                loop {
                    let next = cur.shift(dir);
                    if next.is_empty() {
                        break;
                    }
                    acc |= next;
                    let b = next.lowest_set_bit() as usize;
                    between[a][b] = acc;
                    cur = next;
                }
            }
        }

        Tables { rays, knight, king, pawn_attacks, between }
    }

    #[inline]
    pub fn ray(&self, sq: usize, dir: Direction) -> Bitboard {
        self.rays[sq][dir_index(dir)]
    }

    #[inline]
    pub fn knight_attacks(&self, sq: usize) -> Bitboard {
        self.knight[sq]
    }

    #[inline]
    pub fn king_attacks(&self, sq: usize) -> Bitboard {
        self.king[sq]
    }

    #[inline]
    pub fn pawn_attacks(&self, sq: usize, color: Color) -> Bitboard {
        self.pawn_attacks[color.index()][sq]
    }

    /// Inclusive ray from `a` to `b` along a shared rank/file/diagonal, or
    /// empty if the two squares are not aligned.
    #[inline]
    pub fn between(&self, a: usize, b: usize) -> Bitboard {
        self.between[a][b]
    }

    /// A sliding piece's reachable set from `sq`, given the full-board
    /// occupancy and the set of friendly pieces to exclude from the result.
    /// Implements spec.md's "truncate at nearest blocker, include it only
    /// if it's an enemy" rule: for N/E-ish (positive) rays we truncate with
    /// the lowest blocker index, for S/W-ish (negative) rays with the
    /// highest.
    pub fn slider_attacks(
        &self,
        sq: usize,
        dirs: &[Direction],
        occupied: Bitboard,
        friendly: Bitboard,
    ) -> Bitboard {
        let mut result = Bitboard::EMPTY;
        for &dir in dirs {
            let ray = self.ray(sq, dir);
            let blockers = ray & occupied;
            let reachable = if blockers.is_empty() {
                ray
            } else if dir.is_positive() {
                let blocker = blockers.lowest_set_bit();
                ray.clear_bits_above(blocker) | Bitboard::from_square(blocker as usize)
            } else {
                let blocker = blockers.highest_set_bit();
                ray.clear_bits_below(blocker) | Bitboard::from_square(blocker as usize)
            };
            result |= reachable;
        }
        result & !friendly
    }
}

#[inline]
fn dir_index(dir: Direction) -> usize {
    match dir {
        Direction::North => 0,
        Direction::NorthEast => 1,
        Direction::East => 2,
        Direction::SouthEast => 3,
        Direction::South => 4,
        Direction::SouthWest => 5,
        Direction::West => 6,
        Direction::NorthWest => 7,
    }
}

fn ray_from(sq: usize, dir: Direction) -> Bitboard {
    let mut acc = Bitboard::EMPTY;
    let mut cur = Bitboard::from_square(sq);
    loop {
        let next = cur.shift(dir);
        if next.is_empty() {
            break;
        }
        acc |= next;
        cur = next;
    }
    acc
}

fn knight_hops(sq: usize) -> Bitboard {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    const DELTAS: [(i32, i32); 8] =
        [(1, 2), (2, 1), (2, -1), (1, -2), (-1, -2), (-2, -1), (-2, 1), (-1, 2)];
    let mut bb = Bitboard::EMPTY;
    for (dr, df) in DELTAS {
        let r = rank + dr;
        let f = file + df;
        if (0..8).contains(&r) && (0..8).contains(&f) {
            bb.set((r * 8 + f) as usize);
        }
    }
    bb
}

fn king_steps(sq: usize) -> Bitboard {
    let rank = (sq / 8) as i32;
    let file = (sq % 8) as i32;
    let mut bb = Bitboard::EMPTY;
    for dr in -1..=1 {
        for df in -1..=1 {
            if dr == 0 && df == 0 {
                continue;
            }
            let r = rank + dr;
            let f = file + df;
            if (0..8).contains(&r) && (0..8).contains(&f) {
                bb.set((r * 8 + f) as usize);
            }
        }
    }
    bb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knight_center_has_eight_moves() {
        assert_eq!(TABLES.knight_attacks(27).popcount(), 8); // d4
    }

    #[test]
    fn knight_corner_has_two_moves() {
        assert_eq!(TABLES.knight_attacks(0).popcount(), 2); // a1
    }

    #[test]
    fn king_center_has_eight_moves() {
        assert_eq!(TABLES.king_attacks(27).popcount(), 8);
    }

    #[test]
    fn king_corner_has_three_moves() {
        assert_eq!(TABLES.king_attacks(0).popcount(), 3);
    }

    #[test]
    fn between_aligned_squares_is_inclusive_ray() {
        // a1 (0) to a4 (24): inclusive squares a1,a2,a3,a4
        let bb = TABLES.between(0, 24);
        assert!(bb.get(0));
        assert!(bb.get(8));
        assert!(bb.get(16));
        assert!(bb.get(24));
        assert_eq!(bb.popcount(), 4);
    }

    #[test]
    fn between_unaligned_squares_is_empty() {
        // a1 (0) to b3 (17): not aligned
        assert!(TABLES.between(0, 17).is_empty());
    }

    #[test]
    fn between_diagonal() {
        // a1 (0) to d4 (27)
        let bb = TABLES.between(0, 27);
        assert!(bb.get(0));
        assert!(bb.get(9));
        assert!(bb.get(18));
        assert!(bb.get(27));
        assert_eq!(bb.popcount(), 4);
    }

    #[test]
    fn pawn_attacks_white_from_e4() {
        let bb = TABLES.pawn_attacks(28, Color::White); // e4
        assert!(bb.get(35)); // d5
        assert!(bb.get(37)); // f5
        assert_eq!(bb.popcount(), 2);
    }

    #[test]
    fn slider_attacks_rook_truncates_at_blocker() {
        // Rook on a1 (0), friendly piece on a4 (24), enemy none. All the way
        // up blocked by friendly -> a1..a3 reachable via north ray, plus the
        // east ray fully open.
        let occupied = Bitboard::from_square(24);
        let friendly = occupied;
        let attacks = TABLES.slider_attacks(0, &Direction::ROOK, occupied, friendly);
        assert!(attacks.get(8));
        assert!(attacks.get(16));
        assert!(!attacks.get(24)); // friendly blocker excluded
        assert!(!attacks.get(32));
    }

    #[test]
    fn slider_attacks_includes_enemy_blocker_as_capture() {
        let occupied = Bitboard::from_square(24);
        let friendly = Bitboard::EMPTY;
        let attacks = TABLES.slider_attacks(0, &Direction::ROOK, occupied, friendly);
        assert!(attacks.get(24)); // enemy blocker included (capture)
        assert!(!attacks.get(32)); // beyond blocker excluded
    }
}
