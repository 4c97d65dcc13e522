use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

/// One of the 8 compass directions a sliding or stepping piece can move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub const BISHOP: [Direction; 4] = [
        Direction::NorthEast,
        Direction::SouthEast,
        Direction::SouthWest,
        Direction::NorthWest,
    ];

    pub const ROOK: [Direction; 4] =
        [Direction::North, Direction::East, Direction::South, Direction::West];

    /// Signed square offset for a single step in this direction.
    #[inline]
    const fn offset(self) -> i8 {
        match self {
            Direction::North => 8,
            Direction::South => -8,
            Direction::East => 1,
            Direction::West => -1,
            Direction::NorthEast => 9,
            Direction::SouthEast => -7,
            Direction::SouthWest => -9,
            Direction::NorthWest => 7,
        }
    }

    /// True for directions whose ray index increases (used to pick
    /// lowest-set-bit vs. highest-set-bit when truncating a sliding ray).
    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::NorthEast | Direction::East | Direction::NorthWest
        )
    }
}

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_H: u64 = FILE_A << 7;
pub const RANK_1: u64 = 0xFF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_3: u64 = RANK_1 << 16;
pub const RANK_4: u64 = RANK_1 << 24;
pub const RANK_5: u64 = RANK_1 << 32;
pub const RANK_6: u64 = RANK_1 << 40;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

/// A 64-bit occupancy set: bit `i` encodes whether some predicate holds on
/// square `i` (`i = rank * 8 + file`, `A1 = 0`, `H8 = 63`).
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Bitboard(pub u64);

impl Bitboard {
    pub const EMPTY: Bitboard = Bitboard(0);
    pub const FULL: Bitboard = Bitboard(u64::MAX);

    #[inline]
    pub const fn new(bits: u64) -> Self {
        Bitboard(bits)
    }

    #[inline]
    pub const fn from_square(sq: usize) -> Self {
        Bitboard(1u64 << sq)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn set(&mut self, i: usize) {
        self.0 |= 1u64 << i;
    }

    #[inline]
    pub fn clear_bit(&mut self, i: usize) {
        self.0 &= !(1u64 << i);
    }

    #[inline]
    pub const fn get(self, i: usize) -> bool {
        self.0 & (1u64 << i) != 0
    }

    #[inline]
    pub const fn get_rf(self, rank: usize, file: usize) -> bool {
        self.get(rank * 8 + file)
    }

    #[inline]
    pub const fn set_rf(mut self, rank: usize, file: usize) -> Self {
        self.0 |= 1u64 << (rank * 8 + file);
        self
    }

    /// Lowest set bit index (closest to a1), or -1 if empty.
    #[inline]
    pub const fn lowest_set_bit(self) -> i32 {
        if self.0 == 0 { -1 } else { self.0.trailing_zeros() as i32 }
    }

    /// Highest set bit index (closest to h8), or -1 if empty.
    #[inline]
    pub const fn highest_set_bit(self) -> i32 {
        if self.0 == 0 { -1 } else { 63 - self.0.leading_zeros() as i32 }
    }

    /// Returns and clears the lowest set bit; -1 if empty.
    #[inline]
    pub fn pop_lowest_set_bit(&mut self) -> i32 {
        let i = self.lowest_set_bit();
        if i >= 0 {
            self.0 &= self.0 - 1;
        }
        i
    }

    /// Returns and clears the highest set bit; -1 if empty.
    #[inline]
    pub fn pop_highest_set_bit(&mut self) -> i32 {
        let i = self.highest_set_bit();
        if i >= 0 {
            self.0 &= !(1u64 << i);
        }
        i
    }

    #[inline]
    pub const fn popcount(self) -> u32 {
        self.0.count_ones()
    }

    /// Shifts in the given direction with wrap-safe file masking: eastward
    /// shifts clear the H-file first, westward shifts clear the A-file
    /// first, so bits never wrap around the board edge.
    #[inline]
    pub const fn shift(self, dir: Direction) -> Self {
        let masked = match dir {
            Direction::East | Direction::NorthEast | Direction::SouthEast => self.0 & !FILE_H,
            Direction::West | Direction::NorthWest | Direction::SouthWest => self.0 & !FILE_A,
            Direction::North | Direction::South => self.0,
        };
        let offset = dir.offset();
        let shifted = if offset >= 0 { masked << offset } else { masked >> (-offset) };
        Bitboard(shifted)
    }

    /// Retains bits with index `< i` (bit index 64 retains all bits).
    #[inline]
    pub const fn clear_bits_above(self, i: i32) -> Self {
        if i >= 64 {
            self
        } else if i <= 0 {
            Bitboard::EMPTY
        } else {
            Bitboard(self.0 & ((1u64 << i) - 1))
        }
    }

    /// Retains bits with index `> i` (i < 0 retains all bits).
    #[inline]
    pub const fn clear_bits_below(self, i: i32) -> Self {
        if i < 0 {
            self
        } else if i >= 63 {
            Bitboard::EMPTY
        } else {
            Bitboard(self.0 & !((1u64 << (i + 1)) - 1))
        }
    }

    pub fn print(&self) {
        for rank in (0..8).rev() {
            let mut line = String::new();
            for file in 0..8 {
                line.push(if self.get_rf(rank, file) { '1' } else { '.' });
                line.push(' ');
            }
            println!("{line}");
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitand(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 & rhs.0)
    }
}
impl BitOr for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 | rhs.0)
    }
}
impl BitXor for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn bitxor(self, rhs: Bitboard) -> Bitboard {
        Bitboard(self.0 ^ rhs.0)
    }
}
impl Not for Bitboard {
    type Output = Bitboard;
    #[inline]
    fn not(self) -> Bitboard {
        Bitboard(!self.0)
    }
}
impl BitAndAssign for Bitboard {
    #[inline]
    fn bitand_assign(&mut self, rhs: Bitboard) {
        self.0 &= rhs.0;
    }
}
impl BitOrAssign for Bitboard {
    #[inline]
    fn bitor_assign(&mut self, rhs: Bitboard) {
        self.0 |= rhs.0;
    }
}
impl BitXorAssign for Bitboard {
    #[inline]
    fn bitxor_assign(&mut self, rhs: Bitboard) {
        self.0 ^= rhs.0;
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bitboard({:#018x})", self.0)
    }
}

impl Iterator for Bitboard {
    type Item = usize;

    /// Iterating a bitboard yields and clears its set squares, lowest first.
    #[inline]
    fn next(&mut self) -> Option<usize> {
        let i = self.pop_lowest_set_bit();
        if i < 0 { None } else { Some(i as usize) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get() {
        let mut bb = Bitboard::EMPTY;
        for i in 0..64 {
            bb.set(i);
            assert!(bb.get(i));
        }
    }

    #[test]
    fn clear_then_get_false() {
        let mut bb = Bitboard::FULL;
        bb.clear_bit(10);
        assert!(!bb.get(10));
    }

    #[test]
    fn popcount_matches_empty() {
        assert!(Bitboard::EMPTY.is_empty());
        assert_eq!(Bitboard::EMPTY.popcount(), 0);
        let mut bb = Bitboard::EMPTY;
        bb.set(5);
        assert!(!bb.is_empty());
        assert_eq!(bb.popcount(), 1);
    }

    #[test]
    fn east_shift_drops_h_file() {
        let bb = Bitboard::new(FILE_H);
        let shifted = bb.shift(Direction::East);
        assert!(shifted.is_empty());
    }

    #[test]
    fn east_shift_of_files_a_to_g_stays_in_b_to_h() {
        let bb = Bitboard::new(!FILE_H);
        let shifted = bb.shift(Direction::East);
        assert_eq!(shifted.0 & FILE_A, 0);
        assert_eq!(shifted.0 & !FILE_A, shifted.0);
    }

    #[test]
    fn west_shift_drops_a_file() {
        let bb = Bitboard::new(FILE_A);
        let shifted = bb.shift(Direction::West);
        assert!(shifted.is_empty());
    }

    #[test]
    fn north_south_round_trip() {
        let bb = Bitboard::from_square(20);
        let up = bb.shift(Direction::North);
        assert_eq!(up.shift(Direction::South), bb);
    }

    #[test]
    fn clear_above_and_below_reconstruct() {
        let bb = Bitboard::FULL;
        for i in 1..64 {
            let combined = bb.clear_bits_above(i) | bb.clear_bits_below(i - 1);
            assert_eq!(combined, bb, "mismatch at i={i}");
        }
    }

    #[test]
    fn clear_bits_above_64_is_identity() {
        let bb = Bitboard::new(0xDEADBEEF);
        assert_eq!(bb.clear_bits_above(64), bb);
    }

    #[test]
    fn lowest_and_highest_set_bit_on_empty() {
        assert_eq!(Bitboard::EMPTY.lowest_set_bit(), -1);
        assert_eq!(Bitboard::EMPTY.highest_set_bit(), -1);
    }

    #[test]
    fn pop_lowest_set_bit_walks_in_order() {
        let mut bb = Bitboard::new(0b1010);
        assert_eq!(bb.pop_lowest_set_bit(), 1);
        assert_eq!(bb.pop_lowest_set_bit(), 3);
        assert_eq!(bb.pop_lowest_set_bit(), -1);
    }

    #[test]
    fn iterator_yields_set_squares_ascending() {
        let bb = Bitboard::new(0b1010);
        let squares: Vec<usize> = bb.collect();
        assert_eq!(squares, vec![1, 3]);
    }
}
