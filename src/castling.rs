use crate::chess_move::CastlingType;
use crate::color::Color;

const WHITE_KING_SIDE: u8 = 0b0001;
const WHITE_QUEEN_SIDE: u8 = 0b0010;
const BLACK_KING_SIDE: u8 = 0b0100;
const BLACK_QUEEN_SIDE: u8 = 0b1000;

/// Castling rights for both colors and both sides, packed as a 4-bit flag
/// set (logically a 2x2 boolean array), per the teacher's
/// `board/castling/castling_rights.rs`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const fn empty() -> Self {
        CastlingRights(0)
    }

    pub const fn full() -> Self {
        CastlingRights(0b1111)
    }

    const fn flag(color: Color, side: CastlingType) -> u8 {
        match (color, side) {
            (Color::White, CastlingType::Kingside) => WHITE_KING_SIDE,
            (Color::White, CastlingType::Queenside) => WHITE_QUEEN_SIDE,
            (Color::Black, CastlingType::Kingside) => BLACK_KING_SIDE,
            (Color::Black, CastlingType::Queenside) => BLACK_QUEEN_SIDE,
        }
    }

    #[inline]
    pub const fn has(&self, color: Color, side: CastlingType) -> bool {
        self.0 & Self::flag(color, side) != 0
    }

    #[inline]
    pub fn remove(&mut self, color: Color, side: CastlingType) {
        self.0 &= !Self::flag(color, side);
    }

    #[inline]
    pub fn add(&mut self, color: Color, side: CastlingType) {
        self.0 |= Self::flag(color, side);
    }

    /// Clears both castling rights for `color` (used when its king moves).
    #[inline]
    pub fn remove_both(&mut self, color: Color) {
        self.remove(color, CastlingType::Kingside);
        self.remove(color, CastlingType::Queenside);
    }

    pub const fn raw(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_rights() {
        let rights = CastlingRights::empty();
        assert!(!rights.has(Color::White, CastlingType::Kingside));
        assert!(!rights.has(Color::Black, CastlingType::Queenside));
    }

    #[test]
    fn full_has_all_rights() {
        let rights = CastlingRights::full();
        assert!(rights.has(Color::White, CastlingType::Kingside));
        assert!(rights.has(Color::White, CastlingType::Queenside));
        assert!(rights.has(Color::Black, CastlingType::Kingside));
        assert!(rights.has(Color::Black, CastlingType::Queenside));
    }

    #[test]
    fn remove_is_independent_per_side() {
        let mut rights = CastlingRights::full();
        rights.remove(Color::White, CastlingType::Kingside);
        assert!(!rights.has(Color::White, CastlingType::Kingside));
        assert!(rights.has(Color::White, CastlingType::Queenside));
        assert!(rights.has(Color::Black, CastlingType::Kingside));
    }

    #[test]
    fn remove_both_clears_only_that_color() {
        let mut rights = CastlingRights::full();
        rights.remove_both(Color::White);
        assert!(!rights.has(Color::White, CastlingType::Kingside));
        assert!(!rights.has(Color::White, CastlingType::Queenside));
        assert!(rights.has(Color::Black, CastlingType::Kingside));
        assert!(rights.has(Color::Black, CastlingType::Queenside));
    }

    #[test]
    fn add_is_idempotent() {
        let mut rights = CastlingRights::empty();
        rights.add(Color::Black, CastlingType::Queenside);
        rights.add(Color::Black, CastlingType::Queenside);
        assert_eq!(rights, {
            let mut r = CastlingRights::empty();
            r.add(Color::Black, CastlingType::Queenside);
            r
        });
    }
}
