/// A chess piece kind. `None` means "no piece" / "no promotion"; `All` is a
/// derived aggregate used only to index the per-color union bitboard and is
/// never stored as the kind of an actual piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    None,
    All,
}

impl PieceKind {
    /// The six real piece kinds, in bitboard-array order.
    pub const ALL_KINDS: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The four pieces a pawn may promote to, queen-first (search order used
    /// by move generation).
    pub const PROMOTION_KINDS: [PieceKind; 4] =
        [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight];

    /// Index into a `[T; 6]` array keyed by real piece kind. Panics on
    /// `None`/`All`, which are never stored per-kind.
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
            PieceKind::None | PieceKind::All => {
                panic!("PieceKind::None/All has no bitboard slot")
            }
        }
    }

    /// Standard material value in centipawns; `King`/`None`/`All` are 0.
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King | PieceKind::None | PieceKind::All => 0,
        }
    }

    /// Standard algebraic piece letter, uppercase (White convention).
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::None | PieceKind::All => '?',
        }
    }

    /// Parses a FEN piece letter (either case) into `(kind, color)`.
    pub fn from_fen_char(c: char) -> Option<(PieceKind, crate::color::Color)> {
        use crate::color::Color;
        let color = if c.is_ascii_uppercase() { Color::White } else { Color::Black };
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_matches_array_order() {
        for (i, kind) in PieceKind::ALL_KINDS.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn fen_char_round_trips_letter() {
        for kind in PieceKind::ALL_KINDS {
            let (parsed, color) = PieceKind::from_fen_char(kind.letter()).unwrap();
            assert_eq!(parsed, kind);
            assert_eq!(color, crate::color::Color::White);
        }
    }

    #[test]
    fn lowercase_is_black() {
        let (kind, color) = PieceKind::from_fen_char('n').unwrap();
        assert_eq!(kind, PieceKind::Knight);
        assert_eq!(color, crate::color::Color::Black);
    }
}
