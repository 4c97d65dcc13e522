//! Process-global Zobrist key table.
//!
//! Grounded on the teacher's `search/zobrist.rs`: a `OnceLock`-guarded
//! table seeded once from a fixed RNG seed, so hashes are reproducible
//! across runs. Per spec.md §1, key *values* are unspecified beyond "64-bit
//! uniform random, seeded once per process" — this crate owns that seed.

use std::sync::OnceLock;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;

use crate::castling::CastlingRights;
use crate::chess_move::CastlingType;
use crate::color::Color;
use crate::piece::PieceKind;

static ZOBRIST_TABLE: OnceLock<ZobristTable> = OnceLock::new();

pub struct ZobristTable {
    /// `[color][piece_index][square]`
    pieces: [[[u64; 64]; 6]; 2],
    black_to_move: u64,
    /// white kingside, white queenside, black kingside, black queenside
    castling: [u64; 4],
    en_passant_file: [u64; 8],
}

impl ZobristTable {
    fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(0x0123_4567_89AB_CDEF);

        let mut pieces = [[[0u64; 64]; 6]; 2];
        for color_table in &mut pieces {
            for piece_table in color_table {
                for hash in piece_table {
                    *hash = rng.random::<u64>();
                }
            }
        }

        let black_to_move = rng.random::<u64>();

        let mut castling = [0u64; 4];
        for h in &mut castling {
            *h = rng.random::<u64>();
        }

        let mut en_passant_file = [0u64; 8];
        for h in &mut en_passant_file {
            *h = rng.random::<u64>();
        }

        ZobristTable { pieces, black_to_move, castling, en_passant_file }
    }

    /// Returns the process-wide table, initializing it on first call.
    /// Initialization happens-before any use, per `OnceLock`'s guarantee.
    pub fn get() -> &'static ZobristTable {
        ZOBRIST_TABLE.get_or_init(ZobristTable::new)
    }

    #[inline]
    pub fn piece(&self, kind: PieceKind, color: Color, square: usize) -> u64 {
        self.pieces[color.index()][kind.index()][square]
    }

    #[inline]
    pub fn side_to_move(&self) -> u64 {
        self.black_to_move
    }

    #[inline]
    pub fn castling(&self, color: Color, side: CastlingType) -> u64 {
        let idx = match (color, side) {
            (Color::White, CastlingType::Kingside) => 0,
            (Color::White, CastlingType::Queenside) => 1,
            (Color::Black, CastlingType::Kingside) => 2,
            (Color::Black, CastlingType::Queenside) => 3,
        };
        self.castling[idx]
    }

    #[inline]
    pub fn en_passant(&self, file: usize) -> u64 {
        debug_assert!(file < 8);
        self.en_passant_file[file]
    }

    /// Folds all active castling rights into an XOR accumulator.
    pub fn castling_hash(&self, rights: CastlingRights) -> u64 {
        let mut h = 0u64;
        for color in [Color::White, Color::Black] {
            for side in [CastlingType::Kingside, CastlingType::Queenside] {
                if rights.has(color, side) {
                    h ^= self.castling(color, side);
                }
            }
        }
        h
    }
}
