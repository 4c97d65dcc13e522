use std::fmt;

/// Errors surfaced by FEN parsing.
///
/// Parsing is strict (see [`crate::fen::parse`]): any malformed field is
/// reported rather than silently tolerated, with the sole leniency that
/// trailing whitespace around the six fields is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    /// FEN string doesn't have enough whitespace-separated fields (needs 6).
    InsufficientFields { found: usize },
    /// Piece placement doesn't have exactly 8 ranks.
    InvalidRankCount(usize),
    /// A rank doesn't sum to exactly 8 files.
    InvalidRankLength { rank: usize, files: usize },
    /// Unrecognized piece letter in the placement field.
    InvalidPieceChar(char),
    /// Active color field was not `w` or `b`.
    InvalidActiveColor(String),
    /// Unrecognized character in the castling field.
    InvalidCastlingChar(char),
    /// En-passant field was neither `-` nor a valid algebraic square.
    InvalidEnPassantSquare(String),
    /// Halfmove clock field did not parse as a non-negative integer.
    InvalidHalfmoveClock(String),
    /// Fullmove number field did not parse as a positive integer.
    InvalidFullmoveNumber(String),
}

impl fmt::Display for FenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientFields { found } => {
                write!(f, "FEN requires 6 fields, found {found}")
            }
            Self::InvalidRankCount(count) => {
                write!(f, "piece placement has {count} ranks, expected 8")
            }
            Self::InvalidRankLength { rank, files } => {
                write!(f, "rank {} has {} files, expected 8", rank + 1, files)
            }
            Self::InvalidPieceChar(c) => write!(f, "invalid piece character: '{c}'"),
            Self::InvalidActiveColor(s) => {
                write!(f, "invalid active color '{s}', expected 'w' or 'b'")
            }
            Self::InvalidCastlingChar(c) => write!(f, "invalid castling character: '{c}'"),
            Self::InvalidEnPassantSquare(s) => write!(f, "invalid en passant square: '{s}'"),
            Self::InvalidHalfmoveClock(s) => write!(f, "invalid halfmove clock: '{s}'"),
            Self::InvalidFullmoveNumber(s) => write!(f, "invalid fullmove number: '{s}'"),
        }
    }
}

impl std::error::Error for FenError {}

/// Crate-wide error type.
///
/// FEN parse errors are reported to the caller and do not taint later
/// operations. An illegal move handed to [`crate::position::Position::make_move`]
/// is only checked via `debug_assert!` (undefined behavior in release is
/// acceptable per spec) since the caller is expected to obtain moves from
/// [`crate::movegen::generate_legal_moves`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    Fen(FenError),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fen(e) => write!(f, "FEN error: {e}"),
        }
    }
}

impl std::error::Error for ChessError {}

impl From<FenError> for ChessError {
    fn from(e: FenError) -> Self {
        Self::Fen(e)
    }
}
