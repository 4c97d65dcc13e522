//! Strict FEN parsing and serialization.
//!
//! Generalizes the teacher's `fen/parser.rs` (`FENParseError`, `ParsedFEN`)
//! from the square-array `Board` to the bitboard `Position`. Parsing is
//! strict (Open Question 5): every field is validated and a malformed FEN
//! is rejected with a [`FenError`], never silently coerced. The sole
//! leniency is trailing whitespace around the six fields.

use crate::castling::CastlingRights;
use crate::chess_move::{parse_square, square_name, CastlingType};
use crate::color::Color;
use crate::error::FenError;
use crate::piece::PieceKind;
use crate::position::Position;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parses a FEN string into a [`Position`]. Rejects malformed input; the
/// only tolerated looseness is leading/trailing whitespace.
pub fn parse(fen: &str) -> Result<Position, FenError> {
    let fen = fen.trim();
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() != 6 {
        return Err(FenError::InsufficientFields { found: fields.len() });
    }

    let mut pos = Position::empty();
    parse_placement(&mut pos, fields[0])?;
    pos.side_to_move = parse_active_color(fields[1])?;
    pos.castling_rights = parse_castling(fields[2])?;
    pos.en_passant = parse_en_passant(fields[3])?;
    pos.halfmove_clock = parse_halfmove_clock(fields[4])?;
    pos.fullmove_number = parse_fullmove_number(fields[5])?;
    pos.hash = pos.recompute_hash();
    *pos.history.entry(pos.hash).or_insert(0) += 1;
    Ok(pos)
}

fn parse_placement(pos: &mut Position, field: &str) -> Result<(), FenError> {
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::InvalidRankCount(ranks.len()));
    }

    for (rank_from_top, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - rank_from_top;
        let mut file = 0usize;
        for c in rank_str.chars() {
            if let Some(empty_count) = c.to_digit(10) {
                file += empty_count as usize;
            } else {
                let (kind, color) = PieceKind::from_fen_char(c)
                    .ok_or(FenError::InvalidPieceChar(c))?;
                if file >= 8 {
                    return Err(FenError::InvalidRankLength { rank, files: file + 1 });
                }
                pos.add_piece(color, kind, rank * 8 + file);
                file += 1;
            }
        }
        if file != 8 {
            return Err(FenError::InvalidRankLength { rank, files: file });
        }
    }
    Ok(())
}

fn parse_active_color(field: &str) -> Result<Color, FenError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        other => Err(FenError::InvalidActiveColor(other.to_string())),
    }
}

fn parse_castling(field: &str) -> Result<CastlingRights, FenError> {
    if field == "-" {
        return Ok(CastlingRights::empty());
    }
    let mut rights = CastlingRights::empty();
    for c in field.chars() {
        match c {
            'K' => rights.add(Color::White, CastlingType::Kingside),
            'Q' => rights.add(Color::White, CastlingType::Queenside),
            'k' => rights.add(Color::Black, CastlingType::Kingside),
            'q' => rights.add(Color::Black, CastlingType::Queenside),
            other => return Err(FenError::InvalidCastlingChar(other)),
        }
    }
    Ok(rights)
}

fn parse_en_passant(field: &str) -> Result<crate::bitboard::Bitboard, FenError> {
    if field == "-" {
        return Ok(crate::bitboard::Bitboard::EMPTY);
    }
    let sq = parse_square(field).ok_or_else(|| FenError::InvalidEnPassantSquare(field.to_string()))?;
    Ok(crate::bitboard::Bitboard::from_square(sq))
}

fn parse_halfmove_clock(field: &str) -> Result<u32, FenError> {
    field.parse::<u32>().map_err(|_| FenError::InvalidHalfmoveClock(field.to_string()))
}

fn parse_fullmove_number(field: &str) -> Result<u32, FenError> {
    let n = field.parse::<u32>().map_err(|_| FenError::InvalidFullmoveNumber(field.to_string()))?;
    if n == 0 {
        return Err(FenError::InvalidFullmoveNumber(field.to_string()));
    }
    Ok(n)
}

/// Serializes a [`Position`] back into FEN notation.
pub fn to_fen(pos: &Position) -> String {
    let mut ranks = Vec::with_capacity(8);
    for rank in (0..8).rev() {
        let mut rank_str = String::new();
        let mut empty_run = 0u32;
        for file in 0..8 {
            let sq = rank * 8 + file;
            match pos.piece_on(sq) {
                None => empty_run += 1,
                Some((color, kind)) => {
                    if empty_run > 0 {
                        rank_str.push_str(&empty_run.to_string());
                        empty_run = 0;
                    }
                    let letter = kind.letter();
                    rank_str.push(match color {
                        Color::White => letter,
                        Color::Black => letter.to_ascii_lowercase(),
                    });
                }
            }
        }
        if empty_run > 0 {
            rank_str.push_str(&empty_run.to_string());
        }
        ranks.push(rank_str);
    }
    let placement = ranks.join("/");

    let active_color = match pos.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    if pos.castling_rights.has(Color::White, CastlingType::Kingside) {
        castling.push('K');
    }
    if pos.castling_rights.has(Color::White, CastlingType::Queenside) {
        castling.push('Q');
    }
    if pos.castling_rights.has(Color::Black, CastlingType::Kingside) {
        castling.push('k');
    }
    if pos.castling_rights.has(Color::Black, CastlingType::Queenside) {
        castling.push('q');
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let en_passant = match pos.en_passant_square() {
        Some(sq) => square_name(sq),
        None => "-".to_string(),
    };

    format!(
        "{} {} {} {} {} {}",
        placement, active_color, castling, en_passant, pos.halfmove_clock, pos.fullmove_number
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_fen_round_trips() {
        let pos = parse(START_FEN).unwrap();
        assert_eq!(to_fen(&pos), START_FEN);
    }

    #[test]
    fn start_position_piece_count_and_side() {
        let pos = parse(START_FEN).unwrap();
        assert_eq!(pos.all_occupied().popcount(), 32);
        assert_eq!(pos.side_to_move, Color::White);
        assert!(pos.castling_rights.has(Color::White, CastlingType::Kingside));
        assert!(pos.castling_rights.has(Color::Black, CastlingType::Queenside));
        assert!(pos.en_passant_square().is_none());
    }

    #[test]
    fn kiwipete_round_trips() {
        let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let pos = parse(kiwipete).unwrap();
        assert_eq!(to_fen(&pos), kiwipete);
    }

    #[test]
    fn rejects_wrong_field_count() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -").unwrap_err();
        assert_eq!(err, FenError::InsufficientFields { found: 5 });
    }

    #[test]
    fn rejects_bad_rank_count() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidRankCount(7)));
    }

    #[test]
    fn rejects_short_rank() {
        let err = parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err();
        assert!(matches!(err, FenError::InvalidRankLength { .. }));
    }

    #[test]
    fn rejects_invalid_piece_char() {
        let err = parse("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap_err();
        assert_eq!(err, FenError::InvalidPieceChar('x'));
    }

    #[test]
    fn rejects_invalid_active_color() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").unwrap_err();
        assert_eq!(err, FenError::InvalidActiveColor("x".to_string()));
    }

    #[test]
    fn rejects_invalid_castling_char() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkx - 0 1").unwrap_err();
        assert_eq!(err, FenError::InvalidCastlingChar('x'));
    }

    #[test]
    fn rejects_invalid_en_passant() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1").unwrap_err();
        assert_eq!(err, FenError::InvalidEnPassantSquare("z9".to_string()));
    }

    #[test]
    fn rejects_non_numeric_halfmove_clock() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1").unwrap_err();
        assert_eq!(err, FenError::InvalidHalfmoveClock("x".to_string()));
    }

    #[test]
    fn rejects_zero_fullmove_number() {
        let err = parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0").unwrap_err();
        assert_eq!(err, FenError::InvalidFullmoveNumber("0".to_string()));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        let padded = format!("  {START_FEN}  \n");
        let pos = parse(&padded).unwrap();
        assert_eq!(to_fen(&pos), START_FEN);
    }

    #[test]
    fn en_passant_square_parses() {
        let pos = parse("rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 2").unwrap();
        assert_eq!(pos.en_passant_square(), Some(crate::chess_move::parse_square("d6").unwrap()));
    }
}
