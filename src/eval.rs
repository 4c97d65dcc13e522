//! The evaluator oracle contract and two concrete evaluators.
//!
//! The trait is the narrow capability interface spec.md §9 calls for ("keep
//! the evaluator behind a narrow capability interface... the MCTS takes
//! this interface by reference so a stub implementation can drive tests"),
//! mirroring the teacher's `eval/evaluator.rs` shape (a small struct/fn pair
//! the search calls synchronously) but generalized from a bare `i32`
//! centipawn score into the opaque `(value, policy)` pair a learned
//! two-headed network would actually return.

use crate::chess_move::Move;
use crate::color::Color;
use crate::movegen::generate_legal_moves;
use crate::piece::PieceKind;
use crate::position::Position;

/// Supplies a scalar value and a move policy for a position, standing in
/// for a neural network. Input tensorization, model loading, and training
/// are out of scope; this crate only consumes the interface.
pub trait Evaluator {
    /// Returns `(value, policy)`: `value` is in `[-1, +1]` from the
    /// perspective of the side to move; `policy` is a sequence of
    /// `(Move, score)` pairs interpreted as an unnormalized distribution
    /// over a superset of the legal moves. The caller renormalizes over
    /// the actual legal set.
    fn evaluate(&self, pos: &Position) -> (f32, Vec<(Move, f32)>);
}

/// Deterministic test double: zero value, uniform policy over the legal
/// moves. Grounded on spec.md §8's "deterministic dummy evaluator
/// returning uniform policy and zero value".
pub struct UniformEvaluator;

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, pos: &Position) -> (f32, Vec<(Move, f32)>) {
        let moves = generate_legal_moves(pos);
        let policy = moves.into_iter().map(|m| (m, 1.0)).collect();
        (0.0, policy)
    }
}

/// Material-plus-piece-square-table evaluator, adapted from the teacher's
/// `eval/evaluator.rs` (`Evaluator::material_count`/`positional_score`/
/// `piece_square_value`) onto bitboards. Serves both as a usable heuristic
/// evaluator and as the fixture for tests that want a non-trivial but
/// reproducible policy/value pair.
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> (f32, Vec<(Move, f32)>) {
        let white_centipawns = material_and_positional_score(pos, Color::White)
            - material_and_positional_score(pos, Color::Black);
        let mover_centipawns = match pos.side_to_move {
            Color::White => white_centipawns,
            Color::Black => -white_centipawns,
        };
        let value = (mover_centipawns as f32 / 400.0).tanh();

        let moves = generate_legal_moves(pos);
        let policy = moves
            .into_iter()
            .map(|m| {
                let mut score = 1.0;
                if m.is_capture() {
                    if let Some((_, captured_kind)) = captured_piece_kind(pos, m) {
                        score += captured_kind.value() as f32 / 100.0;
                    }
                }
                if m.is_promotion() {
                    score += m.promotion.value() as f32 / 100.0;
                }
                (m, score)
            })
            .collect();
        (value, policy)
    }
}

fn captured_piece_kind(pos: &Position, m: Move) -> Option<(Color, PieceKind)> {
    use crate::chess_move::MoveType;
    match m.move_type {
        MoveType::Capture => pos.piece_on(m.dest),
        MoveType::EnPassantCapture => {
            let captured_sq = match pos.side_to_move {
                Color::White => m.dest - 8,
                Color::Black => m.dest + 8,
            };
            pos.piece_on(captured_sq)
        }
        _ => None,
    }
}

fn material_and_positional_score(pos: &Position, color: Color) -> i32 {
    let mut total = 0;
    for kind in PieceKind::ALL_KINDS {
        for sq in pos.pieces_of(color, kind) {
            total += kind.value();
            total += piece_square_value(kind, sq, color);
        }
    }
    total
}

fn piece_square_value(kind: PieceKind, sq: usize, color: Color) -> i32 {
    let sq = match color {
        Color::White => sq,
        Color::Black => sq ^ 56,
    };
    match kind {
        PieceKind::Pawn => PAWN_TABLE[sq],
        PieceKind::Knight => KNIGHT_TABLE[sq],
        PieceKind::Bishop => BISHOP_TABLE[sq],
        PieceKind::Rook => ROOK_TABLE[sq],
        PieceKind::Queen => QUEEN_TABLE[sq],
        PieceKind::King => KING_MIDDLEGAME_TABLE[sq],
        PieceKind::None | PieceKind::All => 0,
    }
}

const PAWN_TABLE: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, 50, 50, 50, 50, 50, 50, 50, 50, 10, 10, 20, 30, 30, 20, 10, 10, 5, 5,
    10, 25, 25, 10, 5, 5, 0, 0, 0, 20, 20, 0, 0, 0, 5, -5, -10, 0, 0, -10, -5, 5, 5, 10, 10, -20,
    -20, 10, 10, 5, 0, 0, 0, 0, 0, 0, 0, 0,
];

const KNIGHT_TABLE: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50, -40, -20, 0, 0, 0, 0, -20, -40, -30, 0, 10, 15, 15, 10,
    0, -30, -30, 5, 15, 20, 20, 15, 5, -30, -30, 0, 15, 20, 20, 15, 0, -30, -30, 5, 10, 15, 15, 10,
    5, -30, -40, -20, 0, 5, 5, 0, -20, -40, -50, -40, -30, -30, -30, -30, -40, -50,
];

const BISHOP_TABLE: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20, -10, 0, 0, 0, 0, 0, 0, -10, -10, 0, 5, 10, 10, 5, 0,
    -10, -10, 5, 5, 10, 10, 5, 5, -10, -10, 0, 10, 10, 10, 10, 0, -10, -10, 10, 10, 10, 10, 10, 10,
    -10, -10, 5, 0, 0, 0, 0, 5, -10, -20, -10, -10, -10, -10, -10, -10, -20,
];

const ROOK_TABLE: [i32; 64] = [
    0, 0, 0, 0, 0, 0, 0, 0, 5, 10, 10, 10, 10, 10, 10, 5, -5, 0, 0, 0, 0, 0, 0, -5, -5, 0, 0, 0, 0,
    0, 0, -5, -5, 0, 0, 0, 0, 0, 0, -5, -5, 0, 0, 0, 0, 0, 0, -5, -5, 0, 0, 0, 0, 0, 0, -5, 0, 0, 0,
    5, 5, 0, 0, 0,
];

const QUEEN_TABLE: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20, -10, 0, 0, 0, 0, 0, 0, -10, -10, 0, 5, 5, 5, 5, 0, -10,
    -5, 0, 5, 5, 5, 5, 0, -5, 0, 0, 5, 5, 5, 5, 0, -5, -10, 5, 5, 5, 5, 5, 0, -10, -10, 0, 5, 0, 0,
    0, 0, -10, -20, -10, -10, -5, -5, -10, -10, -20,
];

const KING_MIDDLEGAME_TABLE: [i32; 64] = [
    -30, -40, -40, -50, -50, -40, -40, -30, -30, -40, -40, -50, -50, -40, -40, -30, -30, -40, -40,
    -50, -50, -40, -40, -30, -30, -40, -40, -50, -50, -40, -40, -30, -20, -30, -30, -40, -40, -30,
    -30, -20, -10, -20, -20, -20, -20, -20, -20, -10, 20, 20, 0, 0, 0, 0, 20, 20, 20, 30, 10, 0, 0,
    10, 30, 20,
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Position;

    #[test]
    fn uniform_evaluator_is_zero_value_and_flat_policy() {
        let pos = Position::new_start();
        let (value, policy) = UniformEvaluator.evaluate(&pos);
        assert_eq!(value, 0.0);
        assert_eq!(policy.len(), 20);
        assert!(policy.iter().all(|&(_, score)| score == 1.0));
    }

    #[test]
    fn material_evaluator_starting_position_is_near_zero() {
        let pos = Position::new_start();
        let (value, _) = MaterialEvaluator.evaluate(&pos);
        assert!(value.abs() < 0.05, "expected near-zero value, got {value}");
    }

    #[test]
    fn material_evaluator_favors_material_advantage() {
        let pos = crate::fen::parse("4k3/8/8/8/8/8/8/Q3K3 w - - 0 1").unwrap();
        let (value, _) = MaterialEvaluator.evaluate(&pos);
        assert!(value > 0.5, "expected White-to-move-up-a-queen value near +1, got {value}");
    }

    #[test]
    fn material_evaluator_value_is_from_movers_perspective() {
        let pos = crate::fen::parse("4k3/8/8/8/8/8/8/Q3K3 b - - 0 1").unwrap();
        let (value, _) = MaterialEvaluator.evaluate(&pos);
        assert!(value < -0.5, "expected Black-to-move-down-a-queen value near -1, got {value}");
    }

    #[test]
    fn material_evaluator_scores_captures_above_quiet_moves() {
        let pos = crate::fen::parse("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
        let (_, policy) = MaterialEvaluator.evaluate(&pos);
        let capture_score = policy
            .iter()
            .find(|(m, _)| m.is_capture())
            .map(|&(_, s)| s)
            .expect("exd5 should be a legal capture");
        let quiet_score = policy
            .iter()
            .find(|(m, _)| !m.is_capture())
            .map(|&(_, s)| s)
            .expect("at least one quiet move should exist");
        assert!(capture_score > quiet_score);
    }
}
