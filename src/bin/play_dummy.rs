//! Plays a full self-play game with `GumbelMcts` driven by the
//! deterministic `UniformEvaluator`, printing each move in UCI form.
//! Grounded on the teacher's `main.rs` move-printing loop, simplified to
//! this crate's actual surface (no opening book, no terminal settings).

use gumbel_chess::{fen, generate_legal_moves, GumbelMcts, UniformEvaluator};

const MAX_PLIES: u32 = 200;

fn main() {
    let mut pos = fen::parse(fen::START_FEN).expect("start FEN must parse");
    let evaluator = UniformEvaluator;
    let mut mcts = GumbelMcts::with_budget(&evaluator, 0, 64);

    println!("starting position");
    for ply in 1..=MAX_PLIES {
        if generate_legal_moves(&pos).is_empty() {
            if pos.in_check(pos.side_to_move) {
                println!("checkmate, {:?} to move has no moves", pos.side_to_move);
            } else {
                println!("stalemate");
            }
            return;
        }
        if pos.is_draw() {
            println!("draw");
            return;
        }

        let mv = mcts.get_best_move(&pos).expect("legal moves exist, checked above");
        println!("{ply:>3}. {:?} plays {}", pos.side_to_move, mv.to_uci());
        pos = pos.apply_move(mv);
    }

    println!("reached ply limit ({MAX_PLIES}) without a decisive result");
}
