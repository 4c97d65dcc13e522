//! Runs perft over the reference positions and asserts the node counts
//! match, grounded on `laura_core`'s `examples/perft.rs` binary (the one
//! pack repo shipping a dedicated perft driver) and the teacher's own
//! `src/bin/*` convention of a one-off executable per task.

use std::time::Instant;

use gumbel_chess::{fen, perft};

const PERFT_TESTS: &[(&str, u32, u64)] = &[
    ("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 4, 197_281),
    ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 3, 97_862),
    ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4, 43_238),
    ("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1", 1, 6),
    ("r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 1", 1, 46),
];

fn main() {
    let mut all_passed = true;
    for &(start_fen, depth, expected) in PERFT_TESTS {
        let pos = fen::parse(start_fen).expect("perft fixture FEN must parse");

        let start = Instant::now();
        let nodes = perft(&pos, depth);
        let elapsed = start.elapsed();
        let nps = nodes as f64 / elapsed.as_secs_f64().max(1e-9);

        let status = if nodes == expected { "ok" } else { "FAILED" };
        if nodes != expected {
            all_passed = false;
        }
        println!(
            "{status}  depth {depth}  {nodes} nodes ({expected} expected)  {elapsed:?}  {nps:.0} nodes/s  {start_fen}"
        );
    }

    if !all_passed {
        std::process::exit(1);
    }
}
