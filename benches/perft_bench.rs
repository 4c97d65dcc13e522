use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gumbel_chess::{fen, perft};

fn criterion_benchmark(c: &mut Criterion) {
    let start = fen::parse(fen::START_FEN).unwrap();
    let kiwipete =
        fen::parse("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1").unwrap();

    let mut group = c.benchmark_group("perft");
    group.sample_size(10);
    group.bench_function("start_depth_4", |b| {
        b.iter(|| black_box(perft(&start, 4)));
    });
    group.bench_function("kiwipete_depth_3", |b| {
        b.iter(|| black_box(perft(&kiwipete, 3)));
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
