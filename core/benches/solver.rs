use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use lightsout_core::{
    GameConfig, LayoutGenerator, LayoutPolicy, LightGrid, RandomLayoutGenerator, solve,
};

const SIZES: [(u8, u8); 4] = [(5, 5), (10, 10), (20, 20), (40, 40)];

fn board(size: (u8, u8)) -> LightGrid {
    let config = GameConfig::new(size, 0.5).expect("bench config is valid");
    RandomLayoutGenerator::new(0xdead_beef, LayoutPolicy::Solvable)
        .generate(config)
        .expect("bench config is valid")
}

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("flip");
    for size in SIZES {
        let grid = board(size);
        let center = (size.0 / 2, size.1 / 2);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size.0, size.1)),
            &grid,
            |b, grid| b.iter(|| black_box(grid).flip(center)),
        );
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for size in SIZES {
        let grid = board(size);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", size.0, size.1)),
            &grid,
            |b, grid| b.iter(|| solve(black_box(grid))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_flip, bench_solve);
criterion_main!(benches);
