//! Run with: cargo bench -p flip-core --bench flip

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use flip_core::*;

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("Grid");

    for edge in MIN_EDGE..=MAX_EDGE {
        group.bench_with_input(BenchmarkId::new("flip", edge), &edge, |b, &edge| {
            let mut grid = Grid::new(edge);
            let center = cell_count(edge) / 2;
            b.iter(|| grid.flip(black_box(center)));
        });

        group.bench_with_input(BenchmarkId::new("is_won", edge), &edge, |b, &edge| {
            let grid = Grid::new(edge);
            b.iter(|| black_box(&grid).is_won());
        });
    }

    group.finish();
}

fn bench_scramble(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scramble");

    for edge in MIN_EDGE..=MAX_EDGE {
        group.bench_with_input(BenchmarkId::from_parameter(edge), &edge, |b, &edge| {
            let mut grid = Grid::new(edge);
            let mut history = MoveHistory::new();
            let mut source = RandomMoveSource::new(7);
            b.iter(|| scramble(&mut grid, &mut history, &mut source));
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    c.bench_function("undo scrambled history", |b| {
        let mut source = RandomMoveSource::new(11);
        b.iter(|| {
            let mut grid = Grid::new(MAX_EDGE);
            let mut history = MoveHistory::new();
            scramble(&mut grid, &mut history, &mut source);
            while history.undo_last(&mut grid).is_some() {}
            black_box(grid.is_won())
        });
    });
}

criterion_group!(benches, bench_grid, bench_scramble, bench_solve);
criterion_main!(benches);
