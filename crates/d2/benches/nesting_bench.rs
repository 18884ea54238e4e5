//! Benchmarks for sheet nesting.
//!
//! Measures gap computation on populated sheets and batch nesting at
//! various scales.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use panel_nest_d2::{
    GapCalculator, NestingConfig, NestingContext, NestingEngine, Rectangle, Rotation, Sheet,
};

fn boards(n: usize) -> Vec<Rectangle> {
    (0..n)
        .map(|i| {
            let w = 150.0 + ((i * 137) % 700) as f64;
            let h = 100.0 + ((i * 71) % 450) as f64;
            Rectangle::rectangle(format!("B{i}"), w, h)
        })
        .collect()
}

fn bench_nest_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("nest_batch");
    group.sample_size(10);

    for &n in &[10, 50, 100] {
        let input = boards(n);
        group.bench_with_input(BenchmarkId::new("boards", n), &input, |b, input| {
            b.iter(|| {
                let mut engine =
                    NestingEngine::new(NestingConfig::default(), NestingContext::default())
                        .unwrap();
                let mut batch = input.clone();
                let results = engine.nest_boards(black_box(&mut batch));
                black_box(results)
            })
        });
    }
    group.finish();
}

fn bench_find_gaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_gaps");
    let calculator = GapCalculator::default();

    for &n in &[1, 8, 24] {
        let mut sheet = Sheet::new("S1", 2440.0, 1220.0);
        for i in 0..n {
            let mut board = Rectangle::rectangle(format!("B{i}"), 200.0, 150.0);
            let x = (i % 8) as f64 * 300.0;
            let y = (i / 8) as f64 * 400.0;
            board.place_at(x, y, Rotation::Deg0);
            sheet.add_board(board);
        }

        group.bench_with_input(BenchmarkId::new("boards", n), &sheet, |b, sheet| {
            b.iter(|| black_box(calculator.find_gaps(black_box(sheet))))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_nest_batch, bench_find_gaps);
criterion_main!(benches);
