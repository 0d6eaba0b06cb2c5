//! Benchmark tests for rectangle primitives.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use regionkit_core::Rect;

fn bench_rect_intersection(c: &mut Criterion) {
    let a = Rect::new(0, 0, 100, 100);
    let b = Rect::new(50, 50, 100, 100);

    c.bench_function("rect_intersection", |bench| {
        bench.iter(|| black_box(a).intersection(&black_box(b)))
    });
}

fn bench_rect_union(c: &mut Criterion) {
    let a = Rect::new(0, 0, 100, 100);
    let b = Rect::new(150, 150, 10, 10);

    c.bench_function("rect_union", |bench| {
        bench.iter(|| black_box(a).union(&black_box(b)))
    });
}

criterion_group!(benches, bench_rect_intersection, bench_rect_union);
criterion_main!(benches);
