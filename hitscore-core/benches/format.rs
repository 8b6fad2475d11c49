use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use hitscore_core::{
    format::expand,
    judgment::{best_judgment, Judgment, Segment, SegmentTables},
    score::RawScore,
};

pub fn criterion_benchmark(c: &mut Criterion) {
    let segment = |threshold: i32, text: &str| Segment {
        threshold,
        text: text.to_owned(),
    };
    let segments = SegmentTables {
        before_cut_angle: vec![segment(70, "+"), segment(0, " ")],
        accuracy: vec![segment(15, "+"), segment(0, " ")],
        after_cut_angle: vec![segment(30, "+"), segment(0, " ")],
    };
    let score = RawScore::new(68, 30, 13);

    c.bench_function("expand format string", |b| {
        b.iter(|| {
            let text = expand(
                black_box("<size=80%>%BExcellent%A</size>%n%s (%p%)"),
                black_box(score),
                &segments,
            );
            black_box(text);
        })
    });

    // Simulate a generously sized table with one tier per point.
    let judgments: Vec<_> = (0..=115)
        .rev()
        .map(|threshold| Judgment {
            threshold,
            ..Default::default()
        })
        .collect();

    c.bench_function("best judgment", |b| {
        b.iter(|| {
            let index = best_judgment(black_box(&judgments), black_box(score.total()));
            black_box(index);
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
