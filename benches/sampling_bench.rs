use criterion::{Criterion, criterion_group, criterion_main};
use plotfn::core::{Domain, sample};
use plotfn::eval::{BoundExpression, normalize};
use std::hint::black_box;

fn bench_normalize_loose_input(c: &mut Criterion) {
    c.bench_function("normalize_loose_input", |b| {
        b.iter(|| {
            let _ = normalize(black_box("y = 2x + Sin(3x)/COS(x) + sqrt(2x)")).expect("normalize");
        })
    });
}

fn bench_parse_canonical(c: &mut Criterion) {
    let canonical = normalize("2*x + sin(3*x)/cos(x) + sqrt(2*x)").expect("normalize");

    c.bench_function("parse_canonical", |b| {
        b.iter(|| {
            let _ = BoundExpression::parse(black_box(&canonical)).expect("parse");
        })
    });
}

fn bench_sample_10k(c: &mut Criterion) {
    let canonical = normalize("sin(x)*x^2 + exp(0-x^2)").expect("normalize");
    let expr = BoundExpression::parse(&canonical).expect("parse");
    let domain = Domain::new(-10.0, 10.0, 0.002).expect("valid domain");

    c.bench_function("sample_10k", |b| {
        b.iter(|| {
            let points = sample(black_box(&expr), black_box(domain));
            black_box(points.len())
        })
    });
}

criterion_group!(
    benches,
    bench_normalize_loose_input,
    bench_parse_canonical,
    bench_sample_10k
);
criterion_main!(benches);
