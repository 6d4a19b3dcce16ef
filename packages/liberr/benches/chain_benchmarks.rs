//! Benchmarks for stack capture, wrapping and rendering
//!
//! Capture cost dominates error construction, so it is measured separately
//! from the wrappers that reuse an existing stack.

#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use liberr::{
    CapturedStack, Error, Severity, loggable_level, with_error_level_msg, with_message, wrapf,
};

/// Raw capture and lazy resolution
fn benchmark_capture(c: &mut Criterion) {
    let mut group = c.benchmark_group("capture");

    group.bench_function("capture_only", |b| {
        b.iter(|| std::hint::black_box(CapturedStack::capture()));
    });

    group.bench_function("capture_and_resolve_first_frame", |b| {
        b.iter(|| {
            let trace = CapturedStack::capture().resolve();
            std::hint::black_box(trace.iter().next().map(|f| f.line()));
        });
    });

    group.bench_function("new_leaf", |b| {
        b.iter(|| std::hint::black_box(Error::new("redis put failed")));
    });

    group.finish();
}

/// Wrapping cost as chains grow
fn benchmark_wrapping(c: &mut Criterion) {
    let mut group = c.benchmark_group("wrapping");
    let base = Error::from_std(std::fmt::Error);

    group.bench_function("with_message", |b| {
        b.iter(|| std::hint::black_box(with_message(Some(base.clone()), "context")));
    });

    group.bench_function("wrapf_first", |b| {
        b.iter(|| std::hint::black_box(wrapf(Some(base.clone()), "context")));
    });

    let wrapped = wrapf(Some(base.clone()), "context");
    group.bench_function("wrapf_again", |b| {
        b.iter(|| std::hint::black_box(wrapf(wrapped.clone(), "outer")));
    });

    for depth in [1usize, 8, 32] {
        let chain = (0..depth).fold(Some(Error::new("leaf")), |err, i| {
            if i % 2 == 0 {
                with_error_level_msg(err, "tag")
            } else {
                with_message(err, "context")
            }
        });
        group.bench_with_input(BenchmarkId::new("loggable_level", depth), &chain, |b, chain| {
            b.iter(|| {
                let (_, level, _) = loggable_level(chain.as_ref());
                assert_eq!(level, Severity::Error);
            });
        });
    }

    group.finish();
}

/// Plain and verbose rendering
fn benchmark_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let err = wrapf(Some(Error::new("redis put failed")), "captcha store")
        .and_then(|e| with_error_level_msg(Some(e), "giving up"));

    group.bench_function("plain", |b| {
        b.iter(|| std::hint::black_box(err.as_ref().map(|e| e.to_string())));
    });

    group.bench_function("verbose", |b| {
        b.iter(|| std::hint::black_box(err.as_ref().map(|e| format!("{e:#}"))));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_capture,
    benchmark_wrapping,
    benchmark_rendering
);
criterion_main!(benches);
