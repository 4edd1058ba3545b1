//! Performance benchmarks for the term index
//!
//! Run with: cargo bench

use bookindex::index::TermIndex;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Build an index of `terms` terms, each on a mix of runs and scattered pages
fn build_index(terms: usize) -> TermIndex {
    let mut index = TermIndex::new();
    for t in 0..terms {
        let term = format!("term{:05}", t);
        let base = (t % 400) as i32;
        for page in base..base + 12 {
            index.add_term(&term, page);
        }
        for step in 1..6 {
            index.add_term(&term, base + 20 * step);
        }
    }
    index
}

fn bench_add_term(c: &mut Criterion) {
    c.bench_function("add_term_10k", |b| {
        b.iter(|| black_box(build_index(black_box(10_000))))
    });
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_all");
    for size in [100, 1_000, 10_000] {
        let index = build_index(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &index, |b, index| {
            b.iter(|| black_box(index.render_all()))
        });
    }
    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let text = build_index(10_000).to_string();
    c.bench_function("parse_10k", |b| {
        b.iter(|| black_box(text.parse::<TermIndex>().unwrap()))
    });
}

fn bench_remove_page(c: &mut Criterion) {
    let index = build_index(10_000);
    c.bench_function("remove_page_10k", |b| {
        b.iter_batched(
            || index.clone(),
            |mut index| black_box(index.remove_page(5)),
            criterion::BatchSize::LargeInput,
        )
    });
}

fn bench_search(c: &mut Criterion) {
    let index = build_index(10_000);
    c.bench_function("search_prefix_10k", |b| {
        b.iter(|| black_box(index.search_by_prefix(black_box("term001"))))
    });
}

criterion_group!(
    benches,
    bench_add_term,
    bench_render,
    bench_parse,
    bench_remove_page,
    bench_search
);
criterion_main!(benches);
