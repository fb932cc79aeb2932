use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pgqb::prelude::*;
use pgqb::Select;

/// Build a SELECT with `n` flat comparisons and one OR group of `n` more:
/// ... WHERE (t.col0 = $1) AND ... AND ((t.alt0 = $n+1) OR ...)
fn build_select(n: usize) -> Select {
    let mut query = select("t");
    let mut builder = query.where_clause();
    for i in 0..n {
        builder = builder.eq(format!("col{i}"), i as i64);
    }
    builder = builder.sub_where_or();
    for i in 0..n {
        builder = builder.eq(format!("alt{i}"), i as i64);
    }
    builder.end();
    query
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("where_builder/render");

    for n in [1, 5, 10, 50, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.build()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("where_builder/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let query = build_select(n);
                black_box(query.build())
            });
        });
    }

    group.finish();
}

fn bench_clone_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("where_builder/clone_tree");

    for n in [10, 100] {
        let query = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &query, |b, query| {
            b.iter(|| black_box(query.get_where().cloned()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render, bench_build_and_render, bench_clone_tree);
criterion_main!(benches);
