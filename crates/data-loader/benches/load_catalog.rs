//! Benchmarks for catalog and ratings building
//!
//! Run with: cargo bench --package data-loader
//!
//! Exercises the builders on synthetic input large enough to show the
//! equivalence-index lookup staying flat as the catalog grows.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{CatalogBuilder, RatingsBuilder};
use data_loader::parser::{MovieRow, RatingRow};

const MOVIES: usize = 2_000;
const RATINGS: usize = 20_000;

fn synthetic_movie_rows() -> Vec<MovieRow> {
    (0..MOVIES)
        .map(|i| MovieRow {
            line: i + 1,
            genre: format!("Genre{}", i % 20),
            id: i as i64,
            name: format!("Movie {i} ({})", 1900 + (i % 120)),
        })
        .collect()
}

fn synthetic_rating_rows() -> Vec<RatingRow> {
    (0..RATINGS)
        .map(|i| RatingRow {
            line: i + 1,
            movie_name: format!("Movie {} ({})", i % MOVIES, 1900 + ((i % MOVIES) % 120)),
            value: (i % 6) as f64,
            user_id: (i % 500) as i64,
        })
        .collect()
}

fn bench_catalog_build(c: &mut Criterion) {
    let rows = synthetic_movie_rows();

    c.bench_function("catalog_build_2k", |b| {
        b.iter(|| {
            let mut builder = CatalogBuilder::new();
            for row in &rows {
                builder.add_row(black_box(row.clone())).unwrap();
            }
            black_box(builder.finish())
        })
    });
}

fn bench_ratings_build(c: &mut Criterion) {
    let mut builder = CatalogBuilder::new();
    for row in synthetic_movie_rows() {
        builder.add_row(row).unwrap();
    }
    let catalog = builder.finish();
    let rows = synthetic_rating_rows();

    c.bench_function("ratings_build_20k", |b| {
        b.iter(|| {
            let mut builder = RatingsBuilder::new(&catalog);
            for row in &rows {
                builder.add_row(black_box(row.clone())).unwrap();
            }
            black_box(builder.finish())
        })
    });
}

criterion_group!(benches, bench_catalog_build, bench_ratings_build);
criterion_main!(benches);
