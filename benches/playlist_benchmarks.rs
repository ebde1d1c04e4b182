//! # Smarter Playlist Benchmarks
//!
//! Measures the hot paths of playlist generation over synthetic catalogs.
//!
//! ## Benchmark Categories
//!
//! - **Sampling**: Weighted index selection
//! - **Recency**: Catalog-wide recency weights
//! - **Albums**: Building the album index
//! - **Generation**: Whole playlists with the default strategy mix
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench generation
//! ```

use chrono::{DateTime, Duration, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smarter_playlist::algorithm::catalog_weights;
use smarter_playlist::{sampler, AlbumIndex, PlaylistGenerator, RecencyCurve, Song, StrategyWeights};
use std::hint::black_box;

fn reference_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()
}

/// Synthetic catalog: 12-track albums, every fifth song never played.
fn create_test_songs(count: usize) -> Vec<Song> {
    let now = reference_time();
    (0..count)
        .map(|i| {
            let song = Song::new(format!("Song {i}"), format!("Album {}", i / 12))
                .with_track((i % 12) as u32 + 1);
            if i % 5 == 0 {
                song
            } else {
                song.played_at(now - Duration::hours((i as i64 * 37) % 20_000 + 1))
            }
        })
        .collect()
}

fn benchmark_sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");

    for size in [10, 1_000, 10_000].iter() {
        let weights: Vec<f64> = (0..*size).map(|i| (i % 17) as f64 + 0.5).collect();
        group.bench_with_input(BenchmarkId::new("sample_index", size), &weights, |b, weights| {
            let mut rng = StdRng::seed_from_u64(1);
            b.iter(|| black_box(sampler::sample_index(black_box(weights), &mut rng)))
        });
    }

    group.finish();
}

fn benchmark_recency(c: &mut Criterion) {
    let mut group = c.benchmark_group("recency");
    let curve = RecencyCurve::default();

    group.bench_function("single_weight", |b| {
        b.iter(|| black_box(curve.weight(black_box(Some(86_400)), Some(1_000_000), 1.0)))
    });

    for size in [100, 1_000, 10_000].iter() {
        let songs = create_test_songs(*size);
        group.bench_with_input(BenchmarkId::new("catalog_weights", size), &songs, |b, songs| {
            b.iter(|| black_box(catalog_weights(songs, reference_time(), &curve)))
        });
    }

    group.finish();
}

fn benchmark_album_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("albums");

    for size in [100, 10_000].iter() {
        let songs = create_test_songs(*size);
        group.bench_with_input(BenchmarkId::new("build", size), &songs, |b, songs| {
            b.iter(|| black_box(AlbumIndex::build(songs).len()))
        });
    }

    group.finish();
}

fn benchmark_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation");
    let songs = create_test_songs(2_000);
    let generator = PlaylistGenerator::new(StrategyWeights::default());

    for length in [10, 100].iter() {
        group.bench_with_input(BenchmarkId::new("default_mix", length), length, |b, &length| {
            b.iter_batched(
                || StdRng::seed_from_u64(42),
                |mut rng| black_box(generator.generate(&songs, length, reference_time(), &mut rng)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_sampling,
    benchmark_recency,
    benchmark_album_index,
    benchmark_generation
);

criterion_main!(benches);
