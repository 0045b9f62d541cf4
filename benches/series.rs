//! Benchmarks for chart series generation and display helpers.
//!
//! Run with: `cargo bench --bench series`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rust_decimal::Decimal;

use market_core::catalog::{heat_categories, whale_markets, MarketCatalog, WhaleCard};
use market_core::display::{normalize_split, VolumeFormat};
use market_core::series::{
    ambient_series, convergent_series, heat_trends, oscillating_series, profit_probability_path,
    SeededRng, DEFAULT_SEED, FEATURED_LINES,
};
use market_core::types::PositionType;

/// Raw generator draws.
fn bench_rng(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeded_rng");

    for draws in [50, 1_000, 10_000].iter() {
        group.throughput(Throughput::Elements(*draws as u64));
        group.bench_with_input(BenchmarkId::new("next_unit", draws), draws, |b, &draws| {
            b.iter(|| {
                let mut rng = SeededRng::new(DEFAULT_SEED);
                let mut sum = 0.0;
                for _ in 0..draws {
                    sum += rng.next_unit();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}

/// One chart per call, as the pages render them.
fn bench_chart_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("chart_series");
    group.throughput(Throughput::Elements(1));

    group.bench_function("ambient", |b| {
        b.iter(|| ambient_series(black_box(&["yes", "no"]), &mut SeededRng::new(DEFAULT_SEED)))
    });

    group.bench_function("convergent", |b| {
        b.iter(|| {
            convergent_series(black_box(37.0), black_box(63.0), &mut SeededRng::new(DEFAULT_SEED))
        })
    });

    group.bench_function("oscillating", |b| {
        b.iter(|| oscillating_series(black_box(&FEATURED_LINES), &mut SeededRng::new(DEFAULT_SEED)))
    });

    group.bench_function("convergent_records", |b| {
        let series = convergent_series(37.0, 63.0, &mut SeededRng::new(DEFAULT_SEED));
        b.iter(|| black_box(series.records()))
    });

    group.bench_function("heat_trends", |b| {
        let tiles = heat_categories();
        b.iter(|| heat_trends(black_box(&tiles)))
    });

    group.bench_function("probability_path", |b| {
        b.iter(|| {
            profit_probability_path(
                black_box(100.0),
                black_box(104.0),
                PositionType::Long,
                &mut SeededRng::new(DEFAULT_SEED),
            )
        })
    });

    group.finish();
}

/// Formatting and derivations done for every card.
fn bench_display(c: &mut Criterion) {
    let mut group = c.benchmark_group("display");
    let catalog = MarketCatalog::demo();
    let whales = whale_markets();

    group.bench_function("format_volume_card", |b| {
        b.iter(|| VolumeFormat::CARD.format(black_box(Decimal::new(16_901_170, 0))))
    });

    group.bench_function("normalize_split", |b| {
        b.iter(|| {
            normalize_split(
                black_box(Decimal::new(1_266_300, 0)),
                black_box(Decimal::new(743_700, 0)),
            )
        })
    });

    group.bench_function("whale_cards", |b| {
        b.iter(|| whales.iter().map(WhaleCard::from_market).collect::<Vec<_>>())
    });

    group.bench_function("catalog_search", |b| {
        b.iter(|| black_box(catalog.search(black_box("election")).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_rng, bench_chart_series, bench_display);

criterion_main!(benches);
