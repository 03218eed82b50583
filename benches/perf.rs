use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use futscout_terminal::athlete::{parse_athlete_detail_json, parse_athletes_json};
use futscout_terminal::filters::{DominantFoot, FilterState, Gender, Position};
use futscout_terminal::pagination::compute_page_window;
use futscout_terminal::query::{deserialize, serialize};
use futscout_terminal::stats::DerivedStats;

fn sample_filters() -> FilterState {
    FilterState {
        nickname: Some("joão silva".to_string()),
        gender: Some(Gender::Female),
        dominant_foot: Some(DominantFoot::Left),
        primary_position: Some(Position::Midfielder),
        min_height: Some(165.5),
        max_height: Some(190.0),
        min_weight: None,
        max_weight: Some(80.0),
        has_manager: Some(true),
        page: 12,
        limit: Some(20),
    }
}

fn bench_query_round_trip(c: &mut Criterion) {
    let filters = sample_filters();
    c.bench_function("query_round_trip", |b| {
        b.iter(|| {
            let query = serialize(black_box(&filters));
            let parsed = deserialize(black_box(&query));
            black_box(parsed.page);
        })
    });
}

fn bench_page_window(c: &mut Criterion) {
    c.bench_function("page_window", |b| {
        b.iter(|| {
            for current in 1..=200u32 {
                let window = compute_page_window(black_box(current), black_box(200));
                black_box(window.len());
            }
        })
    });
}

fn bench_athletes_parse(c: &mut Criterion) {
    c.bench_function("athletes_parse", |b| {
        b.iter(|| {
            let page = parse_athletes_json(black_box(ATHLETES_JSON)).unwrap();
            black_box(page.athletes.len());
        })
    });
}

fn bench_detail_stats(c: &mut Criterion) {
    let athlete = parse_athlete_detail_json(DETAIL_JSON).expect("valid fixture json");
    let mut matches = Vec::new();
    for _ in 0..200 {
        matches.extend(athlete.all_matches());
    }
    c.bench_function("detail_stats", |b| {
        b.iter(|| {
            let stats = DerivedStats::compute(black_box(&matches));
            black_box(stats.win_rate());
        })
    });
}

criterion_group!(
    perf,
    bench_query_round_trip,
    bench_page_window,
    bench_athletes_parse,
    bench_detail_stats
);
criterion_main!(perf);

static ATHLETES_JSON: &str = include_str!("../tests/fixtures/athletes_page.json");
static DETAIL_JSON: &str = include_str!("../tests/fixtures/athlete_detail.json");
