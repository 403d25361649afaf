use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stationcast::{normalize, score_station, StationCatalog, SuggestEngine};

fn bench_suggest(c: &mut Criterion) {
    let catalog = StationCatalog::bundled().unwrap();
    let engine = SuggestEngine::new(StationCatalog::bundled().unwrap());

    c.bench_function("score_catalog", |b| {
        let query = normalize("leipzig germany");
        let tokens: Vec<String> = query.split_whitespace().map(str::to_owned).collect();
        b.iter(|| {
            for station in catalog.stations() {
                black_box(score_station(station, black_box(&query), &tokens));
            }
        })
    });

    c.bench_function("suggest_cold_cache", |b| {
        b.iter(|| {
            let engine = SuggestEngine::new(StationCatalog::bundled().unwrap());
            black_box(engine.suggest(black_box("leipzig"), 8, None))
        })
    });

    c.bench_function("suggest_warm_cache", |b| {
        engine.suggest("leipzig", 8, None);
        b.iter(|| black_box(engine.suggest(black_box("leipzig"), 8, None)))
    });
}

criterion_group!(benches, bench_suggest);
criterion_main!(benches);
