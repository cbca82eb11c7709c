use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};

use neows::criteria::{create_filters, Criteria};
use neows::database::NeoDatabase;
use neows::limit::limit;
use neows::model::{CloseApproach, NearEarthObject};

// approaches are spread 37 hours apart, starting in 1900
fn build(neos: usize, per_neo: usize) -> NeoDatabase {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let objects = (0..neos)
        .map(|i| {
            let diameter = if i % 7 == 0 { f64::NAN } else { (i % 50) as f64 / 10.0 };
            NearEarthObject::new(format!("{i}"), None, diameter, i % 13 == 0).unwrap()
        })
        .collect();
    let approaches = (0..neos * per_neo)
        .map(|j| {
            let time = epoch + Duration::hours((j * 37) as i64);
            let distance = (j % 500) as f64 / 1000.0;
            let velocity = (j % 40) as f64 + 0.5;
            CloseApproach::new(format!("{}", j % neos), time, distance, velocity).unwrap()
        })
        .collect();
    NeoDatabase::new(objects, approaches).unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let db = build(1_000, 100);

    let everything = create_filters(&Criteria::default());
    c.bench_function("query all 100k", |b| b.iter(|| db.query(black_box(&everything)).count()));

    let narrow = create_filters(&Criteria {
        start_date: NaiveDate::from_ymd_opt(1950, 1, 1),
        end_date: NaiveDate::from_ymd_opt(1960, 12, 31),
        distance_max: Some(0.05),
        velocity_min: Some(10.0),
        diameter_min: Some(1.0),
        hazardous: Some(false),
        ..Default::default()
    });
    c.bench_function("query narrow 100k", |b| b.iter(|| db.query(black_box(&narrow)).count()));
    c.bench_function("query limit 10", |b| {
        b.iter(|| limit(db.query(black_box(&narrow)), Some(10)).count())
    });

    c.bench_function("link 100k", |b| b.iter(|| build(black_box(1_000), 100)));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
