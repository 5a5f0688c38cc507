use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;
use stormdata::columns::*;
use stormdata::{analyze, summarize_by_event_type};

const LABELS: [&str; 8] = [
    "TORNADO",
    "FLOOD",
    "FLASH FLOOD",
    "TSTM WIND",
    "THUNDERSTORM WIND",
    "HAIL",
    "EXCESSIVE HEAT",
    "LIGHTNING",
];
const SUFFIXES: [&str; 6] = ["", "K", "M", "B", "0", "k"];

/// A text-typed export of `rows` records spread over 1990..2011.
fn synthetic_export(rows: usize) -> PolarsResult<DataFrame> {
    let evtype: Vec<&str> = (0..rows).map(|i| LABELS[i % LABELS.len()]).collect();
    let bgn_date: Vec<String> = (0..rows)
        .map(|i| format!("{}/{}/{} 0:00:00", i % 12 + 1, i % 28 + 1, 1990 + i % 22))
        .collect();
    let count = |m: usize| -> Vec<String> { (0..rows).map(|i| ((i * m) % 7).to_string()).collect() };
    let magnitude: Vec<String> = (0..rows).map(|i| format!("{}.5", i % 250)).collect();
    let suffix = |s: usize| -> Vec<&str> { (0..rows).map(|i| SUFFIXES[(i + s) % SUFFIXES.len()]).collect() };

    df!(
        EVTYPE => evtype,
        BGN_DATE => bgn_date,
        FATALITIES => count(3),
        INJURIES => count(5),
        PROPDMG => magnitude.clone(),
        PROPDMGEXP => suffix(0),
        CROPDMG => magnitude,
        CROPDMGEXP => suffix(2)
    )
}

fn bench_storm_report(c: &mut Criterion) {
    let raw = synthetic_export(100_000).expect("synthetic export");
    c.bench_function("analyze_100k", |b| {
        b.iter(|| analyze(black_box(&raw), 2007, 0.75).expect("analysis"))
    });

    let summary = analyze(&raw, 1990, 0.75).expect("analysis").summary;
    c.bench_function("summarize_by_event_type", |b| {
        b.iter(|| {
            summarize_by_event_type(black_box(summary.clone()).lazy())
                .collect()
                .expect("summary")
        })
    });
}

criterion_group!(benches, bench_storm_report);
criterion_main!(benches);
