use chrono::{DateTime, Months, NaiveDate, Utc};
use criterion::{Criterion, criterion_group, criterion_main};
use econ_dash::api::{DashboardComposer, DateRangeSelection, PanelCatalog, format_magnitude};
use econ_dash::core::{AlignedFrame, Observation, Series, Viewport, year_over_year_change};
use econ_dash::fetch::StaticFetcher;
use std::hint::black_box;

fn monthly_series(id: &str, len: u32, offset: f64) -> Series {
    let start = NaiveDate::from_ymd_opt(1950, 1, 1).expect("valid start");
    let observations = (0..len)
        .map(|index| {
            let when = start
                .checked_add_months(Months::new(index))
                .expect("valid month");
            let value = if index % 97 == 0 {
                None
            } else {
                Some(offset + f64::from(index) * 0.25)
            };
            Observation::new(when, value)
        })
        .collect();
    Series::new(id, observations).expect("valid series")
}

fn bench_year_over_year_900(c: &mut Criterion) {
    let series = monthly_series("CPI", 900, 20.0);
    c.bench_function("year_over_year_900", |b| {
        b.iter(|| {
            let _ = year_over_year_change(black_box(&series));
        })
    });
}

fn bench_inner_join_4x900(c: &mut Criterion) {
    let columns: Vec<Series> = (0..4)
        .map(|i| monthly_series(&format!("S{i}"), 900 - i * 30, 10.0 * f64::from(i + 1)))
        .collect();
    c.bench_function("inner_join_4x900", |b| {
        b.iter(|| {
            let frame = AlignedFrame::inner_join(
                columns
                    .iter()
                    .map(|series| (series.id(), black_box(series))),
            );
            black_box(frame.row_count())
        })
    });
}

fn bench_format_magnitude(c: &mut Criterion) {
    let values = [0.5, 999.0, 1_500.0, 2_500_000.0, -3_000_000_000.0];
    c.bench_function("format_magnitude_5", |b| {
        b.iter(|| {
            for value in values {
                black_box(format_magnitude(black_box(value)));
            }
        })
    });
}

fn bench_dashboard_pass(c: &mut Criterion) {
    let mut fetcher = StaticFetcher::new();
    for (offset, panel) in PanelCatalog::standard().iter().enumerate() {
        for id in panel.series.values() {
            fetcher.insert(monthly_series(id, 600, 50.0 + offset as f64));
        }
    }
    let composer = DashboardComposer::new(PanelCatalog::standard(), fetcher, Viewport::new(2000, 4000));
    let now = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).expect("valid now");

    c.bench_function("dashboard_pass_full_history", |b| {
        b.iter(|| {
            let dashboard = composer
                .run_at(DateRangeSelection::FullHistory, now)
                .expect("pass succeeds");
            black_box(dashboard.frame.line_count())
        })
    });
}

criterion_group!(
    benches,
    bench_year_over_year_900,
    bench_inner_join_4x900,
    bench_format_magnitude,
    bench_dashboard_pass
);
criterion_main!(benches);
