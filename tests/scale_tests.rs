use approx::assert_relative_eq;
use chrono::NaiveDate;
use econ_dash::core::primitives::{date_to_unix_seconds, unix_seconds_to_date};
use econ_dash::core::{
    DataPoint, LinearScale, Rect, ScaleMode, TimeScale, TimeScaleTuning, ValueScale,
    ValueScaleTuning, contiguous_runs, project_line_segments,
};
use proptest::prelude::*;

fn plot() -> Rect {
    Rect::new(100.0, 50.0, 800.0, 400.0)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn linear_value_scale_maps_larger_values_higher() {
    let scale = ValueScale::new(0.0, 100.0).expect("valid scale");
    assert_relative_eq!(scale.value_to_y(0.0, plot()).expect("map"), 450.0);
    assert_relative_eq!(scale.value_to_y(100.0, plot()).expect("map"), 50.0);
    assert_relative_eq!(scale.value_to_y(25.0, plot()).expect("map"), 350.0);
}

#[test]
fn log_value_scale_spaces_decades_evenly() {
    let scale = ValueScale::new_with_mode(1.0, 1_000.0, ScaleMode::Logarithmic).expect("valid scale");
    let y1 = scale.value_to_y(1.0, plot()).expect("map");
    let y10 = scale.value_to_y(10.0, plot()).expect("map");
    let y100 = scale.value_to_y(100.0, plot()).expect("map");
    assert_relative_eq!(y1 - y10, y10 - y100, epsilon = 1e-9);
    assert!(scale.value_to_y(0.0, plot()).is_err());
}

#[test]
fn autoscale_pads_five_percent_each_side() {
    let points = [DataPoint::new(0.0, 10.0), DataPoint::new(1.0, 30.0)];
    let scale = ValueScale::from_points_tuned(&points, ValueScaleTuning::default(), ScaleMode::Linear)
        .expect("valid scale");
    let (min, max) = scale.domain();
    assert_relative_eq!(min, 9.0, epsilon = 1e-9);
    assert_relative_eq!(max, 31.0, epsilon = 1e-9);
}

#[test]
fn log_autoscale_rejects_non_positive_points() {
    let points = [DataPoint::new(0.0, 10.0), DataPoint::new(1.0, -1.0)];
    assert!(
        ValueScale::from_points_tuned(&points, ValueScaleTuning::default(), ScaleMode::Logarithmic)
            .is_err()
    );
}

#[test]
fn flat_series_gets_a_non_degenerate_domain() {
    let points = [DataPoint::new(0.0, 5.0), DataPoint::new(1.0, 5.0)];
    let scale = ValueScale::from_points_tuned(&points, ValueScaleTuning::default(), ScaleMode::Linear)
        .expect("valid scale");
    let (min, max) = scale.domain();
    assert!(min < 5.0 && max > 5.0);
}

#[test]
fn linear_ticks_use_nice_steps() {
    let scale = ValueScale::new(0.0, 100.0).expect("valid scale");
    assert_eq!(
        scale.ticks(6).expect("ticks"),
        vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]
    );
}

#[test]
fn log_ticks_follow_one_two_five_ladder() {
    let scale = ValueScale::new_with_mode(1.0, 1_000.0, ScaleMode::Logarithmic).expect("valid scale");
    let ticks = scale.ticks(20).expect("ticks");
    assert_eq!(
        ticks,
        vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1_000.0]
    );
    let sampled = scale.ticks(4).expect("ticks");
    assert!(sampled.len() <= 4);
    assert_eq!(sampled.first(), Some(&1.0));
    assert_eq!(sampled.last(), Some(&1_000.0));
}

#[test]
fn time_scale_pads_visible_range() {
    let points = [DataPoint::new(0.0, 1.0), DataPoint::new(1_000_000.0, 2.0)];
    let scale = TimeScale::from_points_tuned(&points, TimeScaleTuning::default()).expect("valid scale");
    assert_eq!(scale.full_range(), (0.0, 1_000_000.0));
    let (start, end) = scale.visible_range();
    assert_relative_eq!(start, -50_000.0);
    assert_relative_eq!(end, 1_050_000.0);
}

#[test]
fn calendar_ticks_land_on_year_starts_for_long_ranges() {
    let points = [
        DataPoint::from_date(date(1990, 6, 1), 1.0),
        DataPoint::from_date(date(2020, 6, 1), 2.0),
    ];
    let scale = TimeScale::from_points(&points).expect("valid scale");
    let ticks = scale.calendar_ticks(8);

    assert!(!ticks.is_empty() && ticks.len() <= 8);
    for tick in &ticks {
        assert_eq!(tick.format("%m-%d").to_string(), "01-01");
    }
    assert!(ticks.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn calendar_ticks_use_month_starts_for_short_ranges() {
    let points = [
        DataPoint::from_date(date(2023, 1, 15), 1.0),
        DataPoint::from_date(date(2023, 7, 15), 2.0),
    ];
    let scale = TimeScale::from_points(&points).expect("valid scale");
    let ticks = scale.calendar_ticks(8);
    assert!(!ticks.is_empty());
    assert!(ticks.iter().all(|tick| tick.format("%d").to_string() == "01"));
}

#[test]
fn contiguous_runs_break_at_missing_values() {
    let runs = contiguous_runs(&[
        (0.0, Some(1.0)),
        (1.0, Some(2.0)),
        (2.0, None),
        (3.0, Some(4.0)),
        (4.0, None),
        (5.0, None),
    ]);
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].len(), 2);
    assert_eq!(runs[1], vec![DataPoint::new(3.0, 4.0)]);
}

#[test]
fn projected_segments_join_adjacent_points() {
    let time_scale = TimeScale::new(0.0, 10.0).expect("valid time scale");
    let value_scale = ValueScale::new(0.0, 10.0).expect("valid value scale");
    let points = [
        DataPoint::new(0.0, 0.0),
        DataPoint::new(5.0, 10.0),
        DataPoint::new(10.0, 5.0),
    ];
    let segments =
        project_line_segments(&points, time_scale, value_scale, plot()).expect("projection");
    assert_eq!(segments.len(), 2);
    assert_relative_eq!(segments[0].x1, 100.0);
    assert_relative_eq!(segments[0].y1, 450.0);
    assert_relative_eq!(segments[0].x2, segments[1].x1);
    assert_relative_eq!(segments[1].x2, 900.0);
    assert_relative_eq!(segments[1].y2, 250.0);

    assert!(
        project_line_segments(&points[..1], time_scale, value_scale, plot())
            .expect("projection")
            .is_empty()
    );
}

#[test]
fn dates_round_trip_through_unix_seconds() {
    let when = date(2008, 9, 15);
    assert_eq!(unix_seconds_to_date(date_to_unix_seconds(when)), Some(when));
    assert_eq!(unix_seconds_to_date(f64::NAN), None);
}

proptest! {
    #[test]
    fn linear_scale_round_trips(
        start in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        factor in 0.0f64..1.0
    ) {
        let scale = LinearScale::new(start, start + span).expect("valid scale");
        let value = start + factor * span;
        let offset = scale.value_to_offset(value, 1024.0).expect("to offset");
        let recovered = scale.offset_to_value(offset, 1024.0).expect("from offset");
        prop_assert!((recovered - value).abs() <= 1e-7 * span.max(1.0));
    }

    #[test]
    fn value_scale_round_trips_in_both_modes(
        min in 0.01f64..10_000.0,
        span in 0.01f64..10_000.0,
        factor in 0.0f64..1.0,
        logarithmic in any::<bool>()
    ) {
        let mode = if logarithmic { ScaleMode::Logarithmic } else { ScaleMode::Linear };
        let scale = ValueScale::new_with_mode(min, min + span, mode).expect("valid scale");
        let value = min + factor * span;
        let y = scale.value_to_y(value, plot()).expect("to y");
        let recovered = scale.y_to_value(y, plot()).expect("from y");
        prop_assert!((recovered - value).abs() <= 1e-6 * value.max(1.0));
    }
}
