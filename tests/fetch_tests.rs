use chrono::NaiveDate;
use econ_dash::core::{Observation, Series};
use econ_dash::error::{ConfigError, FetchError};
use econ_dash::fetch::{SeriesFetcher, StaticFetcher, parse_error_response, parse_observations};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

#[test]
fn observations_body_decodes_values_and_missing_dots() {
    let body = r#"{
        "realtime_start": "2024-06-15",
        "count": 3,
        "observations": [
            {"realtime_start": "2024-06-15", "date": "2024-01-01", "value": "3.7"},
            {"realtime_start": "2024-06-15", "date": "2024-02-01", "value": "."},
            {"realtime_start": "2024-06-15", "date": "2024-03-01", "value": "3.9"}
        ]
    }"#;

    let series = parse_observations("UNRATE", body).expect("valid body");
    assert_eq!(series.id(), "UNRATE");
    assert_eq!(
        series.observations(),
        &[
            Observation::present(date(2024, 1, 1), 3.7),
            Observation::missing(date(2024, 2, 1)),
            Observation::present(date(2024, 3, 1), 3.9),
        ]
    );
}

#[test]
fn observations_body_accepts_scientific_notation() {
    let body = r#"{"observations": [{"date": "2020-01-01", "value": "1.5e3"}]}"#;
    let series = parse_observations("X", body).expect("valid body");
    assert_eq!(series.observations()[0].value, Some(1_500.0));
}

#[test]
fn malformed_bodies_are_decode_errors() {
    let err = parse_observations("X", "not json").expect_err("invalid json");
    assert!(matches!(err, FetchError::Decode(_)));

    let bad_value = r#"{"observations": [{"date": "2020-01-01", "value": "abc"}]}"#;
    let err = parse_observations("X", bad_value).expect_err("invalid value");
    assert!(matches!(err, FetchError::Decode(_)));

    let bad_date = r#"{"observations": [{"date": "2020/01/01", "value": "1"}]}"#;
    let err = parse_observations("X", bad_date).expect_err("invalid date");
    assert!(matches!(err, FetchError::Decode(_)));
}

#[test]
fn unordered_dates_are_rejected_as_invalid_series() {
    let body = r#"{"observations": [
        {"date": "2020-02-01", "value": "1"},
        {"date": "2020-01-01", "value": "2"}
    ]}"#;
    let err = parse_observations("X", body).expect_err("dates out of order");
    assert!(matches!(err, FetchError::InvalidSeries { ref series_id, .. } if series_id == "X"));
}

#[test]
fn provider_error_body_maps_to_provider_error() {
    let body = r#"{"error_code": 400, "error_message": "Bad Request.  The series does not exist."}"#;
    let err = parse_error_response(400, body);
    let FetchError::Provider { code, message } = err else {
        panic!("expected provider error");
    };
    assert_eq!(code, 400);
    assert!(message.contains("does not exist"));

    let err = parse_error_response(503, "<html>unavailable</html>");
    assert!(matches!(err, FetchError::Provider { code: 503, .. }));
}

#[test]
fn static_fetcher_applies_inclusive_window() {
    let series = Series::new(
        "GDP",
        (1..=12)
            .map(|month| Observation::present(date(2020, month, 1), f64::from(month)))
            .collect(),
    )
    .expect("valid series");
    let fetcher = StaticFetcher::new().with_series(series);

    let windowed = fetcher
        .fetch("GDP", Some(date(2020, 3, 1)), Some(date(2020, 5, 1)))
        .expect("known series");
    assert_eq!(windowed.len(), 3);
    assert_eq!(windowed.observations()[0].date, date(2020, 3, 1));

    let open_start = fetcher
        .fetch("GDP", None, Some(date(2020, 2, 15)))
        .expect("known series");
    assert_eq!(open_start.len(), 2);

    let everything = fetcher.fetch("GDP", None, None).expect("known series");
    assert_eq!(everything.len(), 12);
}

#[test]
fn static_fetcher_reports_unknown_series() {
    let fetcher = StaticFetcher::new();
    let err = fetcher.fetch("NOPE", None, None).expect_err("unknown id");
    assert!(matches!(err, FetchError::UnknownSeries(ref id) if id == "NOPE"));
    assert_eq!(err.to_string(), "unknown series `NOPE`");
}

#[test]
fn static_fetcher_loads_json_fixtures() {
    let raw = r#"{
        "TCU": [
            {"date": "2023-01-01", "value": 79.1},
            {"date": "2023-02-01", "value": null}
        ],
        "SP500": []
    }"#;
    let fetcher = StaticFetcher::from_json_str(raw).expect("valid fixture");
    assert_eq!(fetcher.len(), 2);

    let tcu = fetcher.fetch("TCU", None, None).expect("known series");
    assert_eq!(tcu.observations()[1].value, None);
    assert!(fetcher.fetch("SP500", None, None).expect("known series").is_empty());

    let err = StaticFetcher::from_json_str("[1, 2]").expect_err("wrong shape");
    assert!(matches!(err, ConfigError::Invalid(_)));
}

#[test]
fn static_fetcher_rejects_fixture_dates_outside_iso_format() {
    let raw = r#"{"TCU": [{"date": "01/02/2023", "value": 79.1}]}"#;
    let err = StaticFetcher::from_json_str(raw).expect_err("non-iso date");
    let ConfigError::Invalid(message) = err else {
        panic!("expected invalid fixture");
    };
    assert!(message.contains("TCU"));
    assert!(message.contains("01/02/2023"));
}

#[test]
fn boxed_fetchers_delegate() {
    let fetcher: Box<dyn SeriesFetcher> = Box::new(
        StaticFetcher::new().with_series(Series::new("A", Vec::new()).expect("valid series")),
    );
    assert!(fetcher.fetch("A", None, None).is_ok());
    assert!(fetcher.fetch("B", None, None).is_err());
}
