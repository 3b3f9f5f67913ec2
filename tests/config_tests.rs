use std::fs;
use std::path::PathBuf;

use econ_dash::config::{
    Credentials, DEFAULT_FRED_BASE_URL, DashboardConfig, FRED_API_KEY, FredConfig,
};
use econ_dash::core::Viewport;
use econ_dash::error::ConfigError;

fn scratch_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("econ-dash-config-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).expect("create scratch dir");
    let path = dir.join(name);
    fs::write(&path, contents).expect("write scratch file");
    path
}

#[test]
fn defaults_describe_a_twenty_by_forty_inch_figure() {
    let config = DashboardConfig::default();
    assert_eq!(config.viewport(), Viewport::new(2000, 4000));
    assert_eq!(config.fred, FredConfig::default());
    assert_eq!(config.fred.base_url, DEFAULT_FRED_BASE_URL);
    assert_eq!(config.fred.request_timeout_secs, 30);
}

#[test]
fn partial_json_keeps_defaults_for_missing_keys() {
    let config = DashboardConfig::from_json_str(r#"{"figure_width_px": 1600, "fred": {"request_timeout_secs": 5}}"#)
        .expect("valid config");
    assert_eq!(config.figure_width_px, 1600);
    assert_eq!(config.figure_height_px, 4000);
    assert_eq!(config.fred.request_timeout_secs, 5);
    assert_eq!(config.fred.base_url, DEFAULT_FRED_BASE_URL);
}

#[test]
fn invalid_config_values_are_rejected() {
    for raw in [
        r#"{"figure_width_px": 0}"#,
        r#"{"fred": {"request_timeout_secs": 0}}"#,
        r#"{"fred": {"base_url": "  "}}"#,
        "{not json",
    ] {
        let err = DashboardConfig::from_json_str(raw).expect_err("invalid config");
        assert!(matches!(err, ConfigError::Invalid(_)), "{raw}");
    }
}

#[test]
fn config_file_errors_name_the_path() {
    let missing = std::env::temp_dir().join("econ-dash-definitely-missing.json");
    let err = DashboardConfig::from_json_file(&missing).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { ref path, .. } if *path == missing));
}

#[test]
fn credential_comes_from_lookup_first() {
    let credentials = Credentials::resolve(
        |name| (name == FRED_API_KEY).then(|| " abc123 ".to_owned()),
        None,
    )
    .expect("key present");
    assert_eq!(credentials.fred_api_key(), "abc123");
    assert!(!format!("{credentials:?}").contains("abc123"));
}

#[test]
fn missing_or_blank_credential_is_a_startup_error() {
    let err = Credentials::resolve(|_| None, None).expect_err("no key anywhere");
    assert!(matches!(err, ConfigError::MissingCredential { name } if name == FRED_API_KEY));

    let err = Credentials::resolve(|_| Some("   ".to_owned()), None).expect_err("blank key");
    assert!(matches!(err, ConfigError::MissingCredential { .. }));
}

#[test]
fn credential_falls_back_to_secrets_file() {
    let path = scratch_file(
        "secrets.json",
        r#"{"FRED_API_KEY": "from-file", "OTHER": 42}"#,
    );
    let credentials = Credentials::resolve(|_| None, Some(&path)).expect("key in file");
    assert_eq!(credentials.fred_api_key(), "from-file");

    let blank = scratch_file("blank-secrets.json", r#"{"FRED_API_KEY": ""}"#);
    let err = Credentials::resolve(|_| None, Some(&blank)).expect_err("blank key in file");
    assert!(matches!(err, ConfigError::MissingCredential { .. }));

    let broken = scratch_file("broken-secrets.json", "FRED_API_KEY=abc");
    let err = Credentials::resolve(|_| None, Some(&broken)).expect_err("not json");
    assert!(matches!(err, ConfigError::Invalid(_)));
}
