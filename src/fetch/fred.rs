use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::primitives::decimal_to_f64;
use crate::core::{Observation, Series};
use crate::error::FetchError;

/// FRED encodes a missing observation as a lone dot.
const MISSING_VALUE: &str = ".";

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_code: Option<u16>,
    error_message: String,
}

/// Decodes a `series/observations` JSON body into a [`Series`].
///
/// Values are parsed as exact decimals before conversion so provider strings
/// such as `"0.1"` map to the nearest f64.
pub fn parse_observations(series_id: &str, body: &str) -> Result<Series, FetchError> {
    let response: ObservationsResponse = serde_json::from_str(body)
        .map_err(|err| FetchError::Decode(format!("series `{series_id}`: {err}")))?;

    let mut observations = Vec::with_capacity(response.observations.len());
    for raw in response.observations {
        let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(|err| {
            FetchError::Decode(format!(
                "series `{series_id}`: invalid date `{}`: {err}",
                raw.date
            ))
        })?;
        observations.push(Observation::new(date, parse_value(series_id, &raw.value)?));
    }

    Series::new(series_id, observations).map_err(|source| FetchError::InvalidSeries {
        series_id: series_id.to_owned(),
        source,
    })
}

fn parse_value(series_id: &str, raw: &str) -> Result<Option<f64>, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == MISSING_VALUE {
        return Ok(None);
    }
    let decimal = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|err| {
            FetchError::Decode(format!(
                "series `{series_id}`: invalid value `{trimmed}`: {err}"
            ))
        })?;
    decimal_to_f64(decimal, "observation value")
        .map(Some)
        .map_err(|source| FetchError::InvalidSeries {
            series_id: series_id.to_owned(),
            source,
        })
}

/// Maps a non-success response to a provider error, preferring the error
/// body FRED sends over the bare status.
pub fn parse_error_response(status: u16, body: &str) -> FetchError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) => FetchError::Provider {
            code: parsed.error_code.unwrap_or(status),
            message: parsed.error_message,
        },
        Err(_) => FetchError::Provider {
            code: status,
            message: body.chars().take(200).collect(),
        },
    }
}

#[cfg(feature = "fred-client")]
pub use client::FredClient;

#[cfg(feature = "fred-client")]
mod client {
    use std::time::Duration;

    use chrono::NaiveDate;
    use tracing::debug;

    use super::{parse_error_response, parse_observations};
    use crate::config::FredConfig;
    use crate::core::Series;
    use crate::error::FetchError;
    use crate::fetch::SeriesFetcher;

    /// Blocking client for `GET /fred/series/observations`.
    pub struct FredClient {
        http: reqwest::blocking::Client,
        api_key: String,
        base_url: String,
    }

    impl std::fmt::Debug for FredClient {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("FredClient")
                .field("base_url", &self.base_url)
                .field("api_key", &"<redacted>")
                .finish()
        }
    }

    impl FredClient {
        pub fn new(api_key: impl Into<String>, config: &FredConfig) -> Result<Self, FetchError> {
            let http = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .user_agent(concat!("econ-dash/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|err| FetchError::Request(format!("http client setup failed: {err}")))?;
            Ok(Self {
                http,
                api_key: api_key.into(),
                base_url: config.base_url.trim_end_matches('/').to_owned(),
            })
        }
    }

    impl SeriesFetcher for FredClient {
        fn fetch(
            &self,
            series_id: &str,
            start: Option<NaiveDate>,
            end: Option<NaiveDate>,
        ) -> Result<Series, FetchError> {
            let url = format!("{}/fred/series/observations", self.base_url);
            let mut query: Vec<(&str, String)> = vec![
                ("series_id", series_id.to_owned()),
                ("api_key", self.api_key.clone()),
                ("file_type", "json".to_owned()),
            ];
            if let Some(start) = start {
                query.push(("observation_start", start.format("%Y-%m-%d").to_string()));
            }
            if let Some(end) = end {
                query.push(("observation_end", end.format("%Y-%m-%d").to_string()));
            }

            debug!(series_id, ?start, ?end, "fetching fred series");
            let response = self
                .http
                .get(url)
                .query(&query)
                .send()
                .map_err(|err| FetchError::Request(err.without_url().to_string()))?;
            let status = response.status();
            let body = response
                .text()
                .map_err(|err| FetchError::Request(err.without_url().to_string()))?;

            if !status.is_success() {
                return Err(parse_error_response(status.as_u16(), &body));
            }
            parse_observations(series_id, &body)
        }
    }
}
