use std::collections::HashMap;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::core::{Observation, Series};
use crate::error::{ChartError, ConfigError, FetchError};
use crate::fetch::SeriesFetcher;

/// In-memory series store keyed by provider id.
///
/// Serves offline runs from a JSON fixture file and backs the test suite.
/// Date bounds are applied the way the provider applies them: inclusive on
/// both ends.
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    series: HashMap<String, Series>,
}

#[derive(Debug, Deserialize)]
struct FixtureObservation {
    date: String,
    value: Option<f64>,
}

impl StaticFetcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.insert(series);
        self
    }

    pub fn insert(&mut self, series: Series) {
        self.series.insert(series.id().to_owned(), series);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Parses `{"SERIES_ID": [{"date": "YYYY-MM-DD", "value": 1.5 | null}, ...]}`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let parsed: HashMap<String, Vec<FixtureObservation>> = serde_json::from_str(raw)
            .map_err(|err| ConfigError::Invalid(format!("invalid series fixture json: {err}")))?;

        let mut fetcher = Self::new();
        for (series_id, rows) in parsed {
            let observations = rows
                .into_iter()
                .map(|row| {
                    NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
                        .map(|date| Observation::new(date, row.value))
                        .map_err(|err| {
                            ConfigError::Invalid(format!(
                                "series `{series_id}` has invalid date `{}`: {err}",
                                row.date
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let series = Series::new(series_id, observations)
                .map_err(|err: ChartError| ConfigError::Invalid(err.to_string()))?;
            fetcher.insert(series);
        }
        Ok(fetcher)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|err| ConfigError::Read {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Self::from_json_str(&raw)
    }
}

impl SeriesFetcher for StaticFetcher {
    fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Series, FetchError> {
        self.series
            .get(series_id)
            .map(|series| series.window(start, end))
            .ok_or_else(|| FetchError::UnknownSeries(series_id.to_owned()))
    }
}
