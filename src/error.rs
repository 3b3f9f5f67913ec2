use std::path::PathBuf;

use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

/// Geometry and data validation failures raised by the chart core.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid panel catalog: {0}")]
    InvalidCatalog(String),
}

/// Failure to obtain one series from the data provider.
///
/// These are absorbed by the section renderer and surfaced as warnings.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("provider error {code}: {message}")]
    Provider { code: u16, message: String },

    #[error("failed to decode provider response: {0}")]
    Decode(String),

    #[error("unknown series `{0}`")]
    UnknownSeries(String),

    #[error("invalid series `{series_id}`: {source}")]
    InvalidSeries {
        series_id: String,
        #[source]
        source: ChartError,
    },
}

/// Startup configuration failures. Fatal before any render pass.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required credential `{name}` (set it in the environment or the secrets file)")]
    MissingCredential { name: &'static str },

    #[error("failed to read `{path}`: {message}")]
    Read { path: PathBuf, message: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Whole-pass failure shown to the user as a single banner.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("error creating plot: {0}")]
    Render(#[from] ChartError),
}

impl DashboardError {
    /// The one-line message shown in place of the dashboard.
    #[must_use]
    pub fn banner(&self) -> String {
        format!("An error occurred: {self}")
    }
}
