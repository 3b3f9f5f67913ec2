//! Process configuration: figure geometry, provider settings and the FRED
//! API credential.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::core::Viewport;
use crate::error::ConfigError;

/// Name of the credential, both as environment variable and secrets-file key.
pub const FRED_API_KEY: &str = "FRED_API_KEY";

pub const DEFAULT_FRED_BASE_URL: &str = "https://api.stlouisfed.org";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FredConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
}

impl Default for FredConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_FRED_BASE_URL.to_owned(),
            request_timeout_secs: 30,
        }
    }
}

/// Dashboard settings, loadable from JSON. Missing keys take defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub figure_width_px: u32,
    pub figure_height_px: u32,
    pub fred: FredConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        // A 20x40 inch figure at 100 dpi.
        Self {
            figure_width_px: 2000,
            figure_height_px: 4000,
            fred: FredConfig::default(),
        }
    }
}

impl DashboardConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|err| ConfigError::Invalid(format!("invalid config json: {err}")))?;
        config.validate()
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_json_str(&read_file(path)?)
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.figure_width_px, self.figure_height_px)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if !self.viewport().is_valid() {
            return Err(ConfigError::Invalid(format!(
                "figure size must be > 0 (got {}x{})",
                self.figure_width_px, self.figure_height_px
            )));
        }
        if self.fred.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "fred.request_timeout_secs must be > 0".to_owned(),
            ));
        }
        if self.fred.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "fred.base_url must not be empty".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Provider credential, resolved once at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    fred_api_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("fred_api_key", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Reads the key from the process environment, then from an optional
    /// JSON secrets file (`{"FRED_API_KEY": "..."}`).
    pub fn from_env(secrets_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::resolve(|name| std::env::var(name).ok(), secrets_path)
    }

    /// Resolves the key through `lookup` first, falling back to the secrets
    /// file. Blank values count as missing.
    pub fn resolve<L>(lookup: L, secrets_path: Option<&Path>) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(FRED_API_KEY).and_then(non_blank) {
            return Ok(Self { fred_api_key: key });
        }

        if let Some(path) = secrets_path {
            let secrets: HashMap<String, serde_json::Value> = serde_json::from_str(&read_file(path)?)
                .map_err(|err| {
                    ConfigError::Invalid(format!(
                        "invalid secrets file `{}`: {err}",
                        path.display()
                    ))
                })?;
            if let Some(key) = secrets
                .get(FRED_API_KEY)
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned)
                .and_then(non_blank)
            {
                return Ok(Self { fred_api_key: key });
            }
        }

        Err(ConfigError::MissingCredential {
            name: FRED_API_KEY,
        })
    }

    #[must_use]
    pub fn fred_api_key(&self) -> &str {
        &self.fred_api_key
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|err| ConfigError::Read {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
