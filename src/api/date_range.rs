use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Length of the "Last 10 Years" window. Leap days are not compensated.
pub const LAST_TEN_YEARS_DAYS: i64 = 3650;

/// Time window the user picked for the whole dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRangeSelection {
    #[default]
    FullHistory,
    LastTenYears,
}

impl DateRangeSelection {
    pub const ALL: [DateRangeSelection; 2] = [Self::FullHistory, Self::LastTenYears];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::FullHistory => "Full History",
            Self::LastTenYears => "Last 10 Years",
        }
    }

    /// Fetch bounds for this selection as of `now`.
    #[must_use]
    pub fn resolve(self, now: DateTime<Utc>) -> DateBounds {
        match self {
            Self::FullHistory => DateBounds::unbounded(),
            Self::LastTenYears => {
                let end = now.date_naive();
                let start = (now - Duration::days(LAST_TEN_YEARS_DAYS)).date_naive();
                DateBounds {
                    start: Some(start),
                    end: Some(end),
                }
            }
        }
    }
}

impl fmt::Display for DateRangeSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DateRangeSelection {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "full" | "full-history" | "full history" => Ok(Self::FullHistory),
            "last-10-years" | "last 10 years" | "10y" => Ok(Self::LastTenYears),
            other => Err(format!(
                "unknown date range `{other}` (expected `full` or `last-10-years`)"
            )),
        }
    }
}

/// Inclusive fetch window; `None` leaves that side open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateBounds {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateBounds {
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    #[must_use]
    pub fn is_unbounded(self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}

impl fmt::Display for DateBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn side(date: Option<NaiveDate>) -> String {
            date.map_or_else(|| "None".to_owned(), |date| date.to_string())
        }
        write!(f, "{} to {}", side(self.start), side(self.end))
    }
}
