//! Data-provider boundary.
//!
//! The dashboard only depends on [`SeriesFetcher`]; concrete sources are the
//! FRED HTTP client and an in-memory fixture store.

mod fred;
mod static_fetcher;

#[cfg(feature = "fred-client")]
pub use fred::FredClient;
pub use fred::{parse_error_response, parse_observations};
pub use static_fetcher::StaticFetcher;

use chrono::NaiveDate;

use crate::core::Series;
use crate::error::FetchError;

/// Fetches one provider series, optionally bounded to an inclusive date window.
pub trait SeriesFetcher {
    fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Series, FetchError>;
}

impl<T: SeriesFetcher + ?Sized> SeriesFetcher for &T {
    fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Series, FetchError> {
        (**self).fetch(series_id, start, end)
    }
}

impl<T: SeriesFetcher + ?Sized> SeriesFetcher for Box<T> {
    fn fetch(
        &self,
        series_id: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Series, FetchError> {
        (**self).fetch(series_id, start, end)
    }
}
