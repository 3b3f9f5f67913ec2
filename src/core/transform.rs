use serde::{Deserialize, Serialize};

use crate::core::{Observation, Series};

/// Observation lag used for year-over-year change.
///
/// Assumes monthly spacing; quarterly or annual series get a multi-year lag.
pub const YEAR_OVER_YEAR_LAG: usize = 12;

/// How a raw series is turned into the plotted series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransformMode {
    #[default]
    Raw,
    YearOverYear,
}

/// Applies `mode` to `series`. `Raw` hands the input back untouched.
#[must_use]
pub fn transform(series: Series, mode: TransformMode) -> Series {
    match mode {
        TransformMode::Raw => series,
        TransformMode::YearOverYear => year_over_year_change(&series),
    }
}

/// Fractional change against the observation `YEAR_OVER_YEAR_LAG` positions back.
///
/// `out[t] = s[t] / s[t - 12] - 1`. Missing for the first twelve observations,
/// when either side is missing, and when the quotient is not finite.
#[must_use]
pub fn year_over_year_change(series: &Series) -> Series {
    lagged_change(series, YEAR_OVER_YEAR_LAG)
}

pub(crate) fn lagged_change(series: &Series, lag: usize) -> Series {
    let observations = series.observations();
    let changed = observations
        .iter()
        .enumerate()
        .map(|(index, obs)| {
            let value = index
                .checked_sub(lag)
                .and_then(|lagged| observations[lagged].value)
                .zip(obs.value)
                .map(|(previous, current)| current / previous - 1.0)
                .filter(|change| change.is_finite());
            Observation::new(obs.date, value)
        })
        .collect();
    series.with_observations(changed)
}
