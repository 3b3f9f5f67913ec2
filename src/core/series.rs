use chrono::NaiveDate;

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// One dated sample; `value` is `None` for a missing observation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Observation {
    #[must_use]
    pub fn new(date: NaiveDate, value: Option<f64>) -> Self {
        Self { date, value }
    }

    #[must_use]
    pub fn present(date: NaiveDate, value: f64) -> Self {
        Self::new(date, Some(value))
    }

    #[must_use]
    pub fn missing(date: NaiveDate) -> Self {
        Self::new(date, None)
    }
}

/// Provider time series with strictly increasing dates.
///
/// Non-finite values are stored as missing observations.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    id: String,
    observations: Vec<Observation>,
}

impl Series {
    pub fn new(id: impl Into<String>, observations: Vec<Observation>) -> ChartResult<Self> {
        let id = id.into();
        for pair in observations.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(ChartError::InvalidData(format!(
                    "series `{id}` dates must be strictly increasing ({} follows {})",
                    pair[1].date, pair[0].date
                )));
            }
        }

        let observations = observations
            .into_iter()
            .map(|obs| Observation::new(obs.date, obs.value.filter(|value| value.is_finite())))
            .collect();
        Ok(Self { id, observations })
    }

    #[must_use]
    pub fn empty(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            observations: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Observations with a present value, as plot points.
    #[must_use]
    pub fn present_points(&self) -> Vec<DataPoint> {
        self.observations
            .iter()
            .filter_map(|obs| obs.value.map(|value| DataPoint::from_date(obs.date, value)))
            .collect()
    }

    /// Copy restricted to the inclusive `[start, end]` window; `None` is unbounded.
    #[must_use]
    pub fn window(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let observations = self
            .observations
            .iter()
            .copied()
            .filter(|obs| start.is_none_or(|start| obs.date >= start))
            .filter(|obs| end.is_none_or(|end| obs.date <= end))
            .collect();
        Self {
            id: self.id.clone(),
            observations,
        }
    }

    pub(crate) fn with_observations(&self, observations: Vec<Observation>) -> Self {
        Self {
            id: self.id.clone(),
            observations,
        }
    }
}
