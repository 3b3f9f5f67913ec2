use serde::{Deserialize, Serialize};

use crate::core::scale::normalize_range;
use crate::core::{DataPoint, LinearScale, Rect};
use crate::error::{ChartError, ChartResult};

/// Vertical mapping mode of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScaleMode {
    /// Uniform spacing in raw units.
    #[default]
    Linear,
    /// Uniform spacing in natural-log units; only values > 0 are drawable.
    Logarithmic,
}

impl ScaleMode {
    /// Whether `value` can be placed on an axis using this mode.
    #[must_use]
    pub fn is_drawable(self, value: f64) -> bool {
        match self {
            Self::Linear => value.is_finite(),
            Self::Logarithmic => value.is_finite() && value > 0.0,
        }
    }
}

/// Autoscale padding for the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.05,
            bottom_padding_ratio: 0.05,
            min_span_absolute: 0.000_001,
        }
    }
}

impl ValueScaleTuning {
    fn validate(self) -> ChartResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "value scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "value scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Value axis mapped onto an inverted pixel Y axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    transformed: LinearScale,
    domain_start: f64,
    domain_end: f64,
    mode: ScaleMode,
}

impl ValueScale {
    pub fn new(value_min: f64, value_max: f64) -> ChartResult<Self> {
        Self::new_with_mode(value_min, value_max, ScaleMode::Linear)
    }

    pub fn new_with_mode(value_min: f64, value_max: f64, mode: ScaleMode) -> ChartResult<Self> {
        if !value_min.is_finite() || !value_max.is_finite() || value_min == value_max {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        let transformed = LinearScale::new(
            to_scale_domain(value_min, mode)?,
            to_scale_domain(value_max, mode)?,
        )?;
        Ok(Self {
            transformed,
            domain_start: value_min,
            domain_end: value_max,
            mode,
        })
    }

    /// Fits the domain to the `y` of every point, padded per `tuning`.
    ///
    /// In logarithmic mode padding is applied in log space.
    pub fn from_points_tuned(
        points: &[DataPoint],
        tuning: ValueScaleTuning,
        mode: ScaleMode,
    ) -> ChartResult<Self> {
        let tuning = tuning.validate()?;
        if points.is_empty() {
            return Err(ChartError::InvalidData(
                "value scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            if !mode.is_drawable(point.y) {
                return Err(ChartError::InvalidData(format!(
                    "value {} cannot be placed on a {mode:?} scale",
                    point.y
                )));
            }
            min = min.min(point.y);
            max = max.max(point.y);
        }

        match mode {
            ScaleMode::Linear => {
                let (base_min, base_max) = normalize_range(min, max, tuning.min_span_absolute)?;
                let span = base_max - base_min;
                Self::new_with_mode(
                    base_min - span * tuning.bottom_padding_ratio,
                    base_max + span * tuning.top_padding_ratio,
                    mode,
                )
            }
            ScaleMode::Logarithmic => {
                let min_log_span = {
                    let candidate = (min + tuning.min_span_absolute).ln() - min.ln();
                    if candidate.is_finite() && candidate > 0.0 {
                        candidate
                    } else {
                        f64::EPSILON
                    }
                };
                let (base_min, base_max) = normalize_range(min.ln(), max.ln(), min_log_span)?;
                let span = base_max - base_min;
                let padded_min = base_min - span * tuning.bottom_padding_ratio;
                let padded_max = base_max + span * tuning.top_padding_ratio;
                Self::new_with_mode(padded_min.exp(), padded_max.exp(), mode)
            }
        }
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn mode(self) -> ScaleMode {
        self.mode
    }

    /// Maps a value onto the vertical extent of `plot`; larger values sit higher.
    pub fn value_to_y(self, value: f64, plot: Rect) -> ChartResult<f64> {
        let offset = self
            .transformed
            .value_to_offset(to_scale_domain(value, self.mode)?, plot.height)?;
        Ok(plot.bottom() - offset)
    }

    pub fn y_to_value(self, y: f64, plot: Rect) -> ChartResult<f64> {
        let transformed = self
            .transformed
            .offset_to_value(plot.bottom() - y, plot.height)?;
        Ok(from_scale_domain(transformed, self.mode))
    }

    /// Axis ticks inside the domain: 1-2-2.5-5 steps for linear, a 1-2-5
    /// decade ladder for logarithmic.
    pub fn ticks(self, tick_count: usize) -> ChartResult<Vec<f64>> {
        if tick_count == 0 {
            return Ok(Vec::new());
        }
        let (min, max) = (
            self.domain_start.min(self.domain_end),
            self.domain_start.max(self.domain_end),
        );
        match self.mode {
            ScaleMode::Linear => Ok(nice_linear_ticks(min, max, tick_count)),
            ScaleMode::Logarithmic => log_ladder_ticks(min, max, tick_count),
        }
    }
}

fn to_scale_domain(value: f64, mode: ScaleMode) -> ChartResult<f64> {
    if !value.is_finite() {
        return Err(ChartError::InvalidData("value must be finite".to_owned()));
    }

    match mode {
        ScaleMode::Linear => Ok(value),
        ScaleMode::Logarithmic => {
            if value <= 0.0 {
                return Err(ChartError::InvalidData(
                    "log scale requires values > 0".to_owned(),
                ));
            }
            Ok(value.ln())
        }
    }
}

fn from_scale_domain(transformed: f64, mode: ScaleMode) -> f64 {
    match mode {
        ScaleMode::Linear => transformed,
        ScaleMode::Logarithmic => transformed.exp(),
    }
}

fn nice_linear_ticks(min: f64, max: f64, tick_count: usize) -> Vec<f64> {
    let intervals = tick_count.saturating_sub(1).max(1) as f64;
    let raw_step = (max - min) / intervals;
    if !raw_step.is_finite() || raw_step <= 0.0 {
        return vec![min];
    }

    let magnitude = 10_f64.powf(raw_step.log10().floor());
    let residual = raw_step / magnitude;
    let multiplier = [1.0, 2.0, 2.5, 5.0, 10.0]
        .into_iter()
        .find(|candidate| residual <= *candidate)
        .unwrap_or(10.0);
    let step = multiplier * magnitude;

    let mut ticks = Vec::new();
    let mut index = (min / step).ceil();
    loop {
        let value = index * step;
        if value > max + step * 1e-9 {
            break;
        }
        // Avoid printing "-0.0" for a tick that lands on zero.
        ticks.push(if value.abs() < step * 1e-9 { 0.0 } else { value });
        index += 1.0;
    }
    ticks
}

fn log_ladder_ticks(min: f64, max: f64, tick_count: usize) -> ChartResult<Vec<f64>> {
    if min <= 0.0 || max <= 0.0 {
        return Err(ChartError::InvalidData(
            "log scale requires values > 0".to_owned(),
        ));
    }

    let min_exp = min.log10().floor() as i32;
    let max_exp = max.log10().ceil() as i32;

    let mut ticks = Vec::new();
    for exp in min_exp..=max_exp {
        let decade = 10_f64.powi(exp);
        for multiplier in [1.0, 2.0, 5.0] {
            let candidate = decade * multiplier;
            if candidate >= min && candidate <= max {
                ticks.push(candidate);
            }
        }
    }

    // A narrow log range can fall between ladder rungs; keep the ends labeled.
    if ticks.len() < 2 {
        ticks = vec![min, max];
    }

    Ok(evenly_sample_ticks(ticks, tick_count))
}

fn evenly_sample_ticks(ticks: Vec<f64>, target: usize) -> Vec<f64> {
    if ticks.len() <= target || target == 0 {
        return ticks;
    }
    if target == 1 {
        return vec![ticks[0]];
    }

    let last_index = ticks.len() - 1;
    let mut sampled: Vec<f64> = Vec::with_capacity(target);
    for step in 0..target {
        let ratio = (step as f64) / ((target - 1) as f64);
        let index = (ratio * (last_index as f64)).round() as usize;
        let value = ticks[index.min(last_index)];
        if sampled
            .last()
            .is_some_and(|previous| approx_equal(*previous, value))
        {
            continue;
        }
        sampled.push(value);
    }
    sampled
}

fn approx_equal(lhs: f64, rhs: f64) -> bool {
    let scale = lhs.abs().max(rhs.abs()).max(1.0);
    (lhs - rhs).abs() <= scale * 1e-12
}
