use chrono::{Datelike, Days, Months, NaiveDate};

use crate::core::primitives::{date_to_unix_seconds, unix_seconds_to_date};
use crate::core::scale::normalize_range;
use crate::core::{DataPoint, LinearScale, Rect};
use crate::error::{ChartError, ChartResult};

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Padding applied around the fitted time range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScaleTuning {
    pub left_padding_ratio: f64,
    pub right_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for TimeScaleTuning {
    fn default() -> Self {
        Self {
            left_padding_ratio: 0.05,
            right_padding_ratio: 0.05,
            min_span_absolute: SECONDS_PER_DAY,
        }
    }
}

impl TimeScaleTuning {
    fn validate(self) -> ChartResult<Self> {
        if !self.left_padding_ratio.is_finite()
            || !self.right_padding_ratio.is_finite()
            || self.left_padding_ratio < 0.0
            || self.right_padding_ratio < 0.0
        {
            return Err(ChartError::InvalidData(
                "time scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ChartError::InvalidData(
                "time scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Horizontal axis over unix seconds.
///
/// `full_*` is the fitted data range, `visible_*` adds the tuning padding and
/// is what maps onto the plot width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    full_start: f64,
    full_end: f64,
    visible_start: f64,
    visible_end: f64,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64) -> ChartResult<Self> {
        let (start, end) = normalize_range(time_start, time_end, 1.0)?;
        Ok(Self {
            full_start: start,
            full_end: end,
            visible_start: start,
            visible_end: end,
        })
    }

    pub fn from_points(points: &[DataPoint]) -> ChartResult<Self> {
        Self::from_points_tuned(points, TimeScaleTuning::default())
    }

    pub fn from_points_tuned(points: &[DataPoint], tuning: TimeScaleTuning) -> ChartResult<Self> {
        let tuning = tuning.validate()?;

        if points.is_empty() {
            return Err(ChartError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for point in points {
            if !point.x.is_finite() {
                return Err(ChartError::InvalidData(
                    "time values must be finite".to_owned(),
                ));
            }
            min = min.min(point.x);
            max = max.max(point.x);
        }

        let (full_start, full_end) = normalize_range(min, max, tuning.min_span_absolute)?;
        let full_span = full_end - full_start;

        Ok(Self {
            full_start,
            full_end,
            visible_start: full_start - full_span * tuning.left_padding_ratio,
            visible_end: full_end + full_span * tuning.right_padding_ratio,
        })
    }

    #[must_use]
    pub fn full_range(self) -> (f64, f64) {
        (self.full_start, self.full_end)
    }

    #[must_use]
    pub fn visible_range(self) -> (f64, f64) {
        (self.visible_start, self.visible_end)
    }

    /// Maps a unix-second timestamp onto the horizontal extent of `plot`.
    pub fn time_to_x(self, time: f64, plot: Rect) -> ChartResult<f64> {
        let offset = self.visible_linear()?.value_to_offset(time, plot.width)?;
        Ok(plot.x + offset)
    }

    pub fn x_to_time(self, x: f64, plot: Rect) -> ChartResult<f64> {
        self.visible_linear()?.offset_to_value(x - plot.x, plot.width)
    }

    /// Calendar-aligned tick dates inside the visible range.
    ///
    /// Picks the finest step among days, months and years that yields at
    /// most `target_count` ticks, the way a date locator spaces major ticks.
    #[must_use]
    pub fn calendar_ticks(self, target_count: usize) -> Vec<NaiveDate> {
        let target_count = target_count.max(2);
        let (Some(start), Some(end)) = (
            unix_seconds_to_date(self.visible_start),
            unix_seconds_to_date(self.visible_end),
        ) else {
            return Vec::new();
        };

        let span_days = (self.visible_end - self.visible_start) / SECONDS_PER_DAY;
        let step = CalendarStep::LADDER
            .iter()
            .copied()
            .find(|step| span_days / step.approx_days() <= target_count as f64)
            .unwrap_or(CalendarStep::Years(1_000));

        let mut ticks = Vec::new();
        let mut cursor = step.first_on_or_after(start);
        while let Some(date) = cursor {
            if date > end {
                break;
            }
            let seconds = date_to_unix_seconds(date);
            if seconds >= self.visible_start && seconds <= self.visible_end {
                ticks.push(date);
            }
            cursor = step.advance(date);
        }
        ticks
    }

    fn visible_linear(self) -> ChartResult<LinearScale> {
        LinearScale::new(self.visible_start, self.visible_end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CalendarStep {
    Days(u32),
    Months(u32),
    Years(i32),
}

impl CalendarStep {
    const LADDER: [CalendarStep; 18] = [
        CalendarStep::Days(1),
        CalendarStep::Days(2),
        CalendarStep::Days(7),
        CalendarStep::Days(14),
        CalendarStep::Months(1),
        CalendarStep::Months(2),
        CalendarStep::Months(3),
        CalendarStep::Months(6),
        CalendarStep::Years(1),
        CalendarStep::Years(2),
        CalendarStep::Years(5),
        CalendarStep::Years(10),
        CalendarStep::Years(20),
        CalendarStep::Years(25),
        CalendarStep::Years(50),
        CalendarStep::Years(100),
        CalendarStep::Years(200),
        CalendarStep::Years(500),
    ];

    fn approx_days(self) -> f64 {
        match self {
            Self::Days(n) => f64::from(n),
            Self::Months(n) => f64::from(n) * 30.44,
            Self::Years(n) => f64::from(n) * 365.25,
        }
    }

    fn first_on_or_after(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(n) => {
                let n = i64::from(n);
                let day_number = i64::from(date.num_days_from_ce());
                let remainder = day_number.rem_euclid(n);
                let skip = if remainder == 0 { 0 } else { n - remainder };
                date.checked_add_days(Days::new(skip as u64))
            }
            Self::Months(n) => {
                let mut cursor = NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?;
                if cursor < date {
                    cursor = cursor.checked_add_months(Months::new(1))?;
                }
                while cursor.month0() % n != 0 {
                    cursor = cursor.checked_add_months(Months::new(1))?;
                }
                Some(cursor)
            }
            Self::Years(n) => {
                let mut year = date.year();
                if NaiveDate::from_ymd_opt(year, 1, 1)? < date {
                    year += 1;
                }
                let remainder = year.rem_euclid(n);
                if remainder != 0 {
                    year += n - remainder;
                }
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        }
    }

    fn advance(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Self::Days(n) => date.checked_add_days(Days::new(u64::from(n))),
            Self::Months(n) => date.checked_add_months(Months::new(n)),
            Self::Years(n) => NaiveDate::from_ymd_opt(date.year() + n, 1, 1),
        }
    }
}
