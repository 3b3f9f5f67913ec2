use crate::core::{DataPoint, Rect, TimeScale, ValueScale};
use crate::error::ChartResult;

/// Projected line segment in figure pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projects a contiguous run of points into adjacent line segments inside `plot`.
///
/// Deterministic and side-effect free so rendering and tests consume the
/// same geometry.
pub fn project_line_segments(
    points: &[DataPoint],
    time_scale: TimeScale,
    value_scale: ValueScale,
    plot: Rect,
) -> ChartResult<Vec<LineSegment>> {
    if points.len() < 2 {
        return Ok(Vec::new());
    }

    let mut mapped = Vec::with_capacity(points.len());
    for point in points {
        let x = time_scale.time_to_x(point.x, plot)?;
        let y = value_scale.value_to_y(point.y, plot)?;
        mapped.push((x, y));
    }

    Ok(mapped
        .windows(2)
        .map(|pair| LineSegment {
            x1: pair[0].0,
            y1: pair[0].1,
            x2: pair[1].0,
            y2: pair[1].1,
        })
        .collect())
}

/// Splits an optional-valued series into runs of consecutive drawable points.
///
/// A `None` breaks the line, so masked samples leave a gap instead of being
/// bridged.
#[must_use]
pub fn contiguous_runs(points: &[(f64, Option<f64>)]) -> Vec<Vec<DataPoint>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for (time, value) in points {
        match value {
            Some(value) => current.push(DataPoint::new(*time, *value)),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}
