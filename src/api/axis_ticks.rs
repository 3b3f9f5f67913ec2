/// Rotated date labels need more horizontal room than upright ones.
pub(super) const AXIS_TIME_TARGET_SPACING_PX: f64 = 110.0;
pub(super) const AXIS_TIME_MIN_TICKS: usize = 2;
pub(super) const AXIS_TIME_MAX_TICKS: usize = 12;

pub(super) const AXIS_VALUE_TARGET_SPACING_PX: f64 = 60.0;
pub(super) const AXIS_VALUE_MIN_TICKS: usize = 3;
pub(super) const AXIS_VALUE_MAX_TICKS: usize = 10;

/// Number of ticks that keeps roughly `target_spacing_px` between labels.
pub(super) fn axis_tick_target_count(
    axis_span_px: f64,
    target_spacing_px: f64,
    min_ticks: usize,
    max_ticks: usize,
) -> usize {
    if !axis_span_px.is_finite() || axis_span_px <= 0.0 {
        return min_ticks;
    }
    if !target_spacing_px.is_finite() || target_spacing_px <= 0.0 {
        return min_ticks;
    }

    let raw = (axis_span_px / target_spacing_px).floor() as usize + 1;
    raw.clamp(min_ticks, max_ticks)
}

#[cfg(test)]
mod tests {
    use super::axis_tick_target_count;

    #[test]
    fn tick_count_scales_with_span_and_clamps() {
        assert_eq!(axis_tick_target_count(600.0, 60.0, 3, 10), 10);
        assert_eq!(axis_tick_target_count(240.0, 60.0, 3, 10), 5);
        assert_eq!(axis_tick_target_count(30.0, 60.0, 3, 10), 3);
        assert_eq!(axis_tick_target_count(f64::NAN, 60.0, 3, 10), 3);
        assert_eq!(axis_tick_target_count(400.0, 0.0, 2, 12), 2);
    }
}
