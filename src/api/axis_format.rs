use chrono::NaiveDate;

/// Pattern used for every time-axis tick label.
pub const TIME_AXIS_LABEL_PATTERN: &str = "%Y-%m-%d";

/// Compact magnitude label for value-axis ticks.
///
/// The largest bucket whose threshold `|value|` reaches wins: `B` for
/// billions, `M` for millions, `K` for thousands, plain otherwise. Always one
/// decimal; the sign is preserved.
#[must_use]
pub fn format_magnitude(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    let magnitude = value.abs();
    if magnitude >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if magnitude >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if magnitude >= 1e3 {
        format!("{:.1}K", value / 1e3)
    } else {
        format!("{value:.1}")
    }
}

#[must_use]
pub fn format_time_axis_label(date: NaiveDate) -> String {
    date.format(TIME_AXIS_LABEL_PATTERN).to_string()
}
