use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::api::axis_format::{format_magnitude, format_time_axis_label};
use crate::api::axis_ticks::{
    AXIS_TIME_MAX_TICKS, AXIS_TIME_MIN_TICKS, AXIS_TIME_TARGET_SPACING_PX, AXIS_VALUE_MAX_TICKS,
    AXIS_VALUE_MIN_TICKS, AXIS_VALUE_TARGET_SPACING_PX, axis_tick_target_count,
};
use crate::api::{DashboardStyle, DateBounds, Panel};
use crate::core::primitives::date_to_unix_seconds;
use crate::core::{
    AlignedFrame, DataPoint, Rect, ScaleMode, Series, TimeScale, TimeScaleTuning, ValueScale,
    ValueScaleTuning, contiguous_runs, project_line_segments, transform,
};
use crate::error::ChartResult;
use crate::fetch::SeriesFetcher;
use crate::render::{
    CanvasLayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextHAlign, TextPrimitive,
    TextVAlign,
};

/// Text drawn in place of a chart whose series all failed.
pub const NO_DATA_PLACEHOLDER: &str = "No data available";

/// Why one series of a panel was left out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningReason {
    FetchFailed(String),
    Empty,
}

/// A series omitted from its panel. Displays as the user-facing warning line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesWarning {
    pub panel: String,
    pub label: String,
    pub series_id: String,
    pub reason: WarningReason,
}

impl fmt::Display for SeriesWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "No data available for {} ({})",
            self.label, self.series_id
        )
    }
}

pub type SeriesWarnings = SmallVec<[SeriesWarning; 4]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelOutcome {
    /// At least one series survived. `rows` counts the aligned dates.
    Plotted { labels: Vec<String>, rows: usize },
    NoData,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionReport {
    pub outcome: PanelOutcome,
    pub warnings: SeriesWarnings,
}

impl SectionReport {
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.outcome == PanelOutcome::NoData
    }
}

/// Fetched, transformed and aligned data of one panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelData {
    /// `None` when no series survived fetching.
    pub frame: Option<AlignedFrame>,
    pub warnings: SeriesWarnings,
}

/// Fetches every series of `panel` in legend order, applies the panel
/// transform and joins the survivors on complete rows.
///
/// Failed or empty fetches become warnings; they never fail the panel.
pub fn collect_panel_series<F>(panel: &Panel, fetcher: &F, bounds: DateBounds) -> PanelData
where
    F: SeriesFetcher + ?Sized,
{
    let mut warnings = SeriesWarnings::new();
    let mut survivors: Vec<(&str, Series)> = Vec::with_capacity(panel.series.len());

    for (label, series_id) in &panel.series {
        let reason = match fetcher.fetch(series_id, bounds.start, bounds.end) {
            Ok(series) if !series.is_empty() => {
                debug!(
                    panel = %panel.title,
                    series_id = %series_id,
                    observations = series.len(),
                    "fetched series"
                );
                survivors.push((label.as_str(), transform(series, panel.transform)));
                continue;
            }
            Ok(_) => WarningReason::Empty,
            Err(err) => WarningReason::FetchFailed(err.to_string()),
        };

        let warning = SeriesWarning {
            panel: panel.title.clone(),
            label: label.clone(),
            series_id: series_id.clone(),
            reason,
        };
        match &warning.reason {
            WarningReason::FetchFailed(cause) => {
                warn!(panel = %panel.title, series_id = %series_id, error = %cause, "{warning}");
            }
            WarningReason::Empty => {
                warn!(panel = %panel.title, series_id = %series_id, "{warning}");
            }
        }
        warnings.push(warning);
    }

    let frame = (!survivors.is_empty()).then(|| {
        AlignedFrame::inner_join(survivors.iter().map(|(label, series)| (*label, series)))
    });
    PanelData { frame, warnings }
}

/// Renders one panel into `cell` of `frame`.
///
/// Returns an error only for geometry problems; missing data yields a
/// placeholder or warnings instead.
pub fn render_section<F>(
    frame: &mut RenderFrame,
    cell: Rect,
    panel: &Panel,
    fetcher: &F,
    bounds: DateBounds,
    style: &DashboardStyle,
) -> ChartResult<SectionReport>
where
    F: SeriesFetcher + ?Sized,
{
    cell.validate()?;
    let data = collect_panel_series(panel, fetcher, bounds);

    let plot = cell.inset(
        style.plot_inset_left_px,
        style.plot_inset_top_px,
        style.plot_inset_right_px,
        style.plot_inset_bottom_px,
    )?;
    draw_title(frame, cell, panel, style);
    frame.push_rect(
        CanvasLayerKind::Background,
        RectPrimitive::new(plot.x, plot.y, plot.width, plot.height, style.plot_background),
    );

    let Some(aligned) = data.frame else {
        debug!(panel = %panel.title, "no series survived, drawing placeholder");
        let (center_x, center_y) = plot.center();
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                NO_DATA_PLACEHOLDER,
                center_x,
                center_y,
                style.placeholder_font_size_px,
                style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle),
        );
        return Ok(SectionReport {
            outcome: PanelOutcome::NoData,
            warnings: data.warnings,
        });
    };

    let columns = masked_columns(&aligned, panel.scale);
    let drawable: Vec<DataPoint> = columns
        .iter()
        .flat_map(|column| column.iter())
        .filter_map(|(time, value)| value.map(|value| DataPoint::new(*time, value)))
        .collect();

    if drawable.is_empty() {
        debug!(panel = %panel.title, "aligned frame has no drawable rows");
    } else {
        let time_scale = TimeScale::from_points_tuned(&drawable, TimeScaleTuning::default())?;
        let value_scale =
            ValueScale::from_points_tuned(&drawable, ValueScaleTuning::default(), panel.scale)?;

        draw_value_axis(frame, plot, value_scale, style)?;
        draw_time_axis(frame, plot, time_scale, style)?;

        for (index, column) in columns.iter().enumerate() {
            let color = style.series_color(index);
            for run in contiguous_runs(column) {
                for segment in project_line_segments(&run, time_scale, value_scale, plot)? {
                    frame.push_line(
                        CanvasLayerKind::Series,
                        LinePrimitive::new(
                            segment.x1,
                            segment.y1,
                            segment.x2,
                            segment.y2,
                            style.series_line_width,
                            color,
                        ),
                    );
                }
            }
        }
    }

    let labels: Vec<String> = aligned.labels().map(str::to_owned).collect();
    draw_legend(frame, plot, &labels, style);
    draw_y_axis_label(frame, cell, plot, panel, style);

    debug!(
        panel = %panel.title,
        series = labels.len(),
        rows = aligned.row_count(),
        "rendered panel"
    );
    Ok(SectionReport {
        outcome: PanelOutcome::Plotted {
            labels,
            rows: aligned.row_count(),
        },
        warnings: data.warnings,
    })
}

/// Per-column `(unix seconds, value)` pairs; values the scale cannot place
/// become `None` so the line breaks there.
fn masked_columns(aligned: &AlignedFrame, mode: ScaleMode) -> Vec<Vec<(f64, Option<f64>)>> {
    let times: Vec<f64> = aligned
        .index()
        .iter()
        .map(|date| date_to_unix_seconds(*date))
        .collect();

    aligned
        .labels()
        .filter_map(|label| aligned.column(label))
        .map(|values| {
            times
                .iter()
                .zip(values)
                .map(|(time, value)| (*time, mode.is_drawable(*value).then_some(*value)))
                .collect()
        })
        .collect()
}

fn draw_title(frame: &mut RenderFrame, cell: Rect, panel: &Panel, style: &DashboardStyle) {
    let (center_x, _) = cell.center();
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            panel.title.clone(),
            center_x,
            cell.y + style.plot_inset_top_px * 0.5,
            style.panel_title_font_size_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Middle)
        .bold(),
    );
}

fn draw_value_axis(
    frame: &mut RenderFrame,
    plot: Rect,
    value_scale: ValueScale,
    style: &DashboardStyle,
) -> ChartResult<()> {
    let tick_count = axis_tick_target_count(
        plot.height,
        AXIS_VALUE_TARGET_SPACING_PX,
        AXIS_VALUE_MIN_TICKS,
        AXIS_VALUE_MAX_TICKS,
    );
    for tick in value_scale.ticks(tick_count)? {
        let y = value_scale.value_to_y(tick, plot)?;
        if y < plot.y || y > plot.bottom() {
            continue;
        }
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                plot.x,
                y,
                plot.right(),
                y,
                style.grid_line_width,
                style.grid_line_color,
            )
            .with_stroke_style(style.grid_line_style),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_magnitude(tick),
                plot.x - style.tick_label_gap_px,
                y,
                style.tick_label_font_size_px,
                style.text_color,
                TextHAlign::Right,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }
    Ok(())
}

fn draw_time_axis(
    frame: &mut RenderFrame,
    plot: Rect,
    time_scale: TimeScale,
    style: &DashboardStyle,
) -> ChartResult<()> {
    let tick_count = axis_tick_target_count(
        plot.width,
        AXIS_TIME_TARGET_SPACING_PX,
        AXIS_TIME_MIN_TICKS,
        AXIS_TIME_MAX_TICKS,
    );
    for date in time_scale.calendar_ticks(tick_count) {
        let x = time_scale.time_to_x(date_to_unix_seconds(date), plot)?;
        if x < plot.x || x > plot.right() {
            continue;
        }
        frame.push_line(
            CanvasLayerKind::Grid,
            LinePrimitive::new(
                x,
                plot.y,
                x,
                plot.bottom(),
                style.grid_line_width,
                style.grid_line_color,
            )
            .with_stroke_style(style.grid_line_style),
        );
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                format_time_axis_label(date),
                x,
                plot.bottom() + style.tick_label_gap_px,
                style.tick_label_font_size_px,
                style.text_color,
                TextHAlign::Right,
            )
            .rotated(style.time_label_rotation_deg),
        );
    }
    Ok(())
}

fn draw_legend(frame: &mut RenderFrame, plot: Rect, labels: &[String], style: &DashboardStyle) {
    if labels.is_empty() {
        return;
    }

    let font = style.legend_font_size_px;
    let pad = style.legend_padding_px;
    let row_height = font * 1.5;
    // Rough glyph advance; backends do not report text extents back.
    let widest = labels
        .iter()
        .map(|label| label.chars().count())
        .max()
        .unwrap_or(0) as f64
        * font
        * 0.6;
    let width = (pad * 3.0 + style.legend_swatch_width_px + widest).min(plot.width);
    let height = (pad * 2.0 + row_height * labels.len() as f64).min(plot.height);
    let x = plot.x + pad;
    let y = plot.y + pad;

    frame.push_rect(
        CanvasLayerKind::Legend,
        RectPrimitive::new(x, y, width, height, style.legend_background)
            .with_border(1.0, style.legend_border_color)
            .with_corner_radius(3.0),
    );
    for (index, label) in labels.iter().enumerate() {
        let row_center = y + pad + row_height * (index as f64 + 0.5);
        let swatch_x = x + pad;
        frame.push_line(
            CanvasLayerKind::Legend,
            LinePrimitive::new(
                swatch_x,
                row_center,
                swatch_x + style.legend_swatch_width_px,
                row_center,
                style.series_line_width * 1.5,
                style.series_color(index),
            ),
        );
        frame.push_text(
            CanvasLayerKind::Legend,
            TextPrimitive::new(
                label.clone(),
                swatch_x + style.legend_swatch_width_px + pad,
                row_center,
                font,
                style.text_color,
                TextHAlign::Left,
            )
            .with_v_align(TextVAlign::Middle),
        );
    }
}

fn draw_y_axis_label(
    frame: &mut RenderFrame,
    cell: Rect,
    plot: Rect,
    panel: &Panel,
    style: &DashboardStyle,
) {
    let label = panel.y_axis_label();
    if label.trim().is_empty() {
        return;
    }
    let (_, center_y) = plot.center();
    frame.push_text(
        CanvasLayerKind::Axis,
        TextPrimitive::new(
            label,
            cell.x + style.axis_label_font_size_px,
            center_y,
            style.axis_label_font_size_px,
            style.text_color,
            TextHAlign::Center,
        )
        .with_v_align(TextVAlign::Middle)
        .rotated(90.0),
    );
}
