use crate::render::{Color, LineStrokeStyle};

/// Visual constants shared by every panel of a dashboard pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardStyle {
    pub figure_background: Color,
    pub plot_background: Color,
    pub text_color: Color,
    pub grid_line_color: Color,
    pub grid_line_width: f64,
    pub grid_line_style: LineStrokeStyle,
    pub series_line_width: f64,
    pub series_palette: [Color; 7],
    pub legend_background: Color,
    pub legend_border_color: Color,

    pub figure_title_font_size_px: f64,
    pub panel_title_font_size_px: f64,
    pub axis_label_font_size_px: f64,
    pub tick_label_font_size_px: f64,
    pub legend_font_size_px: f64,
    pub placeholder_font_size_px: f64,
    pub time_label_rotation_deg: f64,

    /// Space reserved around each plot inside its grid cell.
    pub plot_inset_left_px: f64,
    pub plot_inset_top_px: f64,
    pub plot_inset_right_px: f64,
    pub plot_inset_bottom_px: f64,
    /// Gap between a tick and its label.
    pub tick_label_gap_px: f64,
    pub legend_padding_px: f64,
    pub legend_swatch_width_px: f64,
}

impl DashboardStyle {
    /// Line color of the `index`-th series in a panel, cycling the palette.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        self.series_palette[index % self.series_palette.len()]
    }
}

impl Default for DashboardStyle {
    fn default() -> Self {
        Self {
            figure_background: Color::rgb(1.0, 1.0, 1.0),
            plot_background: Color::hex(0xE5E5E5),
            text_color: Color::hex(0x333333),
            grid_line_color: Color::rgb(1.0, 1.0, 1.0).with_alpha(0.7),
            grid_line_width: 1.0,
            grid_line_style: LineStrokeStyle::Dashed,
            series_line_width: 1.5,
            series_palette: [
                Color::hex(0xE24A33),
                Color::hex(0x348ABD),
                Color::hex(0x988ED5),
                Color::hex(0x777777),
                Color::hex(0xFBC15E),
                Color::hex(0x8EBA42),
                Color::hex(0xFFB5B8),
            ],
            legend_background: Color::hex(0xE5E5E5).with_alpha(0.8),
            legend_border_color: Color::hex(0xCCCCCC),

            figure_title_font_size_px: 32.0,
            panel_title_font_size_px: 18.0,
            axis_label_font_size_px: 14.0,
            tick_label_font_size_px: 12.0,
            legend_font_size_px: 12.0,
            placeholder_font_size_px: 16.0,
            time_label_rotation_deg: 45.0,

            plot_inset_left_px: 100.0,
            plot_inset_top_px: 44.0,
            plot_inset_right_px: 24.0,
            plot_inset_bottom_px: 100.0,
            tick_label_gap_px: 6.0,
            legend_padding_px: 8.0,
            legend_swatch_width_px: 24.0,
        }
    }
}
