//! Dashboard surface: the panel catalog, per-panel section rendering and the
//! composer that lays the panels out on one figure.

mod axis_format;
mod axis_ticks;
mod dashboard;
mod date_range;
mod panel;
mod render_style;
mod section;

pub use axis_format::{TIME_AXIS_LABEL_PATTERN, format_magnitude, format_time_axis_label};
pub use dashboard::{
    DashboardComposer, DashboardSession, FIGURE_TITLE, GRID_COLUMNS, GRID_ROWS, GridPosition,
    PanelCell, RenderedDashboard, grid_layout,
};
pub use date_range::{DateBounds, DateRangeSelection, LAST_TEN_YEARS_DAYS};
pub use panel::{PANEL_COUNT, Panel, PanelCatalog};
pub use render_style::DashboardStyle;
pub use section::{
    NO_DATA_PLACEHOLDER, PanelData, PanelOutcome, SectionReport, SeriesWarning, SeriesWarnings,
    WarningReason, collect_panel_series, render_section,
};
