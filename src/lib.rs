//! econ-dash: economic indicator dashboard.
//!
//! Fetches FRED series, applies per-panel transforms, aligns each panel's
//! series on shared dates and renders eight panels in a 4x2 grid on one
//! backend-agnostic frame.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod fetch;
pub mod render;
pub mod telemetry;

#[cfg(feature = "gtk4-adapter")]
pub mod platform_gtk;

pub use api::{
    DashboardComposer, DashboardSession, DateRangeSelection, PanelCatalog, RenderedDashboard,
    format_magnitude,
};
pub use error::{ChartError, ChartResult, ConfigError, DashboardError, FetchError};
