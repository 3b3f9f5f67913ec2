use chrono::{DateTime, Utc};
use tracing::{debug, error, info};

use crate::api::section::{SectionReport, SeriesWarning, render_section};
use crate::api::{DashboardStyle, DateBounds, DateRangeSelection, PANEL_COUNT, PanelCatalog};
use crate::core::{Rect, Viewport};
use crate::error::{ChartError, ChartResult, DashboardError};
use crate::fetch::SeriesFetcher;
use crate::render::{
    CanvasLayerKind, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive, TextVAlign,
};

pub const GRID_ROWS: usize = 4;
pub const GRID_COLUMNS: usize = 2;
pub const FIGURE_TITLE: &str = "Economic Data Visualization (FRED Data)";

/// Share of the figure height reserved above the grid for the title.
const TITLE_BAND_RATIO: f64 = 0.05;
/// Share of the figure height left empty below the grid.
const BOTTOM_MARGIN_RATIO: f64 = 0.03;

const _: () = assert!(GRID_ROWS * GRID_COLUMNS == PANEL_COUNT);

/// Row-major grid slot of the `index`-th panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

impl GridPosition {
    #[must_use]
    pub const fn for_index(index: usize) -> Self {
        Self {
            row: index / GRID_COLUMNS,
            column: index % GRID_COLUMNS,
        }
    }
}

/// Splits the figure into the title band and `GRID_ROWS` x `GRID_COLUMNS`
/// equal cells, returned row-major.
pub fn grid_layout(viewport: Viewport) -> ChartResult<(Rect, Vec<Rect>)> {
    if !viewport.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }

    let figure = viewport.bounds();
    let title_band = Rect::new(
        figure.x,
        figure.y,
        figure.width,
        figure.height * TITLE_BAND_RATIO,
    );
    let grid_top = title_band.bottom();
    let grid_height = figure.height * (1.0 - TITLE_BAND_RATIO - BOTTOM_MARGIN_RATIO);
    let cell_width = figure.width / GRID_COLUMNS as f64;
    let cell_height = grid_height / GRID_ROWS as f64;

    let cells = (0..GRID_ROWS * GRID_COLUMNS)
        .map(|index| {
            let position = GridPosition::for_index(index);
            Rect::new(
                figure.x + cell_width * position.column as f64,
                grid_top + cell_height * position.row as f64,
                cell_width,
                cell_height,
            )
        })
        .collect();
    Ok((title_band, cells))
}

/// One rendered grid slot and what happened to its panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelCell {
    pub row: usize,
    pub column: usize,
    pub bounds: Rect,
    pub title: String,
    pub report: SectionReport,
}

/// Outcome of a successful pass: the composite frame plus per-panel reports.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDashboard {
    pub selection: DateRangeSelection,
    pub bounds: DateBounds,
    pub frame: RenderFrame,
    pub cells: Vec<PanelCell>,
}

impl RenderedDashboard {
    /// Every omitted series across all panels, in panel then legend order.
    pub fn warnings(&self) -> impl Iterator<Item = &SeriesWarning> {
        self.cells.iter().flat_map(|cell| cell.report.warnings.iter())
    }

    /// `Date range: {start} to {end}`, or `None` for an unbounded pass.
    #[must_use]
    pub fn date_range_line(&self) -> Option<String> {
        (!self.bounds.is_unbounded()).then(|| format!("Date range: {}", self.bounds))
    }

    pub fn render_with<R: Renderer + ?Sized>(&self, renderer: &mut R) -> ChartResult<()> {
        renderer.render(&self.frame)
    }
}

/// Runs complete dashboard passes against a catalog and a fetcher.
#[derive(Debug)]
pub struct DashboardComposer<'a, F> {
    catalog: &'a PanelCatalog,
    fetcher: F,
    viewport: Viewport,
    style: DashboardStyle,
}

impl<'a, F: SeriesFetcher> DashboardComposer<'a, F> {
    #[must_use]
    pub fn new(catalog: &'a PanelCatalog, fetcher: F, viewport: Viewport) -> Self {
        Self {
            catalog,
            fetcher,
            viewport,
            style: DashboardStyle::default(),
        }
    }

    #[must_use]
    pub fn with_style(mut self, style: DashboardStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &'a PanelCatalog {
        self.catalog
    }

    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn style(&self) -> &DashboardStyle {
        &self.style
    }

    /// Full pass using the current wall clock.
    pub fn run(&self, selection: DateRangeSelection) -> Result<RenderedDashboard, DashboardError> {
        self.run_at(selection, Utc::now())
    }

    /// Full pass with window bounds resolved against `now`.
    pub fn run_at(
        &self,
        selection: DateRangeSelection,
        now: DateTime<Utc>,
    ) -> Result<RenderedDashboard, DashboardError> {
        let bounds = selection.resolve(now);
        info!(selection = %selection, bounds = %bounds, "starting dashboard pass");

        match self.compose(selection, bounds) {
            Ok(dashboard) => {
                info!(
                    panels = dashboard.cells.len(),
                    warnings = dashboard.warnings().count(),
                    "dashboard pass complete"
                );
                Ok(dashboard)
            }
            Err(err) => {
                error!(error = %err, "dashboard pass failed");
                Err(DashboardError::Render(err))
            }
        }
    }

    fn compose(
        &self,
        selection: DateRangeSelection,
        bounds: DateBounds,
    ) -> ChartResult<RenderedDashboard> {
        let (title_band, cell_rects) = grid_layout(self.viewport)?;
        let mut frame = RenderFrame::new(self.viewport);

        let figure = self.viewport.bounds();
        frame.push_rect(
            CanvasLayerKind::Background,
            RectPrimitive::new(
                figure.x,
                figure.y,
                figure.width,
                figure.height,
                self.style.figure_background,
            ),
        );

        let mut cells = Vec::with_capacity(self.catalog.len());
        for (index, (panel, cell)) in self.catalog.iter().zip(cell_rects).enumerate() {
            let position = GridPosition::for_index(index);
            debug!(
                panel = %panel.title,
                row = position.row,
                column = position.column,
                "rendering panel"
            );
            let report = render_section(&mut frame, cell, panel, &self.fetcher, bounds, &self.style)?;
            cells.push(PanelCell {
                row: position.row,
                column: position.column,
                bounds: cell,
                title: panel.title.clone(),
                report,
            });
        }

        let (center_x, center_y) = title_band.center();
        frame.push_text(
            CanvasLayerKind::Axis,
            TextPrimitive::new(
                FIGURE_TITLE,
                center_x,
                center_y,
                self.style.figure_title_font_size_px,
                self.style.text_color,
                TextHAlign::Center,
            )
            .with_v_align(TextVAlign::Middle)
            .bold(),
        );

        frame.validate()?;
        Ok(RenderedDashboard {
            selection,
            bounds,
            frame,
            cells,
        })
    }
}

/// Interactive state: the current range selection and the last pass result.
///
/// Every call reruns the whole pipeline; nothing is cached between passes.
pub struct DashboardSession<'a, F> {
    composer: DashboardComposer<'a, F>,
    selection: DateRangeSelection,
    clock: fn() -> DateTime<Utc>,
    last: Option<Result<RenderedDashboard, DashboardError>>,
}

impl<'a, F: SeriesFetcher> DashboardSession<'a, F> {
    #[must_use]
    pub fn new(composer: DashboardComposer<'a, F>, selection: DateRangeSelection) -> Self {
        Self {
            composer,
            selection,
            clock: Utc::now,
            last: None,
        }
    }

    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn selection(&self) -> DateRangeSelection {
        self.selection
    }

    #[must_use]
    pub fn composer(&self) -> &DashboardComposer<'a, F> {
        &self.composer
    }

    /// Changes the selection and reruns the pass.
    pub fn select(
        &mut self,
        selection: DateRangeSelection,
    ) -> &Result<RenderedDashboard, DashboardError> {
        self.selection = selection;
        self.refresh()
    }

    /// Reruns the pass with the current selection, refetching everything.
    pub fn refresh(&mut self) -> &Result<RenderedDashboard, DashboardError> {
        let result = self.composer.run_at(self.selection, (self.clock)());
        self.last.insert(result)
    }

    /// Result of the most recent pass, if any ran.
    #[must_use]
    pub fn current(&self) -> Option<&Result<RenderedDashboard, DashboardError>> {
        self.last.as_ref()
    }
}
