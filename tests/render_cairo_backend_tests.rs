#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chrono::{Months, NaiveDate, TimeZone, Utc};
use econ_dash::ChartError;
use econ_dash::api::{DashboardComposer, DateRangeSelection, PanelCatalog};
use econ_dash::core::{Observation, Series, Viewport};
use econ_dash::fetch::StaticFetcher;
use econ_dash::render::{CairoRenderer, Color, draw_frame};

fn small_fixture() -> StaticFetcher {
    let mut fetcher = StaticFetcher::new();
    for id in ["UNRATE", "EMRATIO", "SP500"] {
        let observations = (0..48)
            .map(|index| {
                let when = NaiveDate::from_ymd_opt(2018, 1, 1)
                    .and_then(|start| start.checked_add_months(Months::new(index)))
                    .expect("valid month");
                Observation::present(when, 4.0 + f64::from(index % 7))
            })
            .collect();
        fetcher.insert(Series::new(id, observations).expect("valid series"));
    }
    fetcher
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_dashboard_and_writes_png() {
    let composer =
        DashboardComposer::new(PanelCatalog::standard(), small_fixture(), Viewport::new(1000, 2000));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid now");
    let dashboard = composer
        .run_at(DateRangeSelection::FullHistory, now)
        .expect("pass succeeds");

    let mut renderer = CairoRenderer::for_frame(&dashboard.frame).expect("renderer");
    dashboard.render_with(&mut renderer).expect("render");

    let stats = renderer.last_stats();
    assert_eq!(stats.lines_drawn, dashboard.frame.line_count());
    assert_eq!(stats.texts_drawn, dashboard.frame.text_count());
    assert_eq!(stats.rects_drawn, dashboard.frame.rect_count());

    let mut png = Vec::new();
    renderer.write_png(&mut png).expect("png");
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn draw_frame_paints_on_external_context() {
    let composer =
        DashboardComposer::new(PanelCatalog::standard(), StaticFetcher::new(), Viewport::new(800, 1600));
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid now");
    let dashboard = composer
        .run_at(DateRangeSelection::LastTenYears, now)
        .expect("pass succeeds");

    let surface = ImageSurface::create(Format::ARgb32, 800, 1600).expect("surface");
    let context = Context::new(&surface).expect("context");
    let stats = draw_frame(&context, &dashboard.frame, Color::rgb(1.0, 1.0, 1.0)).expect("draw");
    assert_eq!(stats.lines_drawn, 0);
    assert!(stats.texts_drawn >= 9);
}
