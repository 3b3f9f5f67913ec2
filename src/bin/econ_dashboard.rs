use std::path::PathBuf;

use econ_dash::api::{DashboardComposer, DateRangeSelection, PanelCatalog, RenderedDashboard};
use econ_dash::config::{Credentials, DashboardConfig};
use econ_dash::fetch::{FredClient, SeriesFetcher, StaticFetcher};
use econ_dash::telemetry;

const DEFAULT_OUTPUT_PATH: &str = "econ_dashboard.png";

struct CliArgs {
    selection: DateRangeSelection,
    output_path: PathBuf,
    config_path: Option<PathBuf>,
    secrets_path: Option<PathBuf>,
    fixtures_path: Option<PathBuf>,
    window: bool,
}

fn main() {
    let _ = telemetry::init_default_tracing();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

/// Returns the process exit code; `Err` covers startup failures only.
fn run() -> Result<i32, String> {
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => DashboardConfig::from_json_file(path).map_err(|err| err.to_string())?,
        None => DashboardConfig::default(),
    };

    let fetcher: Box<dyn SeriesFetcher> = match &args.fixtures_path {
        Some(path) => Box::new(StaticFetcher::from_json_file(path).map_err(|err| err.to_string())?),
        None => {
            let credentials =
                Credentials::from_env(args.secrets_path.as_deref()).map_err(|err| err.to_string())?;
            Box::new(
                FredClient::new(credentials.fred_api_key(), &config.fred)
                    .map_err(|err| err.to_string())?,
            )
        }
    };

    let composer = DashboardComposer::new(PanelCatalog::standard(), fetcher, config.viewport());

    if args.window {
        return open_window(composer, args.selection);
    }

    match composer.run(args.selection) {
        Ok(dashboard) => {
            report(&dashboard);
            write_output(&dashboard, &args.output_path)?;
            Ok(0)
        }
        Err(err) => {
            eprintln!("{}", err.banner());
            Ok(1)
        }
    }
}

fn report(dashboard: &RenderedDashboard) {
    if let Some(line) = dashboard.date_range_line() {
        println!("{line}");
    }
    for warning in dashboard.warnings() {
        eprintln!("warning: {warning}");
    }
}

#[cfg(feature = "cairo-backend")]
fn write_output(dashboard: &RenderedDashboard, output_path: &std::path::Path) -> Result<(), String> {
    use econ_dash::render::CairoRenderer;
    use std::fs::{self, File};

    if let Some(parent) = output_path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|err| format!("failed to create `{}`: {err}", parent.display()))?;
    }

    let mut renderer = CairoRenderer::for_frame(&dashboard.frame).map_err(|err| err.to_string())?;
    dashboard
        .render_with(&mut renderer)
        .map_err(|err| err.to_string())?;
    let mut file = File::create(output_path)
        .map_err(|err| format!("failed to create `{}`: {err}", output_path.display()))?;
    renderer
        .write_png(&mut file)
        .map_err(|err| err.to_string())?;
    println!("wrote {}", output_path.display());
    Ok(())
}

#[cfg(not(feature = "cairo-backend"))]
fn write_output(dashboard: &RenderedDashboard, output_path: &std::path::Path) -> Result<(), String> {
    use econ_dash::render::NullRenderer;

    let mut renderer = NullRenderer::default();
    dashboard
        .render_with(&mut renderer)
        .map_err(|err| err.to_string())?;
    println!(
        "rendered {} lines, {} rects, {} texts (no `{}` written: build with feature `cairo-backend` for PNG output)",
        renderer.last_line_count,
        renderer.last_rect_count,
        renderer.last_text_count,
        output_path.display()
    );
    Ok(())
}

#[cfg(feature = "gtk4-adapter")]
fn open_window(
    composer: DashboardComposer<'static, Box<dyn SeriesFetcher>>,
    selection: DateRangeSelection,
) -> Result<i32, String> {
    let code = econ_dash::platform_gtk::run_dashboard_window(composer, selection);
    Ok(i32::from(code.value()))
}

#[cfg(not(feature = "gtk4-adapter"))]
fn open_window(
    _composer: DashboardComposer<'static, Box<dyn SeriesFetcher>>,
    _selection: DateRangeSelection,
) -> Result<i32, String> {
    Err("--window requires feature `desktop`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut selection = DateRangeSelection::FullHistory;
    let mut output_path = PathBuf::from(DEFAULT_OUTPUT_PATH);
    let mut config_path = None;
    let mut secrets_path = None;
    let mut fixtures_path = None;
    let mut window = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--range" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --range".to_owned())?;
                selection = value.parse()?;
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = PathBuf::from(value);
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--secrets" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --secrets".to_owned())?;
                secrets_path = Some(PathBuf::from(value));
            }
            "--fixtures" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --fixtures".to_owned())?;
                fixtures_path = Some(PathBuf::from(value));
            }
            "--window" => window = true,
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    Ok(CliArgs {
        selection,
        output_path,
        config_path,
        secrets_path,
        fixtures_path,
        window,
    })
}

fn usage_message() -> String {
    format!(
        "usage: econ-dashboard [--range full|last-10-years] [--output <png>] \
         [--config <json>] [--secrets <json>] [--fixtures <json>] [--window]\n\n\
         defaults:\n  --range full\n  --output {DEFAULT_OUTPUT_PATH}\n\n\
         The FRED API key is read from FRED_API_KEY or the --secrets file.\n\
         --fixtures serves series from a local JSON file instead of FRED."
    )
}
