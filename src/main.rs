use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use overlay_planner::api::NbApiClient;
use overlay_planner::config::Settings;
use overlay_planner::coordinate::Coordinate;
use overlay_planner::error::ApiError;
use overlay_planner::orchestrator::{DemoMode, Orchestrator};
use overlay_planner::overlay::{CameraHint, OverlayPlan};
use overlay_planner::traits::RenderSink;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    Directions,
    Geocoding,
    Matching,
    Simple,
}

impl From<Mode> for DemoMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Directions => DemoMode::Directions,
            Mode::Geocoding => DemoMode::Geocoding,
            Mode::Matching => DemoMode::Matching,
            Mode::Simple => DemoMode::Simple,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Run a map overlay demo against the routing API and print each plan"
)]
struct Args {
    /// Settings file holding `map_key` and `geocode_key`
    #[arg(long, default_value = "settings.toml")]
    settings: PathBuf,

    /// Demo to run once the map is ready
    #[arg(value_enum)]
    mode: Mode,

    /// Simulated map tap as `lat,lng`; repeat for several taps
    #[arg(long = "tap", value_parser = parse_coordinate)]
    taps: Vec<Coordinate>,
}

fn parse_coordinate(value: &str) -> Result<Coordinate, String> {
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `lat,lng`, got `{value}`"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("bad latitude: {e}"))?;
    let lng = lng.trim().parse::<f64>().map_err(|e| format!("bad longitude: {e}"))?;
    Ok(Coordinate::new(lat, lng))
}

/// Stands in for the map view: prints plans and toasts to the terminal.
struct ConsoleRenderer;

impl RenderSink for ConsoleRenderer {
    fn render(&self, plan: &OverlayPlan) {
        match serde_json::to_string_pretty(plan) {
            Ok(json) => println!("{json}"),
            Err(err) => tracing::warn!("failed to serialize plan: {err}"),
        }
    }

    fn show_message(&self, _mode: DemoMode, message: &str) {
        println!("[toast] {message}");
    }

    fn show_error(&self, mode: DemoMode, error: &ApiError) {
        eprintln!("[{mode:?}] {error}");
    }

    fn recenter(&self, camera: &CameraHint) {
        tracing::info!(main = ?camera, inset = ?camera.inset(), "camera moved");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let settings = Settings::load(&args.settings)?;
    tracing::info!("loaded settings from {:?}", args.settings);

    let timeout = Duration::from_secs(settings.api.timeout_secs);
    let client = NbApiClient::new(settings.api, settings.keys)?;
    let orchestrator = Orchestrator::new(client, ConsoleRenderer).with_request_timeout(timeout);

    let mode = DemoMode::from(args.mode);
    orchestrator.on_map_ready(mode).await;
    for tap in args.taps {
        orchestrator.on_tap(mode, tap).await;
    }

    Ok(())
}
