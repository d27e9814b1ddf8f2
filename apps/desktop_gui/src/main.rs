use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;

mod backend_bridge;
mod controller;
mod ui;

use backend_bridge::commands::BackendCommand;
use controller::events::UiEvent;
use ui::app::PredictorApp;

/// Desktop front-end for the flight delay prediction service.
#[derive(Debug, Parser)]
#[command(name = "flight-delay-gauge")]
struct Args {
    /// Prediction service base URL; overrides predictor.toml and the
    /// environment.
    #[arg(long)]
    api_url: Option<String>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let args = Args::parse();

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, args.api_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Flight Delay Predictor")
            .with_inner_size([640.0, 760.0])
            .with_min_inner_size([520.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Flight Delay Predictor",
        options,
        Box::new(|_cc| Ok(Box::new(PredictorApp::new(cmd_tx, ui_rx)))),
    )
}
