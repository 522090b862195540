mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::CatalogApp;
use clap::Parser;
use eframe::egui;
use netflix_eda::Settings;
use state::AppState;

/// Interactive EDA dashboard for a cleaned Netflix catalog.
#[derive(Parser, Debug)]
#[command(name = "netflix-eda", version, about, long_about = None)]
struct Cli {
    /// Cleaned catalog to open [default: netflix_cleaned.csv]
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// JSON settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{e:#}");
            std::process::exit(2);
        }
    };
    if let Some(data) = cli.data {
        settings.cleaned_path = data;
    }

    let startup_path = settings.cleaned_path.clone();
    let mut state = AppState::new(settings);
    state.open(&startup_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Netflix Titles EDA Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(CatalogApp::new(state)))),
    )
}
