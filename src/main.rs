mod app;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::LockViewApp;
use clap::Parser;
use eframe::egui;
use state::AppState;

/// Interactive catalog filter for digital door locks.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Catalog file to load at startup (.csv, .json, .parquet)
    catalog: Option<PathBuf>,

    /// Verbose log output
    #[arg(long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if args.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let mut state = AppState::default();
    if let Some(path) = &args.catalog {
        let catalog = data::loader::load_file(path)
            .with_context(|| format!("loading catalog {}", path.display()))?;
        log::info!(
            "Loaded {} models with columns {:?}",
            catalog.len(),
            catalog.attribute_columns
        );
        state.set_catalog(catalog);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "LockView – Door Lock Catalog",
        options,
        Box::new(move |_cc| Ok(Box::new(LockViewApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe: {e}"))
}
