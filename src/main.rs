mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::CareDirectoryApp;
use care_directory::config::AppConfig;
use clap::Parser;
use eframe::egui;

#[derive(Parser, Debug)]
#[command(name = "care-directory")]
#[command(about = "Browse a directory of health-support resources", long_about = None)]
struct Args {
    /// Dataset to open (CSV or JSON); overrides the configured one
    dataset: Option<PathBuf>,

    /// Config file (defaults to <config dir>/care-directory/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start at a location, e.g. `alphabet?letter=B` or `resource?name=...`
    #[arg(long)]
    open: Option<String>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let config = AppConfig::resolve(args.config.as_deref()).unwrap_or_else(|e| {
        log::error!("Falling back to default config: {e:#}");
        AppConfig::default()
    });
    let app = CareDirectoryApp::new(config, args.dataset, args.open.as_deref());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Care Directory",
        options,
        Box::new(|cc| {
            // Install image loaders so egui can render resource header images.
            egui_extras::install_image_loaders(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
}
