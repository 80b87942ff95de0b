mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use app::DashboardApp;
use clap::Parser;
use eframe::egui;

/// Interactive dashboard of big-tech data center locations.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Location table to open at startup (.csv, .json or .parquet)
    #[arg(short, long, default_value = "combined_data.csv")]
    data: PathBuf,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 900.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Big Tech Data Center Dashboard",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(DashboardApp::new(&args.data)))
        }),
    )
}
