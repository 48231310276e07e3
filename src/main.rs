mod app;
mod config;
mod data;
mod error;
mod state;
mod ui;

use app::IncomeLensApp;
use config::Config;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let config = Config::from_env();
    if config.endpoint.is_none() {
        log::warn!("No statements endpoint configured; the table will stay empty");
    }
    let title = config.title();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(IncomeLensApp::new(cc, config)))),
    )
}
