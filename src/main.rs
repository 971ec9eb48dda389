mod app;
mod chart;
mod color;
mod data;
mod scale;
mod slides;
mod state;
mod ui;

use app::HeatStoriesApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Heat Stories – Climate Mortality Slides",
        options,
        Box::new(|_cc| Ok(Box::new(HeatStoriesApp::default()))),
    )
}
