use app::ClimateApp;

mod app;
mod city;
mod graph;

fn main() -> Result<(), eframe::Error> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("starting California climate graph");

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(760.0, 640.0)),
        min_window_size: Some(egui::vec2(550.0, 400.0)),
        ..Default::default()
    };
    eframe::run_native(
        "California Climate Graph",
        native_options,
        Box::new(|cc| Box::new(ClimateApp::new(cc))),
    )
}
