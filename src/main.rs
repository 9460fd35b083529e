//! rigtemp - Temperature log analyzer for hardware burn-in rigs
//!
//! Desktop viewer for thermal logs and live board temperature history.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use rigtemp::app::RigTempApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Configure native options
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1600.0, 1000.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title("rigtemp - Temperature Analyzer")
            .with_app_id("rigtemp")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "rigtemp",
        native_options,
        Box::new(|cc| Ok(Box::new(RigTempApp::new(cc)))),
    )
}
