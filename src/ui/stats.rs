//! Summary cards for the loaded data.

use eframe::egui;

use crate::app::RigTempApp;
use crate::series::{format_count, format_stat};

impl RigTempApp {
    /// Max / min / sensor / point count cards
    pub fn render_stats_cards(&mut self, ui: &mut egui::Ui) {
        let stats = self.stats;
        let cards = [
            (
                "Max Peak",
                format_stat(stats.map(|s| s.max_value)),
                "°C",
                egui::Color32::from_rgb(244, 63, 94),
            ),
            (
                "Min Floor",
                format_stat(stats.map(|s| s.min_value)),
                "°C",
                egui::Color32::from_rgb(14, 165, 233),
            ),
            (
                "Sensors",
                format_count(stats.map(|s| s.sensor_count)),
                "",
                egui::Color32::from_rgb(16, 185, 129),
            ),
            (
                "Data Points",
                format_count(stats.map(|s| s.sample_count)),
                "",
                egui::Color32::LIGHT_GRAY,
            ),
        ];

        ui.horizontal(|ui| {
            for (label, value, unit, color) in cards {
                egui::Frame::NONE
                    .fill(egui::Color32::from_rgb(24, 24, 27))
                    .corner_radius(8)
                    .inner_margin(egui::Margin::symmetric(16, 10))
                    .show(ui, |ui| {
                        ui.set_min_width(140.0);
                        ui.vertical(|ui| {
                            ui.label(
                                egui::RichText::new(label)
                                    .size(10.0)
                                    .color(egui::Color32::GRAY),
                            );
                            ui.horizontal(|ui| {
                                ui.label(egui::RichText::new(value).size(24.0).strong().color(color));
                                if !unit.is_empty() {
                                    ui.label(
                                        egui::RichText::new(unit)
                                            .size(11.0)
                                            .color(egui::Color32::GRAY),
                                    );
                                }
                            });
                        });
                    });
            }
        });
    }
}
