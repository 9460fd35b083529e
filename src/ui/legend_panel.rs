//! Legend panel - per-sensor visibility toggles.

use eframe::egui;

use crate::app::RigTempApp;
use crate::state::series_color;

impl RigTempApp {
    /// Render one checkbox per sensor; toggles are persisted
    pub fn render_legend_panel(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Sensors").strong());
        ui.add_space(4.0);

        if self.chart.legend().is_empty() {
            ui.label(egui::RichText::new("No sensors loaded").color(egui::Color32::GRAY));
            return;
        }

        // Collect upfront; toggling reconfigures the chart
        let entries: Vec<(String, bool)> = self
            .chart
            .legend()
            .iter()
            .map(|(name, visible)| (name.to_string(), visible))
            .collect();
        let mut toggled: Option<(String, bool)> = None;

        egui::ScrollArea::vertical()
            .id_salt("legend_scroll")
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                for (i, (name, visible)) in entries.iter().enumerate() {
                    let color = series_color(i);
                    ui.horizontal(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
                        let fill = if *visible {
                            egui::Color32::from_rgb(color[0], color[1], color[2])
                        } else {
                            egui::Color32::from_gray(68)
                        };
                        ui.painter().rect_filled(rect, 2.0, fill);

                        let mut checked = *visible;
                        if ui.checkbox(&mut checked, name.as_str()).changed() {
                            toggled = Some((name.clone(), checked));
                        }
                    });
                }
            });

        if let Some((name, visible)) = toggled {
            self.chart.toggle_legend(&name, visible);
        }
    }
}
