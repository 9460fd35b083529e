//! Source panel - log file loading and live board selection.

use eframe::egui;

use crate::app::RigTempApp;
use crate::state::{LoadingState, SUPPORTED_EXTENSIONS};
use crate::ui::icons::draw_upload_icon;

impl RigTempApp {
    /// Render the data source panel
    pub fn render_source_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Temperature Analyzer");
        ui.label(
            egui::RichText::new(self.source.label())
                .size(11.0)
                .color(egui::Color32::GRAY),
        );
        ui.add_space(8.0);

        // Show loading indicator
        if let LoadingState::Loading(filename) = &self.loading_state {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Processing {}...", filename));
            });
            ui.add_space(8.0);
        }

        let is_loading = matches!(self.loading_state, LoadingState::Loading(_));
        ui.add_enabled_ui(!is_loading, |ui| {
            self.render_drop_zone_card(ui);
        });

        ui.add_space(12.0);
        ui.separator();
        self.render_live_controls(ui);
    }

    /// Drop zone with a button opening the native file dialog
    fn render_drop_zone_card(&mut self, ui: &mut egui::Ui) {
        let primary_color = egui::Color32::from_rgb(16, 185, 129); // Emerald
        let card_bg = egui::Color32::from_rgb(24, 24, 27);
        let text_gray = egui::Color32::from_rgb(150, 150, 150);

        egui::Frame::NONE
            .fill(card_bg)
            .corner_radius(12)
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    let icon_size = 28.0;
                    let (icon_rect, _) = ui.allocate_exact_size(
                        egui::vec2(icon_size, icon_size),
                        egui::Sense::hover(),
                    );
                    draw_upload_icon(ui, icon_rect.center(), icon_size, primary_color);

                    ui.add_space(10.0);

                    if ui.button("Open temperature log").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter("Log Files", SUPPORTED_EXTENSIONS)
                            .pick_file()
                        {
                            self.start_loading_file(path);
                        }
                    }

                    ui.add_space(6.0);
                    ui.label(egui::RichText::new("or drop a file here").color(text_gray));
                });
            });
    }

    /// Rig/board inputs and the live polling toggle
    fn render_live_controls(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Live board").strong());
        ui.add_space(4.0);

        let live = self.is_live();
        ui.add_enabled_ui(!live, |ui| {
            egui::Grid::new("live_inputs").num_columns(2).show(ui, |ui| {
                ui.label("Rig");
                ui.text_edit_singleline(&mut self.rig_input);
                ui.end_row();
                ui.label("Board");
                ui.text_edit_singleline(&mut self.board_input);
                ui.end_row();
            });
        });

        ui.add_space(4.0);
        if live {
            if ui.button("Stop polling").clicked() {
                self.stop_live();
            }
        } else if ui.button("Start polling").clicked() {
            self.start_live();
        }
    }
}
