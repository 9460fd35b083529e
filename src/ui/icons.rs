//! Custom icon drawing utilities.

use eframe::egui;

/// Draw an upload icon (circle with upward arrow)
pub fn draw_upload_icon(ui: &mut egui::Ui, center: egui::Pos2, size: f32, color: egui::Color32) {
    let painter = ui.painter();
    let stroke = egui::Stroke::new(2.0, color);

    painter.circle_stroke(center, size / 2.0, stroke);

    let arrow_size = size * 0.35;
    let top = egui::pos2(center.x, center.y - arrow_size * 0.6);
    let bottom = egui::pos2(center.x, center.y + arrow_size * 0.4);
    painter.line_segment([bottom, top], stroke);

    let head = arrow_size * 0.4;
    for dx in [-head, head] {
        painter.line_segment([top, egui::pos2(top.x + dx, top.y + head)], stroke);
    }
}
