//! egui_plot implementation of the chart backend, plus the chart area.

use eframe::egui;
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::app::RigTempApp;
use crate::chart::{format_time_of_day, time_to_x, x_to_time, ChartBackend, ChartConfig, ZoomRange};
use crate::state::series_color;

/// Maximum points to render per series (for performance via LTTB downsampling)
pub const MAX_CHART_POINTS: usize = 2000;

/// A prepared line: name, palette color and downsampled points
struct PreparedLine {
    name: String,
    color: [u8; 3],
    points: Vec<[f64; 2]>,
}

/// What the user did with the plot during one frame
#[derive(Default)]
pub struct PlotInteraction {
    /// New zoom window after inline drag/scroll zoom
    pub zoom: Option<ZoomRange>,
}

/// Chart backend drawing with egui_plot.
///
/// egui is immediate mode, so "the instance" is the prepared configuration
/// plus the bookkeeping needed to keep the inline zoom and the slider in sync.
#[derive(Default)]
pub struct EguiPlotChart {
    config: Option<ChartConfig>,
    lines: Vec<PreparedLine>,
    /// Data extent in plot X coordinates
    x_extent: Option<(f64, f64)>,
    /// Zoom last pushed into the plot bounds
    applied_zoom: Option<ZoomRange>,
    size: Option<[f32; 2]>,
    configure_count: usize,
    disposed: bool,
}

impl EguiPlotChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&ChartConfig> {
        self.config.as_ref()
    }

    pub fn configure_count(&self) -> usize {
        self.configure_count
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Draw the plot; returns the inline zoom the user applied, if any
    pub fn show(&mut self, ui: &mut egui::Ui) -> PlotInteraction {
        let Some(config) = self.config.as_ref() else {
            return PlotInteraction::default();
        };
        let Some((x_min, x_max)) = self.x_extent else {
            return PlotInteraction::default();
        };

        let zoom_changed = self.applied_zoom != Some(config.zoom);
        let (view_min, view_max) = config.zoom.to_x_range(x_min, x_max);
        let y_bounds = config.y_bounds;

        let mut plot = Plot::new("temperature_chart")
            .allow_zoom([true, false])
            .allow_drag([true, false])
            .allow_scroll([true, false])
            .show_x(false)
            .show_y(false)
            .x_axis_formatter(|mark, _range| {
                x_to_time(mark.value)
                    .map(format_time_of_day)
                    .unwrap_or_default()
            })
            .y_axis_formatter(|mark, _range| format!("{} °C", mark.value));

        if let Some([w, h]) = self.size {
            plot = plot
                .width(w.min(ui.available_width()))
                .height(h.min(ui.available_height()));
        }

        let lines = &self.lines;
        let response = plot.show(ui, |plot_ui| {
            let current = plot_ui.plot_bounds();
            let (mut lo, mut hi) = if zoom_changed {
                (view_min, view_max)
            } else {
                (current.min()[0], current.max()[0])
            };

            // Keep the view inside the data range
            let width = (hi - lo).min(x_max - x_min);
            if lo < x_min {
                lo = x_min;
                hi = x_min + width;
            }
            if hi > x_max {
                hi = x_max;
                lo = x_max - width;
            }

            let (y_lo, y_hi) = match y_bounds {
                Some(b) => (b.min, b.max),
                None => (current.min()[1], current.max()[1]),
            };
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([lo, y_lo], [hi, y_hi]));

            for line in lines {
                let points: PlotPoints = line.points.iter().copied().collect();
                plot_ui.line(
                    Line::new(line.name.clone(), points)
                        .color(egui::Color32::from_rgb(
                            line.color[0],
                            line.color[1],
                            line.color[2],
                        ))
                        .width(1.5),
                );
            }

            (lo, hi, plot_ui.pointer_coordinate())
        });

        let (lo, hi, pointer) = response.inner;
        let zoom = ZoomRange::from_x_range(lo, hi, x_min, x_max);
        self.applied_zoom = Some(zoom);

        if response.response.hovered() {
            if let Some(text) = pointer.and_then(|p| config.tooltip_at(p.x)) {
                response.response.on_hover_text_at_pointer(text);
            }
        }

        PlotInteraction {
            zoom: (zoom != config.zoom).then_some(zoom),
        }
    }
}

impl ChartBackend for EguiPlotChart {
    fn configure(&mut self, config: ChartConfig) {
        self.lines = config
            .series
            .iter()
            .enumerate()
            .filter(|(_, s)| config.legend.is_visible(&s.name))
            .map(|(i, s)| {
                let times: Vec<f64> = s.points.iter().map(|&(t, _)| time_to_x(t)).collect();
                let values: Vec<f64> = s.points.iter().map(|&(_, v)| v).collect();
                PreparedLine {
                    name: s.name.clone(),
                    color: series_color(i),
                    points: downsample_lttb(&times, &values, MAX_CHART_POINTS),
                }
            })
            .collect();

        self.x_extent = config
            .time_range()
            .map(|(lo, hi)| (time_to_x(lo), time_to_x(hi)));
        self.applied_zoom = None;
        self.config = Some(config);
        self.configure_count += 1;
    }

    fn resize(&mut self, size: [f32; 2]) {
        self.size = Some(size);
    }

    fn dispose(&mut self) {
        self.config = None;
        self.lines.clear();
        self.x_extent = None;
        self.disposed = true;
    }
}

/// LTTB (Largest Triangle Three Buckets) downsampling.
/// Reduces the number of points while preserving the visual shape.
pub fn downsample_lttb(times: &[f64], values: &[f64], target_points: usize) -> Vec<[f64; 2]> {
    let n = times.len().min(values.len());

    if n <= target_points || target_points < 3 {
        return times
            .iter()
            .zip(values.iter())
            .map(|(t, v)| [*t, *v])
            .collect();
    }

    let mut result = Vec::with_capacity(target_points);
    result.push([times[0], values[0]]);

    let bucket_size = (n - 2) as f64 / (target_points - 2) as f64;
    let mut a_index = 0usize;

    for i in 0..(target_points - 2) {
        let bucket_start = ((i as f64) * bucket_size).floor() as usize + 1;
        let bucket_end = (((i + 1) as f64) * bucket_size).floor() as usize + 1;
        let bucket_end = bucket_end.min(n - 1).max(bucket_start + 1);

        // Average of the next bucket is the third triangle vertex
        let next_end = ((((i + 2) as f64) * bucket_size).floor() as usize + 1).min(n);
        let (avg_x, avg_y) = if bucket_end < next_end {
            let count = (next_end - bucket_end) as f64;
            let sum_x: f64 = times[bucket_end..next_end].iter().sum();
            let sum_y: f64 = values[bucket_end..next_end].iter().sum();
            (sum_x / count, sum_y / count)
        } else {
            (times[n - 1], values[n - 1])
        };

        let (a_x, a_y) = (times[a_index], values[a_index]);
        let mut max_area = -1.0f64;
        let mut max_index = bucket_start;

        for j in bucket_start..bucket_end.min(n - 1) {
            let area = ((a_x - avg_x) * (values[j] - a_y) - (a_x - times[j]) * (avg_y - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_index = j;
            }
        }

        result.push([times[max_index], values[max_index]]);
        a_index = max_index;
    }

    result.push([times[n - 1], values[n - 1]]);
    result
}

impl RigTempApp {
    /// Render the chart area: plot, zoom slider and placeholder states
    pub fn render_chart(&mut self, ui: &mut egui::Ui) {
        if self.chart.config().series.is_empty() {
            ui.centered_and_justified(|ui| {
                ui.label(
                    egui::RichText::new("Drop a temperature log or open one to begin")
                        .size(20.0)
                        .color(egui::Color32::GRAY),
                );
            });
            return;
        }

        // Slider claims its space first so the plot fills the rest
        let mut zoom = self.chart.config().zoom;
        let slider_changed = egui::TopBottomPanel::bottom("zoom_slider")
            .resizable(false)
            .show_inside(ui, |ui| self.render_zoom_slider(ui, &mut zoom))
            .inner;
        if slider_changed {
            self.chart.set_zoom(zoom);
        }

        let now = std::time::Instant::now();
        self.chart.container_resized(ui.available_size().into(), now);
        if self.chart.tick(now) {
            ui.ctx().request_repaint();
        } else if self.chart.resize_pending() {
            ui.ctx().request_repaint_after(self.settings.resize_debounce());
        }

        let interaction = self.chart.backend_mut().show(ui);
        if let Some(zoom) = interaction.zoom {
            self.chart.set_zoom(zoom);
        }
    }

    /// Range slider bound to the same zoom state as the inline zoom
    fn render_zoom_slider(&self, ui: &mut egui::Ui, zoom: &mut ZoomRange) -> bool {
        let mut start = zoom.start;
        let mut end = zoom.end;
        let mut changed = false;

        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Range").color(egui::Color32::GRAY));
            changed |= ui
                .add(egui::Slider::new(&mut start, 0.0..=100.0).suffix("%").text("from"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut end, 0.0..=100.0).suffix("%").text("to"))
                .changed();
            if ui.button("Reset").clicked() {
                start = 0.0;
                end = 100.0;
                changed = true;
            }
        });

        if changed {
            *zoom = ZoomRange::new(start, end);
        }
        changed
    }
}
