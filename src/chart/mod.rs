//! Chart lifecycle and configuration.
//!
//! A [`ChartHost`] owns exactly one [`ChartBackend`] instance and mediates
//! between freshly built series and the persisted legend preferences. Every
//! change produces a complete [`ChartConfig`] that replaces the previous one.

pub mod resize;
pub mod tooltip;

use std::time::{Duration, Instant};

use chrono::NaiveDateTime;

use crate::legend::{KeyValueStore, LegendMemory, LegendState};
use crate::series::SensorSeries;

pub use resize::ResizeDebouncer;
pub use tooltip::{format_time_of_day, format_tooltip, time_to_x, tooltip_at, x_to_time};

/// Default padding (°C) around the plotted value range
pub const DEFAULT_Y_MARGIN: f64 = 5.0;

/// Default settle delay for container resizes
pub const DEFAULT_RESIZE_DEBOUNCE: Duration = Duration::from_millis(100);

/// Y axis limits
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    /// `floor(min - margin)` to `ceil(max + margin)` over the visible series.
    /// `None` when no visible series has points.
    pub fn fit(series: &[SensorSeries], legend: &LegendState, margin: f64) -> Option<Self> {
        let (lo, hi) = series
            .iter()
            .filter(|s| legend.is_visible(&s.name))
            .filter_map(SensorSeries::value_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))?;

        Some(Self {
            min: (lo - margin).floor(),
            max: (hi + margin).ceil(),
        })
    }
}

/// Visible window as percentages of the full time range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRange {
    pub start: f64,
    pub end: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self::full()
    }
}

impl ZoomRange {
    pub fn full() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
        }
    }

    /// Clamp both ends into 0..=100 and order them
    pub fn new(start: f64, end: f64) -> Self {
        let start = start.clamp(0.0, 100.0);
        let end = end.clamp(0.0, 100.0);
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn is_full(&self) -> bool {
        self.start <= 0.0 && self.end >= 100.0
    }

    /// Window in plot X coordinates for a data range `[x_min, x_max]`
    pub fn to_x_range(&self, x_min: f64, x_max: f64) -> (f64, f64) {
        let span = x_max - x_min;
        (
            x_min + span * self.start / 100.0,
            x_min + span * self.end / 100.0,
        )
    }

    /// Inverse of [`to_x_range`](Self::to_x_range), used when the user zooms inline
    pub fn from_x_range(view_min: f64, view_max: f64, x_min: f64, x_max: f64) -> Self {
        let span = x_max - x_min;
        if span <= 0.0 {
            return Self::full();
        }
        Self::new(
            (view_min - x_min) / span * 100.0,
            (view_max - x_min) / span * 100.0,
        )
    }
}

/// Complete chart state handed to a backend
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartConfig {
    pub series: Vec<SensorSeries>,
    pub legend: LegendState,
    pub y_bounds: Option<AxisBounds>,
    pub zoom: ZoomRange,
}

impl ChartConfig {
    /// Data extent on the time axis
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.series
            .iter()
            .filter_map(SensorSeries::time_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }

    /// Visible window on the time axis in plot coordinates
    pub fn visible_x_range(&self) -> Option<(f64, f64)> {
        let (lo, hi) = self.time_range()?;
        Some(self.zoom.to_x_range(time_to_x(lo), time_to_x(hi)))
    }

    pub fn tooltip_at(&self, x: f64) -> Option<String> {
        tooltip_at(&self.series, &self.legend, x)
    }
}

/// A swappable chart rendering backend
pub trait ChartBackend {
    /// Replace the whole chart configuration
    fn configure(&mut self, config: ChartConfig);

    /// Fit the chart to a new container size
    fn resize(&mut self, size: [f32; 2]);

    /// Release the chart instance
    fn dispose(&mut self);
}

/// Owner of a single chart instance and its legend memory.
///
/// The backend is disposed exactly once, either through [`dispose`](Self::dispose)
/// or when the host is dropped.
pub struct ChartHost<B: ChartBackend, S: KeyValueStore> {
    backend: B,
    legend_memory: LegendMemory<S>,
    resize: ResizeDebouncer,
    y_margin: f64,
    config: ChartConfig,
    disposed: bool,
}

impl<B: ChartBackend, S: KeyValueStore> ChartHost<B, S> {
    pub fn new(backend: B, store: S) -> Self {
        Self::with_options(backend, store, DEFAULT_Y_MARGIN, DEFAULT_RESIZE_DEBOUNCE)
    }

    pub fn with_options(backend: B, store: S, y_margin: f64, resize_delay: Duration) -> Self {
        Self {
            backend,
            legend_memory: LegendMemory::new(store),
            resize: ResizeDebouncer::new(resize_delay),
            y_margin,
            config: ChartConfig::default(),
            disposed: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn legend(&self) -> &LegendState {
        &self.config.legend
    }

    pub fn legend_memory(&self) -> &LegendMemory<S> {
        &self.legend_memory
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Load a new series set: resolve legend, fit axes, reset zoom
    pub fn set_series(&mut self, series: Vec<SensorSeries>) {
        let legend = self.legend_memory.resolve(&series);
        let y_bounds = AxisBounds::fit(&series, &legend, self.y_margin);

        self.config = ChartConfig {
            series,
            legend,
            y_bounds,
            zoom: ZoomRange::full(),
        };
        self.push_config();
    }

    /// Drop all series, leaving an empty placeholder chart
    pub fn clear(&mut self) {
        self.set_series(Vec::new());
    }

    /// Apply a user legend toggle and persist the whole current selection
    pub fn toggle_legend(&mut self, name: &str, visible: bool) {
        self.config.legend.set_visible(name, visible);
        self.legend_memory.record_toggle(&self.config.legend.to_map());

        self.config.y_bounds =
            AxisBounds::fit(&self.config.series, &self.config.legend, self.y_margin);
        self.push_config();
    }

    /// Update the shared zoom window (inline zoom and slider)
    pub fn set_zoom(&mut self, zoom: ZoomRange) {
        if self.config.zoom == zoom {
            return;
        }
        self.config.zoom = zoom;
        self.push_config();
    }

    /// Container size observed; applied after the debounce delay
    pub fn container_resized(&mut self, size: [f32; 2], now: Instant) {
        self.resize.notify(size, now);
    }

    /// Apply a settled resize, if one is due. Returns true when resized.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.disposed {
            return false;
        }
        match self.resize.poll(now) {
            Some(size) => {
                self.backend.resize(size);
                true
            }
            None => false,
        }
    }

    pub fn resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    /// Release the backend. Further calls are no-ops.
    pub fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.backend.dispose();
        }
    }

    fn push_config(&mut self) {
        if self.disposed {
            tracing::warn!("Ignoring chart update after dispose");
            return;
        }
        self.backend.configure(self.config.clone());
    }
}

impl<B: ChartBackend, S: KeyValueStore> Drop for ChartHost<B, S> {
    fn drop(&mut self) {
        self.dispose();
    }
}
