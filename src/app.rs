//! Main application state and eframe::App implementation.

use eframe::egui;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

use crate::api::ApiClient;
use crate::chart::ChartHost;
use crate::legend::{JsonFileStore, KeyValueStore, MemoryStore};
use crate::live::{BoardPoller, BoardTarget, PollResult};
use crate::pipeline::{analyze_file, analyze_samples, display_name};
use crate::series::{AggregateStats, SeriesSet};
use crate::settings::AnalyzerSettings;
use crate::state::{DataSource, LoadResult, LoadingState, ToastType, TOAST_SECONDS};
use crate::ui::chart::EguiPlotChart;

/// Repaint cadence while live polling so new results get picked up
const LIVE_REPAINT_INTERVAL: Duration = Duration::from_millis(250);

/// Main application state
pub struct RigTempApp {
    /// Persisted preferences
    pub(crate) settings: AnalyzerSettings,
    /// The single chart instance and its legend memory
    pub(crate) chart: ChartHost<EguiPlotChart, Box<dyn KeyValueStore>>,
    /// Where the current data came from
    pub(crate) source: DataSource,
    /// Statistics of the current data, `None` shows placeholders
    pub(crate) stats: Option<AggregateStats>,
    /// Toast messages for user feedback
    pub(crate) toast_message: Option<(String, Instant, ToastType)>,
    /// Track dropped files to prevent duplicates
    last_drop_time: Option<Instant>,
    /// Channel for receiving loaded files from background thread
    load_receiver: Option<Receiver<LoadResult>>,
    /// Current loading state
    pub(crate) loading_state: LoadingState,
    /// Live board polling, when active
    poller: Option<BoardPoller>,
    /// Live mode input fields
    pub(crate) rig_input: String,
    pub(crate) board_input: String,
}

impl RigTempApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_settings(AnalyzerSettings::load())
    }

    pub fn with_settings(settings: AnalyzerSettings) -> Self {
        let store: Box<dyn KeyValueStore> = match JsonFileStore::default_location() {
            Ok(store) => Box::new(store),
            Err(e) => {
                tracing::warn!("Legend preferences will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        };

        let chart = ChartHost::with_options(
            EguiPlotChart::new(),
            store,
            settings.y_axis_margin,
            settings.resize_debounce(),
        );

        Self {
            settings,
            chart,
            source: DataSource::None,
            stats: None,
            toast_message: None,
            last_drop_time: None,
            load_receiver: None,
            loading_state: LoadingState::Idle,
            poller: None,
            rig_input: String::new(),
            board_input: String::new(),
        }
    }

    /// Show a toast message
    pub(crate) fn show_toast(&mut self, message: &str, toast_type: ToastType) {
        self.toast_message = Some((message.to_string(), Instant::now(), toast_type));
    }

    /// Replace the charted data wholesale
    fn apply_series_set(&mut self, set: SeriesSet) {
        self.stats = set.stats;
        self.chart.set_series(set.series);
    }

    /// Start loading a file in the background
    pub(crate) fn start_loading_file(&mut self, path: PathBuf) {
        self.stop_live();

        let filename = display_name(&path);
        self.source = DataSource::File(filename.clone());
        self.loading_state = LoadingState::Loading(filename);

        let (sender, receiver): (Sender<LoadResult>, Receiver<LoadResult>) = channel();
        // A newer load supersedes any earlier receiver
        self.load_receiver = Some(receiver);

        let config = self.settings.file_series_config();
        thread::spawn(move || {
            let result = match analyze_file(&path, &config) {
                Ok(log) => LoadResult::Success(Box::new(log)),
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = sender.send(result);
        });
    }

    /// Check for completed background loads
    fn check_loading_complete(&mut self) {
        let Some(receiver) = &self.load_receiver else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };

        match result {
            LoadResult::Success(log) => {
                let message = format!(
                    "Loaded {} ({} sensors)",
                    log.name,
                    log.data.series.len()
                );
                self.apply_series_set(log.data);
                self.show_toast(&message, ToastType::Success);
            }
            LoadResult::Error(e) => {
                tracing::warn!("Load failed: {}", e);
                self.show_toast(&format!("Error: {}", e), ToastType::Error);
            }
        }
        self.load_receiver = None;
        self.loading_state = LoadingState::Idle;
    }

    /// Begin polling the board named in the input fields
    pub(crate) fn start_live(&mut self) {
        let rig = self.rig_input.trim().to_string();
        let board = self.board_input.trim().to_string();
        if rig.is_empty() || board.is_empty() {
            self.show_toast("Enter a rig and board id", ToastType::Info);
            return;
        }

        self.stop_live();
        // A file load still in flight must not replace live data
        self.load_receiver = None;
        self.loading_state = LoadingState::Idle;

        let target = BoardTarget::new(rig, board);
        let client = ApiClient::new(self.settings.api_base_url.clone());
        self.poller = Some(BoardPoller::start(
            client,
            target.clone(),
            self.settings.polling_interval(),
        ));
        self.source = DataSource::Live(target);
    }

    /// Stop live polling, keeping the last data on screen
    pub(crate) fn stop_live(&mut self) {
        if let Some(mut poller) = self.poller.take() {
            poller.stop();
        }
    }

    pub(crate) fn is_live(&self) -> bool {
        self.poller.is_some()
    }

    /// Apply the newest live result. Failures keep the prior state.
    fn check_live_updates(&mut self) {
        let Some(result) = self.poller.as_ref().and_then(|p| p.try_latest()) else {
            return;
        };

        match result {
            PollResult::Samples(samples) => {
                if samples.is_empty() {
                    return;
                }
                let set = analyze_samples(&samples, &self.settings.live_series_config());
                self.apply_series_set(set);
            }
            PollResult::Failed(_) => {}
        }
    }

    /// Handle file drops
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        // Don't accept drops while loading
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            return;
        }

        // Debounce file drops (1 second window)
        if let Some(last_drop) = self.last_drop_time {
            if last_drop.elapsed().as_secs() < 1 {
                return;
            }
        }

        let dropped_files: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });

        if let Some(path) = dropped_files.into_iter().next() {
            self.last_drop_time = Some(Instant::now());
            self.start_loading_file(path);
        }
    }

    /// Remove the toast once it has been shown long enough
    fn expire_toast(&mut self) {
        if let Some((_, time, _)) = &self.toast_message {
            if time.elapsed().as_secs() >= TOAST_SECONDS {
                self.toast_message = None;
            }
        }
    }
}

impl eframe::App for RigTempApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for completed background work
        self.check_loading_complete();
        self.check_live_updates();

        // Handle file drops
        self.handle_dropped_files(ctx);
        self.expire_toast();

        // Apply dark theme
        ctx.set_visuals(egui::Visuals::dark());

        // Request repaint while loading (for spinner animation)
        if matches!(self.loading_state, LoadingState::Loading(_)) {
            ctx.request_repaint();
        } else if self.is_live() {
            ctx.request_repaint_after(LIVE_REPAINT_INTERVAL);
        }

        // Toast notifications
        self.render_toast(ctx);

        // Left panel: data source and legend
        egui::SidePanel::left("source_panel")
            .default_width(260.0)
            .min_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                self.render_source_panel(ui);
                ui.separator();
                self.render_legend_panel(ui);
            });

        // Stats cards above the chart
        egui::TopBottomPanel::top("stats_panel")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                self.render_stats_cards(ui);
                ui.add_space(8.0);
            });

        // Chart takes remaining space
        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_chart(ui);
        });
    }
}
