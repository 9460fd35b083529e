//! Core application state types and constants.
//!
//! This module contains the data structures shared between the app shell and
//! the UI components: load results, the current data source and palettes.

use crate::live::BoardTarget;
use crate::pipeline::LoadedLog;

// ============================================================================
// Constants
// ============================================================================

/// Supported log file extensions (used in file dialogs)
pub const SUPPORTED_EXTENSIONS: &[&str] = &["log", "txt"];

/// How long a toast stays on screen, in seconds
pub const TOAST_SECONDS: u64 = 3;

/// Color palette for chart lines
pub const CHART_COLORS: &[[u8; 3]] = &[
    [16, 185, 129],  // Emerald (primary)
    [244, 63, 94],   // Rose
    [14, 165, 233],  // Sky
    [253, 193, 73],  // Amber
    [168, 85, 247],  // Violet
    [251, 146, 60],  // Orange
    [246, 247, 235], // Cream
    [100, 149, 237], // Cornflower blue
    [255, 127, 80],  // Coral
    [144, 238, 144], // Light green
];

/// Color for the series at `index`
pub fn series_color(index: usize) -> [u8; 3] {
    CHART_COLORS[index % CHART_COLORS.len()]
}

// ============================================================================
// Core Types
// ============================================================================

/// Result from background file loading operation
pub enum LoadResult {
    Success(Box<LoadedLog>),
    Error(String),
}

/// Current state of file loading
#[derive(Clone, Debug, Default, PartialEq)]
pub enum LoadingState {
    /// No loading in progress
    #[default]
    Idle,
    /// Loading a file (filename)
    Loading(String),
}

/// Where the charted data comes from
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DataSource {
    #[default]
    None,
    /// A log file, by display name (kept even when the load failed)
    File(String),
    /// Live polling of a board
    Live(BoardTarget),
}

impl DataSource {
    /// Text for the file-info label
    pub fn label(&self) -> String {
        match self {
            DataSource::None => "Awaiting data source".to_string(),
            DataSource::File(name) => name.clone(),
            DataSource::Live(target) => format!("Live: {}", target.label()),
        }
    }
}

/// Toast message kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastType {
    Info,
    Success,
    Error,
}

impl ToastType {
    pub fn color(&self) -> [u8; 3] {
        match self {
            ToastType::Info => [71, 108, 155],
            ToastType::Success => [16, 120, 90],
            ToastType::Error => [191, 78, 48],
        }
    }

    pub fn text_color(&self) -> [u8; 3] {
        [255, 255, 255]
    }
}
