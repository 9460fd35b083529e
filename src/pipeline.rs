//! File-load pipeline: read, parse, group, summarise.
//!
//! Each load runs parse → group/sort → statistics as one sequential step and
//! produces a fresh [`SeriesSet`] that replaces whatever was shown before.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::parsers::{ParseError, Parseable, TemperatureSample, ThermalLog};
use crate::series::{build_series, SeriesConfig, SeriesSet};

/// Errors from loading a log file
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Read(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A parsed log file ready for charting
#[derive(Clone, Debug)]
pub struct LoadedLog {
    pub path: PathBuf,
    /// Display name for the file-info label
    pub name: String,
    pub data: SeriesSet,
}

/// Display name for a path, used even when the load fails
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Run the parse pipeline over text already in memory
pub fn analyze_text(text: &str, config: &SeriesConfig) -> Result<SeriesSet, ParseError> {
    let samples = ThermalLog.parse(text)?;
    Ok(analyze_samples(&samples, config))
}

/// Group pre-structured samples (e.g. from the backend API)
pub fn analyze_samples(samples: &[TemperatureSample], config: &SeriesConfig) -> SeriesSet {
    build_series(samples, config)
}

/// Read and analyze a log file
pub fn analyze_file(path: &Path, config: &SeriesConfig) -> Result<LoadedLog, LoadError> {
    // Lossy decoding: rig logs occasionally carry stray non-UTF-8 bytes
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);

    // Early out for files that are clearly not thermal logs
    if !ThermalLog::detect(&text) {
        tracing::warn!("{} contains no thermal log readings", path.display());
        return Err(ParseError::NoRecognizableData.into());
    }

    let data = analyze_text(&text, config)?;

    tracing::info!(
        "Loaded {}: {} sensors",
        path.display(),
        data.series.len()
    );

    Ok(LoadedLog {
        path: path.to_path_buf(),
        name: display_name(path),
        data,
    })
}
