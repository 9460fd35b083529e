//! Parser for the plain-text thermal logs written by burn-in rigs.
//!
//! A reading looks like
//!
//! ```text
//! [2024-01-01 10:00:00] <0> thm log handler: [CPU_0] 45.0 C
//! ```
//!
//! Everything between the bracketed timestamp and the handler marker is free
//! form. Lines that do not have this shape are skipped.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::types::{ParseError, Parseable, TemperatureSample, TIMESTAMP_FORMAT};

/// Pattern recognising one temperature reading.
///
/// Named captures:
/// - `timestamp`: `YYYY-MM-DD HH:MM:SS` inside square brackets
/// - `sensor`: the bracketed sensor name following the `thm log handler:` marker
/// - `value`: signed decimal number followed by the ` C` unit suffix
pub const LOG_LINE_PATTERN: &str = r"\[(?<timestamp>\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})\].*?thm log handler: \[(?<sensor>.*?)\] (?<value>[-+]?\d*\.?\d+) C";

static LOG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOG_LINE_PATTERN).expect("Failed to compile regex"));

/// Thermal log parser
#[derive(Clone, Copy, Debug, Default)]
pub struct ThermalLog;

impl ThermalLog {
    /// Quick check whether the text holds at least one reading
    pub fn detect(contents: &str) -> bool {
        LOG_LINE.is_match(contents)
    }

    /// Extract every reading in text order, without the empty-input check
    pub fn extract(contents: &str) -> Vec<TemperatureSample> {
        let mut samples = Vec::new();

        for captures in LOG_LINE.captures_iter(contents) {
            let raw_time = &captures["timestamp"];
            let timestamp = match NaiveDateTime::parse_from_str(raw_time, TIMESTAMP_FORMAT) {
                Ok(t) => t,
                Err(e) => {
                    tracing::debug!("Skipping reading with invalid timestamp {}: {}", raw_time, e);
                    continue;
                }
            };

            // The pattern guarantees a decimal literal, but keep the parse fallible
            let value: f64 = match captures["value"].parse() {
                Ok(v) => v,
                Err(_) => continue,
            };

            samples.push(TemperatureSample {
                timestamp,
                sensor: captures["sensor"].to_string(),
                value,
            });
        }

        samples
    }
}

impl Parseable for ThermalLog {
    fn parse(&self, file_contents: &str) -> Result<Vec<TemperatureSample>, ParseError> {
        let samples = Self::extract(file_contents);

        if samples.is_empty() {
            tracing::warn!("No temperature readings found in log");
            return Err(ParseError::NoRecognizableData);
        }

        tracing::info!("Parsed {} temperature readings", samples.len());
        Ok(samples)
    }
}
