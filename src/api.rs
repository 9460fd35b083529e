//! API client for the rig monitoring backend.
//!
//! The backend reports rig and board status and per-board temperature
//! history. Temperature payloads are converted straight into
//! [`TemperatureSample`]s so they share the series and chart pipeline with
//! parsed log files.

use std::time::Duration;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::Deserialize;
use strum::{AsRefStr, EnumString};
use thiserror::Error;

use crate::parsers::TemperatureSample;

/// User agent for API requests
const USER_AGENT: &str = concat!("rigtemp/", env!("CARGO_PKG_VERSION"));

/// Upper bound on a whole request, so a hung backend cannot stall polling
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Sensor names used for the three channels of a temperature point
pub const MAX_SENSOR: &str = "Max";
pub const MIN_SENSOR: &str = "Min";
pub const DDR_SENSOR: &str = "DDR";

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur when talking to the backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error during request
    #[error("Network error: {0}")]
    Network(String),

    /// API returned an error response
    #[error("API error (status {status}): {message}")]
    Status { status: u16, message: String },

    /// Failed to parse API response
    #[error("Parse error: {0}")]
    Parse(String),
}

// ============================================================================
// API Response Types
// ============================================================================

/// Run state reported for a board
#[derive(AsRefStr, Clone, Copy, Debug, Default, Deserialize, EnumString, PartialEq, Eq)]
pub enum BoardState {
    #[default]
    Running,
    Warning,
    Error,
    Finished,
    /// Any state this client does not know about
    #[serde(other)]
    Unknown,
}

/// One point of the rolling temperature buffer carried in a board status
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BoardTempPoint {
    /// Milliseconds since the Unix epoch
    pub ts: i64,
    pub name: String,
    pub val: f64,
}

/// Status of a single board under test
#[derive(Debug, Clone, Deserialize)]
pub struct BoardStatus {
    pub board_id: String,
    #[serde(default)]
    pub status: BoardState,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub elapsed_hours: f64,
    #[serde(default)]
    pub remaining_hours: f64,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub temp_min: f64,
    #[serde(default)]
    pub temp_ddr: f64,
    #[serde(default)]
    pub voltage: f64,
    #[serde(default)]
    pub kernel_heartbeat: Option<String>,
    #[serde(default)]
    pub cm55_heartbeat: Option<String>,
    #[serde(default)]
    pub task_type: Option<String>,
    #[serde(default)]
    pub current_loop: u64,
    #[serde(default)]
    pub is_hang: bool,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub temp_points: Vec<BoardTempPoint>,
}

/// Status report of one rig
#[derive(Debug, Clone, Deserialize)]
pub struct RigReport {
    pub rig_id: String,
    #[serde(default)]
    pub boards: Vec<BoardStatus>,
    #[serde(default)]
    pub last_report_at: Option<String>,
    #[serde(default)]
    pub seconds_since_report: f64,
}

impl RigReport {
    pub fn board(&self, board_id: &str) -> Option<&BoardStatus> {
        self.boards.iter().find(|b| b.board_id == board_id)
    }
}

/// One entry of `GET /api/temperature/{rigId}/{boardId}`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TemperaturePoint {
    pub timestamp: String,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub ddr_temperature: f64,
}

// ============================================================================
// Conversions
// ============================================================================

/// Parse a backend timestamp into naive local time.
///
/// Accepts RFC 3339 (converted to local time) and offset-less ISO 8601 with a
/// `T` or space separator and optional fractional seconds.
pub fn parse_api_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Local).naive_local());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
}

/// Expand temperature points into `Max`/`Min`/`DDR` samples
pub fn samples_from_points(points: &[TemperaturePoint]) -> Vec<TemperatureSample> {
    let mut samples = Vec::with_capacity(points.len() * 3);

    for point in points {
        let Some(timestamp) = parse_api_timestamp(&point.timestamp) else {
            tracing::debug!("Skipping point with invalid timestamp {}", point.timestamp);
            continue;
        };
        samples.push(TemperatureSample::new(timestamp, MAX_SENSOR, point.max_temperature));
        samples.push(TemperatureSample::new(timestamp, MIN_SENSOR, point.min_temperature));
        samples.push(TemperatureSample::new(timestamp, DDR_SENSOR, point.ddr_temperature));
    }

    samples
}

/// Convert a board's rolling buffer into samples
pub fn samples_from_board(board: &BoardStatus) -> Vec<TemperatureSample> {
    board
        .temp_points
        .iter()
        .filter(|p| !p.name.is_empty())
        .filter_map(|p| {
            let timestamp = Local.timestamp_millis_opt(p.ts).single()?.naive_local();
            Some(TemperatureSample::new(timestamp, p.name.clone(), p.val))
        })
        .collect()
}

// ============================================================================
// API Client
// ============================================================================

/// Samples for one board of a status report.
///
/// `None` when the board is missing or its rolling buffer is empty.
pub fn board_samples(report: &RigReport, board_id: &str) -> Option<Vec<TemperatureSample>> {
    let board = report.board(board_id)?;
    let samples = samples_from_board(board);
    (!samples.is_empty()).then_some(samples)
}

/// Blocking client for the monitoring backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build();

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            agent: ureq::Agent::new_with_config(config),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL for a path below the base
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);

        let mut response = self
            .agent
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| match e {
                ureq::Error::StatusCode(status) => ApiError::Status {
                    status,
                    message: format!("HTTP {}", status),
                },
                _ => ApiError::Network(e.to_string()),
            })?;

        response
            .body_mut()
            .read_json()
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    /// `GET /api/status/{rigId}`
    pub fn fetch_rig_status(&self, rig_id: &str) -> Result<RigReport, ApiError> {
        self.get_json(&format!("/api/status/{}", rig_id))
    }

    /// `GET /api/temperature/{rigId}/{boardId}`
    pub fn fetch_board_temperature(
        &self,
        rig_id: &str,
        board_id: &str,
    ) -> Result<Vec<TemperaturePoint>, ApiError> {
        self.get_json(&format!("/api/temperature/{}/{}", rig_id, board_id))
    }

    /// Temperature history of a board as samples
    pub fn fetch_board_samples(
        &self,
        rig_id: &str,
        board_id: &str,
    ) -> Result<Vec<TemperatureSample>, ApiError> {
        let points = self.fetch_board_temperature(rig_id, board_id)?;
        Ok(samples_from_points(&points))
    }

    /// Live history of a board.
    ///
    /// Reads the rolling buffer from the rig status report and falls back to
    /// the temperature history endpoint when the report has nothing for the
    /// board.
    pub fn fetch_board_history(
        &self,
        rig_id: &str,
        board_id: &str,
    ) -> Result<Vec<TemperatureSample>, ApiError> {
        match self.fetch_rig_status(rig_id) {
            Ok(report) => {
                if let Some(samples) = board_samples(&report, board_id) {
                    return Ok(samples);
                }
                tracing::debug!("No buffered points for {}/{}", rig_id, board_id);
            }
            Err(e) => tracing::debug!("Status for {} unavailable: {}", rig_id, e),
        }

        self.fetch_board_samples(rig_id, board_id)
    }
}
