use chrono::NaiveDateTime;
use thiserror::Error;

/// Timestamp layout used inside the bracketed log prefix
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single temperature reading extracted from a log or an API payload
#[derive(Clone, Debug, PartialEq)]
pub struct TemperatureSample {
    /// Wall-clock instant of the reading (naive local time, no timezone)
    pub timestamp: NaiveDateTime,
    /// Sensor channel the reading belongs to
    pub sensor: String,
    /// Temperature in degrees Celsius
    pub value: f64,
}

impl TemperatureSample {
    pub fn new(timestamp: NaiveDateTime, sensor: impl Into<String>, value: f64) -> Self {
        Self {
            timestamp,
            sensor: sensor.into(),
            value,
        }
    }
}

/// Errors produced while turning raw text into samples
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    /// The input contained no line matching the thermal log pattern
    #[error("no recognizable temperature data found, check the log contents")]
    NoRecognizableData,
}

/// Implemented by every log format that yields temperature samples
pub trait Parseable {
    fn parse(&self, file_contents: &str) -> Result<Vec<TemperatureSample>, ParseError>;
}
