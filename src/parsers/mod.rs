pub mod thermal;
pub mod types;

pub use thermal::{ThermalLog, LOG_LINE_PATTERN};
pub use types::{ParseError, Parseable, TemperatureSample, TIMESTAMP_FORMAT};
