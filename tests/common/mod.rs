//! Common test utilities shared across all test modules
//!
//! This module provides helper functions for reading example files,
//! building samples and series, and a recording chart backend.

use chrono::{NaiveDate, NaiveDateTime};

use rigtemp::chart::{ChartBackend, ChartConfig};
use rigtemp::parsers::TemperatureSample;
use rigtemp::series::SensorSeries;

/// Helper function to read a text file, panicking with a clear message if not found.
/// This ensures CI catches missing example files instead of silently skipping tests.
pub fn read_example_file(file_path: &str) -> String {
    std::fs::read_to_string(file_path)
        .unwrap_or_else(|e| panic!("Failed to read example file '{}': {}", file_path, e))
}

/// Example log file paths
pub mod example_files {
    pub const THERMAL_LOG: &str = "exampleLogs/thermal/temperature.log";
}

/// Timestamp on 2024-01-01
pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

/// Build one thermal log line
pub fn log_line(time: &str, sensor: &str, value: &str) -> String {
    format!("[{}] thm log handler: [{}] {} C\n", time, sensor, value)
}

pub fn sample(seconds: u32, sensor: &str, value: f64) -> TemperatureSample {
    TemperatureSample::new(at(10, 0, seconds), sensor, value)
}

pub fn series(name: &str, values: &[(u32, f64)], default_visible: bool) -> SensorSeries {
    SensorSeries {
        name: name.to_string(),
        points: values.iter().map(|&(s, v)| (at(10, 0, s), v)).collect(),
        default_visible,
    }
}

/// The three-line scenario used throughout the tests
pub const SCENARIO: &str = "[2024-01-01 10:00:00] thm log handler: [CPU] 45.0 C\n\
[2024-01-01 10:00:05] thm log handler: [CPU] 46.5 C\n\
[2024-01-01 10:00:00] thm log handler: [DDR] 30.0 C\n";

/// Chart backend that records every call
#[derive(Default)]
pub struct RecordingBackend {
    pub configs: Vec<ChartConfig>,
    pub resizes: Vec<[f32; 2]>,
    pub dispose_count: usize,
}

impl ChartBackend for RecordingBackend {
    fn configure(&mut self, config: ChartConfig) {
        self.configs.push(config);
    }

    fn resize(&mut self, size: [f32; 2]) {
        self.resizes.push(size);
    }

    fn dispose(&mut self) {
        self.dispose_count += 1;
    }
}

/// Recording backend whose dispose count survives the host being dropped
pub mod shared {
    use std::cell::Cell;
    use std::rc::Rc;

    use rigtemp::chart::{ChartBackend, ChartConfig};

    #[derive(Clone, Default)]
    pub struct DisposeProbe {
        pub disposed: Rc<Cell<usize>>,
        pub configured: Rc<Cell<usize>>,
    }

    impl ChartBackend for DisposeProbe {
        fn configure(&mut self, _config: ChartConfig) {
            self.configured.set(self.configured.get() + 1);
        }

        fn resize(&mut self, _size: [f32; 2]) {}

        fn dispose(&mut self) {
            self.disposed.set(self.disposed.get() + 1);
        }
    }
}
