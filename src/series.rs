//! Grouping of temperature samples into per-sensor series.
//!
//! Series keep the order in which their sensor first appeared in the source,
//! points inside a series are sorted by time (stable for equal timestamps),
//! and aggregate statistics are recomputed from scratch for each load.

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDateTime;

use crate::parsers::TemperatureSample;

/// Placeholder shown when statistics are unavailable
pub const UNAVAILABLE: &str = "--";

/// Which sensors are shown before the user toggles anything
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesConfig {
    /// Case-insensitive substrings; a sensor containing any of them is visible by default
    pub default_visible_markers: BTreeSet<String>,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self::with_markers(["CPU", "DDR"])
    }
}

impl SeriesConfig {
    pub fn with_markers<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_visible_markers: markers.into_iter().map(Into::into).collect(),
        }
    }

    /// Check a sensor name against the configured markers
    pub fn is_default_visible(&self, sensor: &str) -> bool {
        let upper = sensor.to_uppercase();
        self.default_visible_markers
            .iter()
            .any(|marker| upper.contains(&marker.to_uppercase()))
    }
}

/// Time-ordered readings of one sensor
#[derive(Clone, Debug, PartialEq)]
pub struct SensorSeries {
    pub name: String,
    /// Ascending by timestamp
    pub points: Vec<(NaiveDateTime, f64)>,
    pub default_visible: bool,
}

impl SensorSeries {
    /// Minimum and maximum value of the series
    pub fn value_range(&self) -> Option<(f64, f64)> {
        let mut iter = self.points.iter().map(|&(_, v)| v);
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// Time span covered by the series
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.0, last.0)),
            _ => None,
        }
    }

    /// Point closest in time to `at`; earlier point wins an exact tie
    pub fn nearest(&self, at: NaiveDateTime) -> Option<(NaiveDateTime, f64)> {
        if self.points.is_empty() {
            return None;
        }

        let idx = self.points.partition_point(|&(t, _)| t < at);
        if idx == 0 {
            return self.points.first().copied();
        }
        if idx >= self.points.len() {
            return self.points.last().copied();
        }

        let before = self.points[idx - 1];
        let after = self.points[idx];
        if at - before.0 <= after.0 - at {
            Some(before)
        } else {
            Some(after)
        }
    }
}

/// Global statistics across every sample of a load
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AggregateStats {
    pub max_value: f64,
    pub min_value: f64,
    pub sensor_count: usize,
    pub sample_count: usize,
}

/// Series plus their statistics; `stats` is `None` when there is no data
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesSet {
    pub series: Vec<SensorSeries>,
    pub stats: Option<AggregateStats>,
}

impl SeriesSet {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&SensorSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Earliest and latest timestamp across all series
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.series
            .iter()
            .filter_map(SensorSeries::time_range)
            .reduce(|(lo, hi), (a, b)| (lo.min(a), hi.max(b)))
    }
}

/// Compute global max/min/count statistics
pub fn compute_stats(samples: &[TemperatureSample]) -> Option<AggregateStats> {
    let first = samples.first()?;

    let mut max_value = first.value;
    let mut min_value = first.value;
    let mut sensors: BTreeSet<&str> = BTreeSet::new();

    for sample in samples {
        max_value = max_value.max(sample.value);
        min_value = min_value.min(sample.value);
        sensors.insert(sample.sensor.as_str());
    }

    Some(AggregateStats {
        max_value,
        min_value,
        sensor_count: sensors.len(),
        sample_count: samples.len(),
    })
}

/// Group samples by sensor into time-sorted series
pub fn build_series(samples: &[TemperatureSample], config: &SeriesConfig) -> SeriesSet {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut series: Vec<SensorSeries> = Vec::new();

    for sample in samples {
        let slot = *index.entry(sample.sensor.as_str()).or_insert_with(|| {
            series.push(SensorSeries {
                name: sample.sensor.clone(),
                points: Vec::new(),
                default_visible: config.is_default_visible(&sample.sensor),
            });
            series.len() - 1
        });
        series[slot].points.push((sample.timestamp, sample.value));
    }

    // sort_by_key is stable, so equal timestamps keep input order
    for s in &mut series {
        s.points.sort_by_key(|&(t, _)| t);
    }

    SeriesSet {
        series,
        stats: compute_stats(samples),
    }
}

/// Format a statistic with two decimals, or the unavailable placeholder
pub fn format_stat(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}", v),
        None => UNAVAILABLE.to_string(),
    }
}

/// Format a count, or the unavailable placeholder
pub fn format_count(count: Option<usize>) -> String {
    match count {
        Some(c) => c.to_string(),
        None => UNAVAILABLE.to_string(),
    }
}
