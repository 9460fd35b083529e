//! Tests for series building and aggregate statistics
//!
//! Tests cover:
//! - Grouping by exact sensor name in first-occurrence order
//! - Stable chronological sorting
//! - Default visibility markers
//! - Global statistics

use crate::common::{at, sample};
use rigtemp::series::{build_series, compute_stats, SeriesConfig};

// ============================================
// Grouping Tests
// ============================================

#[test]
fn test_grouping_is_exact_string_match() {
    let samples = vec![
        sample(0, "CPU", 1.0),
        sample(1, "cpu", 2.0),
        sample(2, "CPU ", 3.0),
    ];
    let set = build_series(&samples, &SeriesConfig::default());
    assert_eq!(set.names(), vec!["CPU", "cpu", "CPU "]);
}

#[test]
fn test_one_series_per_distinct_name() {
    let samples = vec![
        sample(0, "A", 1.0),
        sample(1, "B", 2.0),
        sample(2, "A", 3.0),
        sample(3, "C", 4.0),
        sample(4, "B", 5.0),
    ];
    let set = build_series(&samples, &SeriesConfig::default());

    assert_eq!(set.series.len(), 3);
    assert_eq!(set.get("A").unwrap().points.len(), 2);
    assert_eq!(set.get("B").unwrap().points.len(), 2);
    assert_eq!(set.get("C").unwrap().points.len(), 1);
}

// ============================================
// Sorting Tests
// ============================================

#[test]
fn test_points_sorted_non_decreasing() {
    let samples = vec![
        sample(30, "CPU", 3.0),
        sample(10, "CPU", 1.0),
        sample(20, "CPU", 2.0),
        sample(0, "CPU", 0.0),
    ];
    let set = build_series(&samples, &SeriesConfig::default());

    let points = &set.series[0].points;
    for window in points.windows(2) {
        assert!(window[0].0 <= window[1].0);
    }
    assert_eq!(points[0], (at(10, 0, 0), 0.0));
}

#[test]
fn test_equal_timestamps_keep_input_order() {
    let samples = vec![
        sample(1, "CPU", 10.0),
        sample(1, "CPU", 20.0),
        sample(0, "CPU", 5.0),
        sample(1, "CPU", 30.0),
    ];
    let set = build_series(&samples, &SeriesConfig::default());
    let values: Vec<f64> = set.series[0].points.iter().map(|p| p.1).collect();
    assert_eq!(values, vec![5.0, 10.0, 20.0, 30.0]);
}

// ============================================
// Default Visibility Tests
// ============================================

#[test]
fn test_default_markers() {
    let samples = vec![
        sample(0, "cpu_big", 1.0),
        sample(0, "LPDDR5", 1.0),
        sample(0, "GPU", 1.0),
    ];
    let set = build_series(&samples, &SeriesConfig::default());

    assert!(set.get("cpu_big").unwrap().default_visible);
    assert!(set.get("LPDDR5").unwrap().default_visible);
    assert!(!set.get("GPU").unwrap().default_visible);
}

#[test]
fn test_custom_markers() {
    let config = SeriesConfig::with_markers(["min", "NPU"]);
    assert!(config.is_default_visible("SOC_MIN"));
    assert!(config.is_default_visible("npu0"));
    assert!(!config.is_default_visible("CPU"));
}

#[test]
fn test_no_markers_hides_everything() {
    let config = SeriesConfig::with_markers(Vec::<String>::new());
    let set = build_series(&[sample(0, "CPU", 1.0)], &config);
    assert!(!set.series[0].default_visible);
}

// ============================================
// Statistics Tests
// ============================================

#[test]
fn test_stats_are_global() {
    let samples = vec![
        sample(0, "A", 10.0),
        sample(1, "B", -4.5),
        sample(2, "A", 99.25),
        sample(3, "C", 0.0),
    ];
    let stats = compute_stats(&samples).unwrap();

    assert_eq!(stats.max_value, 99.25);
    assert_eq!(stats.min_value, -4.5);
    assert_eq!(stats.sample_count, 4);
    assert_eq!(stats.sensor_count, 3);
}

#[test]
fn test_stats_match_series() {
    let samples = vec![sample(0, "A", 1.0), sample(1, "B", 2.0), sample(2, "A", 3.0)];
    let set = build_series(&samples, &SeriesConfig::default());
    let stats = set.stats.unwrap();

    assert_eq!(stats.sensor_count, set.series.len());
    let total: usize = set.series.iter().map(|s| s.points.len()).sum();
    assert_eq!(stats.sample_count, total);
}

#[test]
fn test_stats_unavailable_for_empty_input() {
    assert_eq!(compute_stats(&[]), None);
}

#[test]
fn test_series_time_range() {
    let samples = vec![sample(5, "A", 1.0), sample(2, "B", 2.0), sample(9, "A", 3.0)];
    let set = build_series(&samples, &SeriesConfig::default());
    assert_eq!(set.time_range(), Some((at(10, 0, 2), at(10, 0, 9))));
}
