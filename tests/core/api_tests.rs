//! Tests for backend response models and their conversion to samples

use chrono::NaiveDate;

use rigtemp::api::{
    board_samples, parse_api_timestamp, samples_from_board, samples_from_points, ApiClient,
    BoardState, RigReport, TemperaturePoint, DDR_SENSOR, MAX_SENSOR, MIN_SENSOR,
};
use rigtemp::series::{build_series, SeriesConfig};

const STATUS_JSON: &str = r#"{
    "rig_id": "rig-07",
    "boards": [
        {
            "board_id": "b0",
            "status": "Running",
            "temperature": 71.5,
            "temp_min": 40.0,
            "temp_ddr": 55.0,
            "current_loop": 12,
            "temp_points": [
                {"ts": 1704103200000, "name": "CPU", "val": 70.0},
                {"ts": 1704103205000, "name": "CPU", "val": 71.5},
                {"ts": 1704103205000, "name": "", "val": 1.0}
            ]
        },
        {
            "board_id": "b1",
            "status": "Warning"
        }
    ],
    "seconds_since_report": 2.5
}"#;

#[test]
fn test_rig_report_deserializes_with_defaults() {
    let report: RigReport = serde_json::from_str(STATUS_JSON).unwrap();

    assert_eq!(report.rig_id, "rig-07");
    assert_eq!(report.boards.len(), 2);
    assert_eq!(report.last_report_at, None);

    let b1 = report.board("b1").unwrap();
    assert_eq!(b1.status, BoardState::Warning);
    assert!(b1.temp_points.is_empty());
    assert!(report.board("b9").is_none());
}

#[test]
fn test_board_state_strings() {
    assert_eq!(BoardState::Finished.as_ref(), "Finished");
    assert_eq!("Error".parse::<BoardState>().unwrap(), BoardState::Error);
}

#[test]
fn test_samples_from_board_skip_unnamed() {
    let report: RigReport = serde_json::from_str(STATUS_JSON).unwrap();
    let samples = samples_from_board(report.board("b0").unwrap());

    assert_eq!(samples.len(), 2);
    assert!(samples.iter().all(|s| s.sensor == "CPU"));
    assert_eq!(samples[1].timestamp - samples[0].timestamp, chrono::Duration::seconds(5));
}

#[test]
fn test_parse_api_timestamp_variants() {
    let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();

    assert_eq!(parse_api_timestamp("2024-01-01T10:00:00"), Some(expected));
    assert_eq!(parse_api_timestamp("2024-01-01 10:00:00"), Some(expected));
    assert!(parse_api_timestamp("2024-01-01T10:00:00.250").is_some());
    assert!(parse_api_timestamp("2024-01-01T10:00:00Z").is_some());
    assert_eq!(parse_api_timestamp("yesterday"), None);
}

#[test]
fn test_samples_from_points_expand_three_sensors() {
    let json = r#"[
        {"timestamp": "2024-01-01T10:00:00", "max_temperature": 80.5, "min_temperature": 35.0, "ddr_temperature": 50.0},
        {"timestamp": "garbage", "max_temperature": 1.0, "min_temperature": 1.0, "ddr_temperature": 1.0},
        {"timestamp": "2024-01-01T10:00:05", "max_temperature": 81.0, "min_temperature": 36.0, "ddr_temperature": 51.0}
    ]"#;
    let points: Vec<TemperaturePoint> = serde_json::from_str(json).unwrap();
    let samples = samples_from_points(&points);

    assert_eq!(samples.len(), 6);
    let set = build_series(&samples, &SeriesConfig::with_markers(["MAX", "MIN", "DDR"]));
    assert_eq!(set.names(), vec![MAX_SENSOR, MIN_SENSOR, DDR_SENSOR]);
    assert_eq!(set.stats.unwrap().max_value, 81.0);
}

#[test]
fn test_client_url_joins_paths() {
    let client = ApiClient::new("http://127.0.0.1:8020/");
    assert_eq!(client.base_url(), "http://127.0.0.1:8020");
    assert_eq!(
        client.url("/api/temperature/rig-07/b0"),
        "http://127.0.0.1:8020/api/temperature/rig-07/b0"
    );
}

#[test]
fn test_unknown_board_state_does_not_fail_report() {
    let json = r#"{
        "rig_id": "rig-07",
        "boards": [
            {"board_id": "b0", "status": "Offline"},
            {"board_id": "b1", "status": "Finished"}
        ]
    }"#;
    let report: RigReport = serde_json::from_str(json).unwrap();

    assert_eq!(report.board("b0").unwrap().status, BoardState::Unknown);
    assert_eq!(report.board("b1").unwrap().status, BoardState::Finished);
}

#[test]
fn test_board_samples_from_status_report() {
    let report: RigReport = serde_json::from_str(STATUS_JSON).unwrap();

    let samples = board_samples(&report, "b0").unwrap();
    assert_eq!(samples.len(), 2);

    // Empty buffer and missing board both defer to the history endpoint
    assert!(board_samples(&report, "b1").is_none());
    assert!(board_samples(&report, "b9").is_none());
}

#[test]
fn test_live_defaults_for_board_buffer() {
    let report: RigReport = serde_json::from_str(STATUS_JSON).unwrap();
    let samples = board_samples(&report, "b0").unwrap();
    let config = rigtemp::settings::AnalyzerSettings::default().live_series_config();

    let set = build_series(&samples, &config);
    assert!(set.get("CPU").unwrap().default_visible);
}
