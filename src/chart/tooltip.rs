//! Hover readout and time axis helpers.

use chrono::{DateTime, NaiveDateTime};

use crate::legend::LegendState;
use crate::series::SensorSeries;

/// Plot X coordinate (seconds) for a naive timestamp
pub fn time_to_x(t: NaiveDateTime) -> f64 {
    t.and_utc().timestamp_millis() as f64 / 1000.0
}

/// Inverse of [`time_to_x`]
pub fn x_to_time(x: f64) -> Option<NaiveDateTime> {
    if !x.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((x * 1000.0).round() as i64).map(|d| d.naive_utc())
}

/// Time-of-day label used on the X axis and the tooltip header
pub fn format_time_of_day(t: NaiveDateTime) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Multi-line readout: a `HH:MM:SS` header, then `<value>°C  <name>` per entry
pub fn format_tooltip(at: NaiveDateTime, entries: &[(&str, f64)]) -> String {
    let mut out = format_time_of_day(at);
    for (name, value) in entries {
        out.push('\n');
        out.push_str(&format!("{}°C  {}", value, name));
    }
    out
}

/// Build the readout for the instant under the pointer.
///
/// Each visible series contributes its nearest point; the header uses the
/// timestamp of the first contributing point. `None` when nothing is visible.
pub fn tooltip_at(series: &[SensorSeries], legend: &LegendState, x: f64) -> Option<String> {
    let at = x_to_time(x)?;

    let hits: Vec<(&str, NaiveDateTime, f64)> = series
        .iter()
        .filter(|s| legend.is_visible(&s.name))
        .filter_map(|s| s.nearest(at).map(|(t, v)| (s.name.as_str(), t, v)))
        .collect();

    let header = hits.first()?.1;
    let entries: Vec<(&str, f64)> = hits.iter().map(|&(n, _, v)| (n, v)).collect();
    Some(format_tooltip(header, &entries))
}
