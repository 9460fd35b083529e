//! UI rendering modules for the rigtemp application.
//!
//! - `chart` - egui_plot chart backend, chart area and zoom slider
//! - `legend_panel` - Sensor visibility toggles
//! - `source_panel` - Log file loading and live board selection
//! - `stats` - Summary cards
//! - `toast` - Toast notification system
//! - `icons` - Custom icon drawing utilities

pub mod chart;
pub mod icons;
pub mod legend_panel;
pub mod source_panel;
pub mod stats;
pub mod toast;
