//! rigtemp - Temperature log analyzer for hardware burn-in rigs
//!
//! This library turns the thermal logs written by burn-in rigs (or the
//! temperature history served by the rig monitoring backend) into per-sensor
//! time series, summary statistics and an interactive chart.
//!
//! ## Module Structure
//!
//! - [`parsers`] - Thermal log parser producing temperature samples
//! - [`series`] - Grouping into per-sensor series and aggregate statistics
//! - [`pipeline`] - File-load pipeline (read → parse → group → summarise)
//! - [`legend`] - Persisted legend preferences over a key-value store
//! - [`chart`] - Chart backend abstraction, axis fitting, zoom, tooltips
//! - [`api`] - Client for the rig monitoring backend
//! - [`live`] - Background polling of a board's temperature history
//! - [`settings`] - User settings persistence
//! - [`state`] - Core application state types and constants
//! - [`app`] - Main application state and eframe::App implementation
//! - [`ui`] - User interface components

pub mod api;
pub mod app;
pub mod chart;
pub mod legend;
pub mod live;
pub mod parsers;
pub mod pipeline;
pub mod series;
pub mod settings;
pub mod state;
pub mod ui;
