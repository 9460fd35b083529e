//! Core functionality tests
//!
//! Tests for series building, legend persistence, chart lifecycle,
//! settings and backend models.

pub mod api_tests;
pub mod legend_tests;
pub mod series_tests;
pub mod settings_tests;
