//! Integration tests for end-to-end functionality
//!
//! Tests for:
//! - Raw text to series and statistics
//! - File loading through the pipeline
//! - Loaded data flowing into the chart host
