//! Parser tests
//!
//! Comprehensive tests for the thermal log parser.
