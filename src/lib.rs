//! Trimforge - lossless video trimming to keep segments
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod trim;
