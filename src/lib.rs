//! Trackmux - batch track modification and merging with mkvmerge
//!
//! This library crate exposes the core functionality for integration testing.

pub mod batch;
pub mod config;
pub mod preflight;
pub mod prompt;
pub mod scanner;
