//! Core foundation layer - sensor constants and shared data types
//!
//! This layer has no dependencies on other layers and provides the
//! fundamental building blocks used throughout the tracking system.

pub mod constants;
pub mod types;
