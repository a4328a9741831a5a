//! Error types for the tracking core

use thiserror::Error;

/// Recoverable per-frame failures reported by the tracking core.
///
/// Every variant is a missing precondition, not a fault: callers retry on
/// a later frame once the sensor delivers what was absent. Nothing here
/// tears down a `TrackedUser` or a mesh builder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KayaError {
    /// No coordinate mapper has been installed.
    #[error("no coordinate mapper available")]
    MissingCapability,

    /// No skeleton is bound, the bound handle no longer resolves to a
    /// tracked skeleton, or the skeleton carries an out-of-range body id.
    #[error("no active body")]
    NoActiveBody,

    /// A required sensor buffer is empty or not the expected size.
    #[error("sensor buffer unavailable: {0}")]
    NoSensorData(&'static str),
}

/// Result type for tracking operations.
pub type Result<T> = std::result::Result<T, KayaError>;
