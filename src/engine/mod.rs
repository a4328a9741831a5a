//! Engine layer - per-user orchestration across frames
//!
//! Ties the algorithm layer together into the stateful per-person
//! tracking surface consumed by applications.

pub mod user;
