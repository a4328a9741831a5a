//! Algorithm layer - floor-frame derivation, body selection, and
//! silhouette mesh reconstruction
//!
//! Per-frame computations over sensor snapshots. Nothing here retains
//! state between frames beyond reusable scratch buffers.

pub mod floor;
pub mod mesh;
pub mod selection;
