//! Sensor interface layer - the coordinate-mapping capability and
//! synthetic fixtures
//!
//! The tracking core consumes sensor output through the types here; real
//! device drivers live outside the crate and implement [`mapper::CoordinateMapper`].

pub mod fixtures;
pub mod mapper;
