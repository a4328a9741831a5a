//! Kaya-Track: body-tracking core for depth sensors.
//!
//! Consumes per-frame sensor output (skeleton lists, depth map,
//! body-index map, color image, floor clip plane) and derives three
//! artifacts from it: a floor-relative coordinate frame, selection
//! queries over the tracked skeletons, and a textured silhouette mesh of
//! one tracked person.
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                    engine (TrackedUser)                      |
//! |     binds bodies, double-buffers joint snapshots, owns the   |
//! |     user's mesh and world placement                          |
//! +--------------------------------------------------------------+
//! |     algorithms (FloorPlane, selection, MeshBuilder)          |
//! +--------------------------------------------------------------+
//! |     sensors (CoordinateMapper trait, synthetic fixtures)     |
//! +--------------------------------------------------------------+
//! |     core (constants, geometry, skeleton and frame types)     |
//! +--------------------------------------------------------------+
//! ```
//!
//! The sensor driver and the renderer are collaborators outside this
//! crate: a driver fills [`SensorFrame`] and implements
//! [`CoordinateMapper`]; a renderer consumes joint snapshots, floor
//! geometry, and [`BodyMesh`] arrays. Everything in between happens
//! here, synchronously, once per frame.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod sensors;

// Core foundation
pub use crate::core::constants::{
    depth_index, BODY_INDEX_NONE, COLOR_CHANNELS, COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT,
    DEPTH_PIXELS, DEPTH_WIDTH, MAX_BODIES,
};
pub use crate::core::types::{
    BodyHandle, BodyMesh, HandState, JointKind, JointMap, Point2, Quaternion, RawJoint,
    RawSkeleton, Rect2, RigidTransform, SensorFrame, TrackingState, Vec3, WorldTransform,
};

// Sensor interface
pub use crate::sensors::mapper::CoordinateMapper;

// Algorithms
pub use crate::algorithms::floor::FloorPlane;
pub use crate::algorithms::mesh::{MeshBuilder, MeshConfig};
pub use crate::algorithms::selection::{
    bodies_within_floor_bounds, body_by_handle, central_body, central_body_index, tracked_bodies,
    tracked_body_count, SelectionConfig,
};

// Engine
pub use crate::engine::user::{HandStates, JointSnapshot, TrackedUser};

// Configuration and errors
pub use crate::config::{ConfigLoadError, TrackingConfig};
pub use crate::error::{KayaError, Result};
