//! Shared data types for body tracking
//!
//! Geometry primitives, per-frame skeleton snapshots, and the mesh
//! container exchanged between pipeline stages.

mod frame;
mod mesh;
mod quaternion;
mod rect;
mod skeleton;
mod transform;
mod vector;

pub use frame::SensorFrame;
pub use mesh::BodyMesh;
pub use quaternion::Quaternion;
pub use rect::Rect2;
pub use skeleton::{
    BodyHandle, HandState, JointKind, JointMap, RawJoint, RawSkeleton, TrackingState,
};
pub use transform::{RigidTransform, WorldTransform};
pub use vector::{Point2, Vec3};
