//! Rigid and scene-node transform types.

use serde::{Deserialize, Serialize};

use crate::core::types::{Quaternion, Vec3};

/// A rigid transform in 3D: rotation followed by translation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation component
    pub rotation: Quaternion,
    /// Translation component in meters
    pub translation: Vec3,
}

impl RigidTransform {
    /// Creates a transform from rotation and translation
    pub fn new(rotation: Quaternion, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self {
            rotation: Quaternion::identity(),
            translation: Vec3::ZERO,
        }
    }

    /// Maps a point from the local frame into the parent frame
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.rotate(p) + self.translation
    }

    /// Maps a point from the parent frame into the local frame
    #[inline]
    pub fn inverse_transform_point(&self, p: Vec3) -> Vec3 {
        self.rotation.conjugate().rotate(p - self.translation)
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        RigidTransform::identity()
    }
}

/// Placement of a tracked user in the consuming application's world.
///
/// Raw joint positions pass through per-axis scale, then the translation
/// offset, then the user's own pose as a positionable node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldTransform {
    /// Per-axis scale applied first
    pub scale: Vec3,
    /// Offset applied after scaling, in meters
    pub translation: Vec3,
    /// The user's own position and orientation
    pub pose: RigidTransform,
}

impl WorldTransform {
    /// The identity placement: unit scale, zero offset, identity pose
    pub fn identity() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            translation: Vec3::ZERO,
            pose: RigidTransform::identity(),
        }
    }

    /// Maps a sensor-space point into world space
    #[inline]
    pub fn local_to_world(&self, p: Vec3) -> Vec3 {
        self.pose
            .transform_point(p.component_mul(self.scale) + self.translation)
    }
}

impl Default for WorldTransform {
    fn default() -> Self {
        WorldTransform::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn assert_vec_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn test_rigid_transform_round_trip() {
        let t = RigidTransform::new(
            Quaternion::from_rotation_arc(Vec3::UP, Vec3::new(0.2, 0.9, 0.1)),
            Vec3::new(1.0, -0.5, 2.0),
        );
        let p = Vec3::new(0.3, 1.7, -0.8);
        assert_vec_eq(t.inverse_transform_point(t.transform_point(p)), p);
    }

    #[test]
    fn test_rigid_transform_pure_translation() {
        let t = RigidTransform::new(Quaternion::identity(), Vec3::new(0.0, 1.0, 0.0));
        assert_vec_eq(
            t.transform_point(Vec3::new(1.0, 0.0, 0.0)),
            Vec3::new(1.0, 1.0, 0.0),
        );
    }

    #[test]
    fn test_world_transform_scales_before_translating() {
        let mut w = WorldTransform::identity();
        w.scale = Vec3::new(2.0, 2.0, 2.0);
        w.translation = Vec3::new(1.0, 0.0, 0.0);
        // translation is not scaled
        assert_vec_eq(
            w.local_to_world(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(3.0, 2.0, 2.0),
        );
    }

    #[test]
    fn test_world_transform_pose_applies_last() {
        let mut w = WorldTransform::identity();
        w.translation = Vec3::new(0.0, 1.0, 0.0);
        w.pose = RigidTransform::new(
            Quaternion::from_rotation_arc(Vec3::UP, Vec3::new(0.0, 0.0, 1.0)),
            Vec3::ZERO,
        );
        // offset first lifts the point to +Y, the pose then turns +Y into +Z
        assert_vec_eq(w.local_to_world(Vec3::ZERO), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_identity_world_transform_is_noop() {
        let p = Vec3::new(0.4, -1.1, 2.5);
        assert_vec_eq(WorldTransform::identity().local_to_world(p), p);
    }
}
