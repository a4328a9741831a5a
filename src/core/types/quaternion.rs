//! Unit quaternion rotations.

use serde::{Deserialize, Serialize};
use std::ops::Mul;

use crate::core::types::Vec3;

/// Unit quaternion representing a 3D rotation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quaternion {
    /// Scalar part
    pub w: f32,
    /// Vector part, x component
    pub x: f32,
    /// Vector part, y component
    pub y: f32,
    /// Vector part, z component
    pub z: f32,
}

impl Quaternion {
    /// Creates a quaternion from raw components
    #[inline]
    pub fn new(w: f32, x: f32, y: f32, z: f32) -> Self {
        Self { w, x, y, z }
    }

    /// The identity rotation
    #[inline]
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Unit-length copy; the zero quaternion degrades to identity
    pub fn normalized(&self) -> Quaternion {
        let norm = (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt();
        if norm > 0.0 {
            Quaternion::new(self.w / norm, self.x / norm, self.y / norm, self.z / norm)
        } else {
            Quaternion::identity()
        }
    }

    /// The minimal rotation carrying the direction of `from` onto the
    /// direction of `to`. Anti-parallel inputs rotate half a turn about an
    /// axis perpendicular to `from`; a zero input yields identity.
    pub fn from_rotation_arc(from: Vec3, to: Vec3) -> Quaternion {
        let from = from.normalized();
        let to = to.normalized();
        if from.is_zero() || to.is_zero() {
            return Quaternion::identity();
        }

        let d = from.dot(to);
        if d >= 1.0 - 1e-6 {
            return Quaternion::identity();
        }
        if d <= -1.0 + 1e-6 {
            let mut axis = from.cross(Vec3::new(1.0, 0.0, 0.0));
            if axis.dot(axis) < 1e-6 {
                axis = from.cross(Vec3::new(0.0, 0.0, 1.0));
            }
            let axis = axis.normalized();
            return Quaternion::new(0.0, axis.x, axis.y, axis.z);
        }

        let axis = from.cross(to);
        Quaternion::new(1.0 + d, axis.x, axis.y, axis.z).normalized()
    }

    /// Rotates a vector by this quaternion
    #[inline]
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        let qv = Vec3::new(self.x, self.y, self.z);
        let t = qv.cross(v) * 2.0;
        v + t * self.w + qv.cross(t)
    }

    /// The inverse rotation (for unit quaternions)
    #[inline]
    pub fn conjugate(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::identity()
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    /// Hamilton product: `a * b` applies `b` first, then `a`
    fn mul(self, rhs: Quaternion) -> Quaternion {
        Quaternion::new(
            self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
            self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
        )
    }
}
