//! Floor-plane coordinate frame derived from the sensor's clip plane.

use log::debug;

use crate::core::types::{Point2, Quaternion, Rect2, RigidTransform, Vec3};

/// The detected ground plane as a rigid coordinate frame.
///
/// Built fresh from each frame's clip-plane vector, never persisted. The
/// floor-local frame has its origin on the plane and +Y along the plane
/// normal; the in-plane axes are x (across the sensor) and z (away from
/// it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorPlane {
    normal: Vec3,
    distance: f32,
    transform: RigidTransform,
    valid: bool,
}

impl FloorPlane {
    /// Derives the floor frame from a raw clip-plane vector `(a, b, c, d)`:
    /// plane normal `(a, b, c)` plus distance `d` from the camera origin.
    ///
    /// An all-zero vector means the sensor has not detected a floor yet;
    /// the frame degrades to identity and is marked invalid so callers
    /// can tell real floor data from the fallback.
    pub fn from_clip_plane(clip_plane: [f32; 4]) -> FloorPlane {
        let raw_normal = Vec3::new(clip_plane[0], clip_plane[1], clip_plane[2]);
        let distance = clip_plane[3];

        if raw_normal.is_zero() {
            debug!("floor clip plane has no normal, falling back to identity floor frame");
            return FloorPlane {
                normal: Vec3::UP,
                distance: 0.0,
                transform: RigidTransform::identity(),
                valid: false,
            };
        }

        let normal = raw_normal.normalized();
        let rotation = Quaternion::from_rotation_arc(Vec3::UP, normal);
        let translation = normal * (-distance);
        FloorPlane {
            normal,
            distance,
            transform: RigidTransform::new(rotation, translation),
            valid: true,
        }
    }

    /// True when the frame came from real clip-plane data rather than the
    /// identity fallback
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Unit plane normal in camera space
    pub fn normal(&self) -> Vec3 {
        self.normal
    }

    /// Distance of the plane from the camera origin, as reported
    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// The floor-local frame expressed in camera space
    pub fn transform(&self) -> RigidTransform {
        self.transform
    }

    /// Maps a floor-local point into camera/world space
    #[inline]
    pub fn floor_to_world(&self, p: Vec3) -> Vec3 {
        self.transform.transform_point(p)
    }

    /// Maps a world point into the floor-local frame
    #[inline]
    pub fn world_to_floor(&self, p: Vec3) -> Vec3 {
        self.transform.inverse_transform_point(p)
    }

    /// Nearest point on the floor plane to a world point, in world space
    pub fn closest_point_on_floor(&self, p: Vec3) -> Vec3 {
        let origin = self.transform.translation;
        let n = self.transform.rotation.rotate(Vec3::UP);
        let d = (origin - p).dot(n);
        p + n * d
    }

    /// In-plane floor coordinates of the nearest floor point to a world
    /// point: x across the sensor, y away from it
    pub fn closest_point_on_floor_plane(&self, p: Vec3) -> Point2 {
        let local = self.world_to_floor(self.closest_point_on_floor(p));
        Point2::new(local.x, local.z)
    }

    /// World-space corners of a floor-local rectangle, for ground-plane
    /// overlays
    pub fn rect_corners_world(&self, rect: Rect2) -> [Vec3; 4] {
        rect.corners()
            .map(|c| self.floor_to_world(Vec3::new(c.x, 0.0, c.y)))
    }
}
