//! Synthetic sensor data for tests, benchmarks, and demos.
//!
//! Provides a deterministic pinhole-model coordinate mapper and builders
//! for frames and skeletons, so the pipeline can run end to end without
//! sensor hardware.

use crate::core::constants::{
    depth_index, BODY_INDEX_NONE, COLOR_CHANNELS, COLOR_HEIGHT, COLOR_WIDTH, DEPTH_HEIGHT,
    DEPTH_PIXELS, DEPTH_WIDTH,
};
use crate::core::types::{
    HandState, JointKind, Point2, RawJoint, RawSkeleton, SensorFrame, TrackingState, Vec3,
};
use crate::sensors::mapper::CoordinateMapper;

// Nominal Kinect v2 intrinsics, close enough for synthetic geometry.
const DEPTH_FOCAL: f32 = 365.0;
const DEPTH_CX: f32 = 256.0;
const DEPTH_CY: f32 = 212.0;
const COLOR_FOCAL: f32 = 1081.0;
const COLOR_CX: f32 = 960.0;
const COLOR_CY: f32 = 540.0;

/// Deterministic pinhole-model mapper standing in for the sensor's
/// calibrated mapping service.
///
/// Depth pixels unproject through nominal depth intrinsics; camera-space
/// points project through nominal color intrinsics. Zero depth and
/// non-positive z map to the zero coordinate, matching how the real
/// service reports unmappable pixels.
#[derive(Debug, Default, Clone, Copy)]
pub struct SyntheticMapper;

impl SyntheticMapper {
    /// Creates a mapper with the nominal intrinsics
    pub fn new() -> Self {
        SyntheticMapper
    }

    fn unproject(&self, index: usize, depth_mm: u16) -> Vec3 {
        if depth_mm == 0 {
            return Vec3::ZERO;
        }
        let x_px = (index % DEPTH_WIDTH) as f32;
        let y_px = (index / DEPTH_WIDTH) as f32;
        let z = depth_mm as f32 / 1000.0;
        Vec3::new(
            (x_px - DEPTH_CX) / DEPTH_FOCAL * z,
            (DEPTH_CY - y_px) / DEPTH_FOCAL * z,
            z,
        )
    }
}

impl CoordinateMapper for SyntheticMapper {
    fn depth_frame_to_color(&self, depth_mm: &[u16], out: &mut [Point2]) {
        for (i, (&d, o)) in depth_mm.iter().zip(out.iter_mut()).enumerate() {
            *o = self.camera_to_color(self.unproject(i, d));
        }
    }

    fn depth_frame_to_camera(&self, depth_mm: &[u16], out: &mut [Vec3]) {
        for (i, (&d, o)) in depth_mm.iter().zip(out.iter_mut()).enumerate() {
            *o = self.unproject(i, d);
        }
    }

    fn camera_to_color(&self, camera: Vec3) -> Point2 {
        if camera.z <= 0.0 {
            return Point2::default();
        }
        Point2::new(
            COLOR_CX + camera.x / camera.z * COLOR_FOCAL,
            COLOR_CY - camera.y / camera.z * COLOR_FOCAL,
        )
    }
}

fn tracked_joint(x: f32, y: f32, z: f32) -> RawJoint {
    RawJoint {
        position: Vec3::new(x, y, z),
        tracking_state: TrackingState::Tracked,
        ..Default::default()
    }
}

/// A tracked skeleton standing at lateral offset `x`, distance `z`.
///
/// Carries the joints the pipeline queries (spine base, head, hands,
/// feet), all fully tracked, with distinct hand gestures so state
/// propagation is observable.
pub fn standing_skeleton(id: u8, x: f32, z: f32) -> RawSkeleton {
    let mut skeleton = RawSkeleton::new(id);
    skeleton.tracked = true;
    skeleton.joints.insert(JointKind::SpineBase, tracked_joint(x, 0.0, z));
    skeleton.joints.insert(JointKind::SpineMid, tracked_joint(x, 0.3, z));
    skeleton.joints.insert(JointKind::Head, tracked_joint(x, 0.6, z));
    skeleton
        .joints
        .insert(JointKind::HandLeft, tracked_joint(x - 0.25, 0.1, z));
    skeleton
        .joints
        .insert(JointKind::HandRight, tracked_joint(x + 0.25, 0.1, z));
    skeleton
        .joints
        .insert(JointKind::FootLeft, tracked_joint(x - 0.1, -0.8, z));
    skeleton
        .joints
        .insert(JointKind::FootRight, tracked_joint(x + 0.1, -0.8, z));
    skeleton.left_hand_state = HandState::Open;
    skeleton.right_hand_state = HandState::Lasso;
    skeleton
}

/// A frame with full-size buffers and one standing skeleton, where the
/// depth-grid rectangle `x0, y0, width, height` is classified as body
/// `body_id` at a uniform depth of `depth_mm`.
///
/// The rest of the body-index buffer is background; the whole depth
/// buffer carries `depth_mm` so edge gating sees a flat scene. The floor
/// plane sits one meter below the sensor.
pub fn body_frame(
    body_id: u8,
    x0: usize,
    y0: usize,
    width: usize,
    height: usize,
    depth_mm: u16,
) -> SensorFrame {
    let mut body_index = vec![BODY_INDEX_NONE as f32; DEPTH_PIXELS];
    for y in y0..(y0 + height).min(DEPTH_HEIGHT) {
        for x in x0..(x0 + width).min(DEPTH_WIDTH) {
            body_index[depth_index(x, y)] = body_id as f32;
        }
    }
    SensorFrame {
        skeletons: vec![standing_skeleton(body_id, 0.0, 2.0)],
        depth: vec![depth_mm; DEPTH_PIXELS],
        body_index,
        color: vec![0; COLOR_WIDTH * COLOR_HEIGHT * COLOR_CHANNELS],
        floor_clip_plane: [0.0, 1.0, 0.0, 1.0],
    }
}

/// A frame with no skeletons and no buffers
pub fn empty_frame() -> SensorFrame {
    SensorFrame::default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::core::constants::depth_index;

    #[test]
    fn test_mapper_center_pixel_projects_to_color_center() {
        let mapper = SyntheticMapper::new();
        let mut depth = vec![0u16; DEPTH_PIXELS];
        depth[depth_index(256, 212)] = 2000;

        let mut camera = vec![Vec3::ZERO; DEPTH_PIXELS];
        mapper.depth_frame_to_camera(&depth, &mut camera);
        let center = camera[depth_index(256, 212)];
        assert_relative_eq!(center.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(center.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(center.z, 2.0, epsilon = 1e-5);

        let projected = mapper.camera_to_color(center);
        assert_relative_eq!(projected.x, 960.0, epsilon = 1e-3);
        assert_relative_eq!(projected.y, 540.0, epsilon = 1e-3);
    }

    #[test]
    fn test_mapper_zero_depth_is_unmappable() {
        let mapper = SyntheticMapper::new();
        let depth = vec![0u16; 4];
        let mut camera = vec![Vec3::new(9.0, 9.0, 9.0); 4];
        mapper.depth_frame_to_camera(&depth, &mut camera);
        assert!(camera.iter().all(|v| v.is_zero()));
        assert_eq!(mapper.camera_to_color(Vec3::ZERO), Point2::default());
    }

    #[test]
    fn test_standing_skeleton_has_query_joints() {
        let skeleton = standing_skeleton(2, 0.5, 2.5);
        assert_eq!(skeleton.id, 2);
        assert!(skeleton.tracked);
        for kind in [
            JointKind::SpineBase,
            JointKind::Head,
            JointKind::HandLeft,
            JointKind::HandRight,
            JointKind::FootLeft,
            JointKind::FootRight,
        ] {
            assert!(skeleton.joints.contains(kind));
        }
        let spine = skeleton.joints.get(JointKind::SpineBase).unwrap();
        assert_relative_eq!(spine.position.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(spine.position.z, 2.5, epsilon = 1e-6);
    }

    #[test]
    fn test_body_frame_paints_rectangle() {
        let frame = body_frame(1, 100, 100, 50, 40, 1800);
        assert!(frame.validate().is_ok());
        assert_eq!(frame.body_index[depth_index(100, 100)], 1.0);
        assert_eq!(frame.body_index[depth_index(149, 139)], 1.0);
        assert_eq!(frame.body_index[depth_index(99, 100)], 255.0);
        assert_eq!(frame.body_index[depth_index(100, 140)], 255.0);
        assert_eq!(frame.depth[depth_index(0, 0)], 1800);
    }
}
