//! Coordinate mapping between depth, camera, and color spaces.

use crate::core::types::{Point2, Vec3};

/// Coordinate-mapping capability supplied by the sensor driver.
///
/// The mapping depends on the sensor's calibration, so callers treat it
/// as a per-frame capability: they re-check its presence every frame and
/// report a recoverable failure when it is missing rather than caching
/// results across frames.
pub trait CoordinateMapper {
    /// Maps every depth pixel to its color-image coordinate.
    ///
    /// `depth_mm` and `out` cover the same row-major depth grid; entry
    /// `i` of `out` receives the color coordinate of depth pixel `i`.
    fn depth_frame_to_color(&self, depth_mm: &[u16], out: &mut [Point2]);

    /// Maps every depth pixel to a camera-space point in meters, same
    /// ordering contract as [`CoordinateMapper::depth_frame_to_color`].
    fn depth_frame_to_camera(&self, depth_mm: &[u16], out: &mut [Vec3]);

    /// Projects a single camera-space point into color-image pixels.
    fn camera_to_color(&self, camera: Vec3) -> Point2;
}
