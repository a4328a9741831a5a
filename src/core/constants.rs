//! Fixed sensor geometry shared by every stage of the pipeline.
//!
//! The depth camera delivers a 512x424 grid of millimeter samples, the
//! color camera a 1920x1080 four-channel image. Body segmentation rides
//! on the depth grid, one value per pixel.

/// Depth image width in pixels.
pub const DEPTH_WIDTH: usize = 512;

/// Depth image height in pixels.
pub const DEPTH_HEIGHT: usize = 424;

/// Total depth-grid cell count.
pub const DEPTH_PIXELS: usize = DEPTH_WIDTH * DEPTH_HEIGHT;

/// Color image width in pixels.
pub const COLOR_WIDTH: usize = 1920;

/// Color image height in pixels.
pub const COLOR_HEIGHT: usize = 1080;

/// Channels per color pixel.
pub const COLOR_CHANNELS: usize = 4;

/// Maximum simultaneously tracked skeletons the sensor reports.
pub const MAX_BODIES: usize = 6;

/// Body-index value marking a depth pixel that belongs to no body.
pub const BODY_INDEX_NONE: u8 = 255;

/// Row-major index of the depth-grid cell at `(x, y)`.
#[inline]
pub fn depth_index(x: usize, y: usize) -> usize {
    y * DEPTH_WIDTH + x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_index_row_major() {
        assert_eq!(depth_index(0, 0), 0);
        assert_eq!(depth_index(511, 0), 511);
        assert_eq!(depth_index(0, 1), 512);
        assert_eq!(depth_index(511, 423), DEPTH_PIXELS - 1);
    }
}
