//! Per-frame sensor data bundle.

use serde::{Deserialize, Serialize};

use crate::core::constants::{
    COLOR_CHANNELS, COLOR_HEIGHT, COLOR_WIDTH, DEPTH_PIXELS, MAX_BODIES,
};
use crate::core::types::RawSkeleton;

/// Everything the sensor delivered for one tick, captured as an owned
/// snapshot.
///
/// Queries within a frame all observe this one snapshot; the sensor
/// driver builds a fresh one per tick and never mutates an old one.
/// Buffers may legitimately be empty (the sensor had nothing yet); a
/// non-empty buffer must have its full sensor size.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorFrame {
    /// Skeletons in sensor slot order, at most `MAX_BODIES`
    pub skeletons: Vec<RawSkeleton>,
    /// Depth image in millimeters, row-major 512x424
    pub depth: Vec<u16>,
    /// Body-index samples on the depth grid; 0-5 selects a body slot,
    /// 255 marks background. Stored as interpolated samples, so
    /// consumers round before comparing.
    pub body_index: Vec<f32>,
    /// Color image bytes, 1920x1080, four channels per pixel
    pub color: Vec<u8>,
    /// Detected ground plane as (a, b, c, d): plane normal and distance
    /// from the camera origin
    pub floor_clip_plane: [f32; 4],
}

impl SensorFrame {
    /// Checks internal consistency of the snapshot
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.skeletons.len() > MAX_BODIES {
            return Err("more skeletons than sensor body slots");
        }
        for skeleton in &self.skeletons {
            if skeleton.id as usize >= MAX_BODIES {
                return Err("skeleton id out of range");
            }
        }
        if !self.depth.is_empty() && self.depth.len() != DEPTH_PIXELS {
            return Err("depth buffer is not 512x424");
        }
        if !self.body_index.is_empty() && self.body_index.len() != DEPTH_PIXELS {
            return Err("body-index buffer is not 512x424");
        }
        if !self.color.is_empty() && self.color.len() != COLOR_WIDTH * COLOR_HEIGHT * COLOR_CHANNELS
        {
            return Err("color buffer is not 1920x1080 four-channel");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_frame_is_valid() {
        assert!(SensorFrame::default().validate().is_ok());
    }

    #[test]
    fn test_full_size_buffers_are_valid() {
        let frame = SensorFrame {
            depth: vec![0; DEPTH_PIXELS],
            body_index: vec![255.0; DEPTH_PIXELS],
            color: vec![0; COLOR_WIDTH * COLOR_HEIGHT * COLOR_CHANNELS],
            ..Default::default()
        };
        assert!(frame.validate().is_ok());
    }

    #[test]
    fn test_truncated_depth_rejected() {
        let frame = SensorFrame {
            depth: vec![0; DEPTH_PIXELS - 1],
            ..Default::default()
        };
        assert!(frame.validate().is_err());
    }

    #[test]
    fn test_out_of_range_skeleton_id_rejected() {
        let frame = SensorFrame {
            skeletons: vec![RawSkeleton::new(6)],
            ..Default::default()
        };
        assert!(frame.validate().is_err());
    }

    #[test]
    fn test_too_many_skeletons_rejected() {
        let frame = SensorFrame {
            skeletons: vec![RawSkeleton::new(0); 7],
            ..Default::default()
        };
        assert!(frame.validate().is_err());
    }
}
