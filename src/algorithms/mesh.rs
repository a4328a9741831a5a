//! Silhouette mesh reconstruction over the depth grid.
//!
//! Rebuilds a textured triangle mesh covering the depth pixels classified
//! as one body, walking the grid at a configurable stride and refusing to
//! bridge depth discontinuities at the silhouette boundary.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::core::constants::{DEPTH_HEIGHT, DEPTH_PIXELS, DEPTH_WIDTH, MAX_BODIES};
use crate::core::types::{BodyMesh, Point2, SensorFrame, Vec3};
use crate::error::{KayaError, Result};
use crate::sensors::mapper::CoordinateMapper;

fn default_step() -> usize {
    2
}

fn default_max_edge_depth_delta() -> f32 {
    0.1
}

/// Sampling parameters for mesh reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Grid stride in depth pixels, at least 1; larger strides trade
    /// detail for speed
    #[serde(default = "default_step")]
    pub step: usize,
    /// Largest depth difference a triangle edge may bridge, in meters.
    /// Edges crossing a bigger jump sit on a silhouette boundary and are
    /// not meshed.
    #[serde(default = "default_max_edge_depth_delta")]
    pub max_edge_depth_delta: f32,
}

impl MeshConfig {
    /// Checks the parameters are usable
    pub fn validate(&self) -> std::result::Result<(), &'static str> {
        if self.step == 0 {
            return Err("mesh step must be at least 1");
        }
        if self.step > DEPTH_HEIGHT / 2 {
            return Err("mesh step exceeds half the depth grid");
        }
        if self.max_edge_depth_delta <= 0.0 {
            return Err("max edge depth delta must be positive");
        }
        Ok(())
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            max_edge_depth_delta: default_max_edge_depth_delta(),
        }
    }
}

// Anchor-first edge gate: every vertex needs measured depth and both
// edges from the anchor must stay under the silhouette threshold.
#[inline]
fn triangle_ok(anchor: Vec3, b: Vec3, c: Vec3, max_delta: f32) -> bool {
    anchor.z > 0.0
        && b.z > 0.0
        && c.z > 0.0
        && (anchor.z - b.z).abs() < max_delta
        && (anchor.z - c.z).abs() < max_delta
}

/// Rebuilds a textured silhouette mesh for one body per call.
///
/// Owns the full-grid classification scratch so per-frame rebuilds do
/// not allocate. One builder serves one consumer; there is no shared
/// state between builders.
#[derive(Debug)]
pub struct MeshBuilder {
    config: MeshConfig,
    is_body: Vec<bool>,
}

impl MeshBuilder {
    /// Creates a builder with its scratch sized for the depth grid
    pub fn new(config: MeshConfig) -> Self {
        Self {
            config,
            is_body: vec![false; DEPTH_PIXELS],
        }
    }

    /// The active sampling parameters
    pub fn config(&self) -> &MeshConfig {
        &self.config
    }

    /// Rebuilds `mesh` to cover body `body_id` in `frame`.
    ///
    /// Any missing precondition leaves the previous mesh contents fully
    /// intact and reports which one failed; retrying on a later frame is
    /// the expected recovery. On success the old mesh is discarded and
    /// repopulated from scratch.
    pub fn build(
        &mut self,
        frame: &SensorFrame,
        body_id: u8,
        mapper: &dyn CoordinateMapper,
        mesh: &mut BodyMesh,
    ) -> Result<()> {
        if body_id as usize >= MAX_BODIES {
            warn!(
                "mesh rebuild requested for body id {} outside sensor range",
                body_id
            );
            return Err(KayaError::NoActiveBody);
        }
        if frame.depth.len() != DEPTH_PIXELS {
            debug!("mesh rebuild skipped, no depth buffer");
            return Err(KayaError::NoSensorData("depth"));
        }
        if frame.body_index.len() != DEPTH_PIXELS {
            debug!("mesh rebuild skipped, no body-index buffer");
            return Err(KayaError::NoSensorData("body index"));
        }
        if frame.color.is_empty() {
            debug!("mesh rebuild skipped, no color buffer");
            return Err(KayaError::NoSensorData("color"));
        }

        mesh.clear();
        mesh.tex_coords.resize(DEPTH_PIXELS, Point2::default());
        mesh.vertices.resize(DEPTH_PIXELS, Vec3::ZERO);
        mapper.depth_frame_to_color(&frame.depth, &mut mesh.tex_coords);
        mapper.depth_frame_to_camera(&frame.depth, &mut mesh.vertices);

        let target = body_id as i32;
        for (flag, sample) in self.is_body.iter_mut().zip(frame.body_index.iter()) {
            *flag = sample.round() as i32 == target;
        }

        self.emit_triangles(mesh);
        trace!("rebuilt body mesh with {} triangles", mesh.triangle_count());
        Ok(())
    }

    fn emit_triangles(&self, mesh: &mut BodyMesh) {
        let step = self.config.step.clamp(1, DEPTH_HEIGHT / 2);
        let max_delta = self.config.max_edge_depth_delta;

        // The first row and column have no top/left neighbors.
        for y in (step..DEPTH_HEIGHT).step_by(step) {
            for x in (step..DEPTH_WIDTH).step_by(step) {
                let i = y * DEPTH_WIDTH + x;
                let t = i - DEPTH_WIDTH * step;
                let l = i - step;
                let tl = t - step;

                let body_i = self.is_body[i];
                let body_t = self.is_body[t];
                let body_l = self.is_body[l];
                let body_tl = self.is_body[tl];

                if body_i && !body_tl && body_t && body_l {
                    // lower-right silhouette corner
                    if triangle_ok(mesh.vertices[i], mesh.vertices[t], mesh.vertices[l], max_delta)
                    {
                        mesh.triangle_indices
                            .extend_from_slice(&[i as u32, t as u32, l as u32]);
                    }
                } else if body_tl && !body_i && body_t && body_l {
                    // upper-left silhouette corner
                    if triangle_ok(
                        mesh.vertices[tl],
                        mesh.vertices[t],
                        mesh.vertices[l],
                        max_delta,
                    ) {
                        mesh.triangle_indices
                            .extend_from_slice(&[tl as u32, t as u32, l as u32]);
                    }
                } else {
                    // interior and remaining edge cells split the quad
                    // along the i-tl diagonal, each half on its own
                    if body_l
                        && triangle_ok(
                            mesh.vertices[i],
                            mesh.vertices[tl],
                            mesh.vertices[l],
                            max_delta,
                        )
                    {
                        mesh.triangle_indices
                            .extend_from_slice(&[i as u32, tl as u32, l as u32]);
                    }
                    if body_t
                        && triangle_ok(
                            mesh.vertices[i],
                            mesh.vertices[tl],
                            mesh.vertices[t],
                            max_delta,
                        )
                    {
                        mesh.triangle_indices
                            .extend_from_slice(&[i as u32, tl as u32, t as u32]);
                    }
                }
            }
        }
    }
}

impl Default for MeshBuilder {
    fn default() -> Self {
        MeshBuilder::new(MeshConfig::default())
    }
}
