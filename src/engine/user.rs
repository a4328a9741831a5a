//! Per-user tracking state across frames.
//!
//! A `TrackedUser` follows one person through the sensor's per-frame
//! skeleton lists: it binds to a body by handle, keeps the two most
//! recent per-joint snapshots, applies the application's world transform,
//! and owns the user's reconstructed silhouette mesh.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::algorithms::floor::FloorPlane;
use crate::algorithms::mesh::{MeshBuilder, MeshConfig};
use crate::algorithms::selection;
use crate::core::constants::{COLOR_WIDTH, MAX_BODIES};
use crate::core::types::{
    BodyHandle, BodyMesh, HandState, JointKind, JointMap, Point2, Quaternion, RigidTransform,
    SensorFrame, TrackingState, Vec3, WorldTransform,
};
use crate::error::{KayaError, Result};
use crate::sensors::mapper::CoordinateMapper;

/// Fully processed state of one joint for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct JointSnapshot {
    /// Color-image coordinate of the joint; zero when the joint was not
    /// tracked this frame
    pub projected_2d: Point2,
    /// Position after mirroring and the user's world transform
    pub position_3d: Vec3,
    /// Raw camera-space position as the sensor reported it
    pub position_raw_3d: Vec3,
    /// Orientation composed with the user's own pose
    pub orientation: Quaternion,
    /// Raw orientation as the sensor reported it
    pub orientation_raw: Quaternion,
    /// Measurement confidence carried over from the raw joint
    pub tracking_state: TrackingState,
}

/// Gesture states of both hands for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandStates {
    pub left: HandState,
    pub right: HandState,
}

/// One tracked person, followed across frames.
///
/// Holds a one-frame history of joint and hand state: `joints` and
/// `prev_joints` always reflect exactly the two most recent
/// [`TrackedUser::update`] calls, and they shift even when the update
/// fails for lack of a body. The world transform makes the user a
/// positionable node in the application's scene.
pub struct TrackedUser {
    body: Option<BodyHandle>,
    mapper: Option<Arc<dyn CoordinateMapper>>,
    transform: WorldTransform,
    mirror_x: bool,
    start_time: Option<Instant>,
    joints: JointMap<JointSnapshot>,
    prev_joints: JointMap<JointSnapshot>,
    hand_states: HandStates,
    prev_hand_states: HandStates,
    mesh: BodyMesh,
    mesh_builder: MeshBuilder,
}

impl TrackedUser {
    /// Creates an unbound user with default mesh sampling
    pub fn new() -> Self {
        Self::with_mesh_config(MeshConfig::default())
    }

    /// Creates an unbound user with explicit mesh sampling parameters
    pub fn with_mesh_config(config: MeshConfig) -> Self {
        Self {
            body: None,
            mapper: None,
            transform: WorldTransform::identity(),
            mirror_x: false,
            start_time: None,
            joints: JointMap::new(),
            prev_joints: JointMap::new(),
            hand_states: HandStates::default(),
            prev_hand_states: HandStates::default(),
            mesh: BodyMesh::new(),
            mesh_builder: MeshBuilder::new(config),
        }
    }

    /// Installs or removes the coordinate-mapping capability
    pub fn set_coordinate_mapper(&mut self, mapper: Option<Arc<dyn CoordinateMapper>>) {
        self.mapper = mapper;
    }

    /// True when a coordinate mapper is installed
    pub fn has_coordinate_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    /// Rebinds the user to a body handle, or unbinds with `None`.
    ///
    /// Returns true only when the bound identity actually changed. A
    /// genuine change to a body restamps the session start time; a change
    /// to `None` resets it.
    pub fn set_body(&mut self, body: Option<BodyHandle>) -> bool {
        if self.body == body {
            return false;
        }
        self.body = body;
        self.start_time = body.map(|_| Instant::now());
        true
    }

    /// The bound handle, if any
    pub fn body(&self) -> Option<BodyHandle> {
        self.body
    }

    /// True when a body handle is bound
    pub fn has_body(&self) -> bool {
        self.body.is_some()
    }

    /// When the current body was bound, if one is bound
    pub fn start_time(&self) -> Option<Instant> {
        self.start_time
    }

    /// Time since the current body was bound, zero when unbound
    pub fn user_time(&self) -> Duration {
        self.start_time
            .map(|t| t.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    // Shifts the one-frame history: current becomes previous, current
    // empties out.
    fn advance(&mut self) {
        self.prev_joints = std::mem::take(&mut self.joints);
        self.prev_hand_states = std::mem::take(&mut self.hand_states);
    }

    /// Recomputes the per-joint snapshots from this frame's skeleton.
    ///
    /// The bound handle is resolved against the frame fresh on every
    /// call; a stale or untracked slot counts as having no body. Losing
    /// the body still shifts the history buffers, so `prev_joints` keeps
    /// the last seen pose while `joints` reads empty. A missing mapper
    /// fails without touching any state.
    pub fn update(&mut self, frame: &SensorFrame) -> Result<()> {
        let skeleton = self
            .body
            .and_then(|handle| selection::body_by_handle(&frame.skeletons, handle))
            .filter(|s| s.tracked);
        let skeleton = match skeleton {
            Some(s) => s,
            None => {
                debug!("user update skipped, no active body");
                self.advance();
                return Err(KayaError::NoActiveBody);
            }
        };

        let mapper = match self.mapper.as_ref() {
            Some(m) => Arc::clone(m),
            None => {
                debug!("user update skipped, no coordinate mapper");
                return Err(KayaError::MissingCapability);
            }
        };

        self.advance();

        for (kind, raw) in skeleton.joints.iter() {
            let local = if self.mirror_x {
                raw.position.mirrored_x()
            } else {
                raw.position
            };
            let position_3d = self.transform.local_to_world(local);

            let projected_2d = if raw.tracking_state == TrackingState::NotTracked {
                Point2::default()
            } else {
                let mut p = mapper.camera_to_color(raw.position);
                if self.mirror_x {
                    p.x = COLOR_WIDTH as f32 - p.x;
                }
                p
            };

            self.joints.insert(
                kind,
                JointSnapshot {
                    projected_2d,
                    position_3d,
                    position_raw_3d: raw.position,
                    orientation: self.transform.pose.rotation * raw.orientation,
                    orientation_raw: raw.orientation,
                    tracking_state: raw.tracking_state,
                },
            );
        }

        self.hand_states = HandStates {
            left: skeleton.left_hand_state,
            right: skeleton.right_hand_state,
        };
        Ok(())
    }

    /// Snapshot of a joint from the current frame
    pub fn joint(&self, kind: JointKind) -> Option<&JointSnapshot> {
        self.joints.get(kind)
    }

    /// Snapshot of a joint from the previous frame
    pub fn prev_joint(&self, kind: JointKind) -> Option<&JointSnapshot> {
        self.prev_joints.get(kind)
    }

    /// All current-frame joint snapshots
    pub fn joints(&self) -> &JointMap<JointSnapshot> {
        &self.joints
    }

    /// All previous-frame joint snapshots
    pub fn prev_joints(&self) -> &JointMap<JointSnapshot> {
        &self.prev_joints
    }

    /// Current-frame hand gesture states
    pub fn hand_states(&self) -> HandStates {
        self.hand_states
    }

    /// Previous-frame hand gesture states
    pub fn prev_hand_states(&self) -> HandStates {
        self.prev_hand_states
    }

    /// True when the left hand is raised above the head on screen
    pub fn is_left_hand_up(&self) -> bool {
        self.hand_above_head(JointKind::HandLeft)
    }

    /// True when the right hand is raised above the head on screen
    pub fn is_right_hand_up(&self) -> bool {
        self.hand_above_head(JointKind::HandRight)
    }

    // Image y grows downward, so "above" is a smaller projected y.
    fn hand_above_head(&self, hand: JointKind) -> bool {
        if self.body.is_none() {
            return false;
        }
        let head = match self.joints.get(JointKind::Head) {
            Some(j) => j,
            None => return false,
        };
        let hand = match self.joints.get(hand) {
            Some(j) => j,
            None => return false,
        };
        hand.projected_2d.y < head.projected_2d.y
    }

    fn feet_midpoint(&self) -> Option<Vec3> {
        if self.body.is_none() {
            return None;
        }
        let left = self.joints.get(JointKind::FootLeft)?;
        let right = self.joints.get(JointKind::FootRight)?;
        Some(Vec3::midpoint(left.position_raw_3d, right.position_raw_3d))
    }

    /// Where the user stands on the floor, in world space; zero when
    /// unbound or the feet are unavailable
    pub fn pos_on_floor_world(&self, floor: &FloorPlane) -> Vec3 {
        match self.feet_midpoint() {
            Some(feet) => floor.closest_point_on_floor(feet),
            None => Vec3::ZERO,
        }
    }

    /// Where the user stands on the floor, in floor-plane coordinates;
    /// zero when unbound or the feet are unavailable
    pub fn pos_on_floor_plane(&self, floor: &FloorPlane) -> Point2 {
        match self.feet_midpoint() {
            Some(feet) => floor.closest_point_on_floor_plane(feet),
            None => Point2::default(),
        }
    }

    /// Rebuilds this user's silhouette mesh from the frame's buffers.
    ///
    /// Preconditions are checked in order: an active body, a body id
    /// within sensor range, an installed mapper, then the sensor buffers.
    /// Each failure is distinct and leaves the previous mesh untouched.
    pub fn build_mesh(&mut self, frame: &SensorFrame) -> Result<()> {
        let skeleton = self
            .body
            .and_then(|handle| selection::body_by_handle(&frame.skeletons, handle))
            .filter(|s| s.tracked);
        let skeleton = match skeleton {
            Some(s) => s,
            None => {
                debug!("mesh rebuild skipped, no active body");
                return Err(KayaError::NoActiveBody);
            }
        };
        if skeleton.id as usize >= MAX_BODIES {
            debug!("mesh rebuild skipped, body id out of range");
            return Err(KayaError::NoActiveBody);
        }

        let mapper = match self.mapper.as_ref() {
            Some(m) => Arc::clone(m),
            None => {
                debug!("mesh rebuild skipped, no coordinate mapper");
                return Err(KayaError::MissingCapability);
            }
        };

        self.mesh_builder
            .build(frame, skeleton.id, mapper.as_ref(), &mut self.mesh)
    }

    /// The most recently built silhouette mesh
    pub fn mesh(&self) -> &BodyMesh {
        &self.mesh
    }

    /// Unbinds and forgets all per-frame state.
    ///
    /// The mesh keeps its last built contents and the mapper stays
    /// installed; only the session binding and snapshots reset.
    pub fn clear(&mut self) {
        self.body = None;
        self.start_time = None;
        self.joints.clear();
        self.prev_joints.clear();
        self.hand_states = HandStates::default();
        self.prev_hand_states = HandStates::default();
    }

    /// Enables or disables mirroring about the sensor's vertical axis
    pub fn set_mirror_x(&mut self, mirror: bool) {
        self.mirror_x = mirror;
    }

    /// Whether mirroring is enabled
    pub fn mirror_x(&self) -> bool {
        self.mirror_x
    }

    /// Sets the per-axis world scale applied to joint positions
    pub fn set_world_scale(&mut self, scale: Vec3) {
        self.transform.scale = scale;
    }

    /// Sets the world offset applied after scaling
    pub fn set_world_translate(&mut self, translate: Vec3) {
        self.transform.translation = translate;
    }

    /// Sets the user's own pose as a scene node, applied last
    pub fn set_pose(&mut self, pose: RigidTransform) {
        self.transform.pose = pose;
    }

    /// The full world transform currently applied
    pub fn world_transform(&self) -> &WorldTransform {
        &self.transform
    }
}

impl Default for TrackedUser {
    fn default() -> Self {
        TrackedUser::new()
    }
}
