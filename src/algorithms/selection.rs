//! Selection and spatial queries over one frame's skeleton list.
//!
//! All functions are pure reads of the frame snapshot; handles returned
//! here stay meaningful only for the frame they were computed from.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::algorithms::floor::FloorPlane;
use crate::core::types::{BodyHandle, JointKind, RawSkeleton, Rect2, TrackingState, Vec3};

fn default_z_threshold() -> f32 {
    3.0
}

fn default_dist_threshold() -> f32 {
    0.7
}

/// Thresholds for the central-body heuristic
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Maximum forward distance of the spine base in meters
    #[serde(default = "default_z_threshold")]
    pub z_threshold: f32,
    /// Maximum lateral offset of the spine base in meters
    #[serde(default = "default_dist_threshold")]
    pub dist_threshold: f32,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            z_threshold: default_z_threshold(),
            dist_threshold: default_dist_threshold(),
        }
    }
}

/// Picks the skeleton standing most central in front of the sensor.
///
/// Scans slot order and keeps the tracked skeleton whose spine base has
/// the smallest lateral offset, among those within both thresholds. Ties
/// go to the earlier slot.
pub fn central_body_index(
    skeletons: &[RawSkeleton],
    config: &SelectionConfig,
) -> Option<BodyHandle> {
    let mut closest_dist = config.dist_threshold;
    let mut selected = None;

    for (slot, skeleton) in skeletons.iter().enumerate() {
        if !skeleton.tracked {
            continue;
        }
        let spine = match skeleton.joints.get(JointKind::SpineBase) {
            Some(joint) => joint,
            None => continue,
        };
        let dist = spine.position.x.abs();
        let z = spine.position.z.abs();
        if dist < closest_dist && z < config.z_threshold {
            closest_dist = dist;
            selected = Some(BodyHandle::new(slot));
        }
    }
    selected
}

/// The central skeleton itself, when one qualifies
pub fn central_body<'a>(
    skeletons: &'a [RawSkeleton],
    config: &SelectionConfig,
) -> Option<&'a RawSkeleton> {
    central_body_index(skeletons, config).and_then(|handle| body_by_handle(skeletons, handle))
}

/// Skeleton at a handle's slot, if the slot exists in this frame
#[inline]
pub fn body_by_handle(skeletons: &[RawSkeleton], handle: BodyHandle) -> Option<&RawSkeleton> {
    skeletons.get(handle.index())
}

/// Currently tracked skeletons, slot order preserved
pub fn tracked_bodies(skeletons: &[RawSkeleton]) -> impl Iterator<Item = &RawSkeleton> {
    skeletons.iter().filter(|s| s.tracked)
}

/// Number of currently tracked skeletons
pub fn tracked_body_count(skeletons: &[RawSkeleton]) -> usize {
    tracked_bodies(skeletons).count()
}

/// Handles of tracked skeletons standing inside a floor-local rectangle,
/// nearest to the sensor first.
///
/// A skeleton qualifies when its spine base is at least inferred and the
/// midpoint of its two foot joints, projected onto the floor plane, falls
/// strictly inside `bounds`. Results are ordered by projected forward
/// coordinate ascending; equal depths keep slot order.
pub fn bodies_within_floor_bounds(
    skeletons: &[RawSkeleton],
    bounds: &Rect2,
    floor: &FloorPlane,
) -> Vec<BodyHandle> {
    let mut inside: Vec<(BodyHandle, f32)> = Vec::new();

    for (slot, skeleton) in skeletons.iter().enumerate() {
        if !skeleton.tracked {
            continue;
        }
        let spine = match skeleton.joints.get(JointKind::SpineBase) {
            Some(joint) => joint,
            None => continue,
        };
        if spine.tracking_state == TrackingState::NotTracked {
            continue;
        }
        let left = match skeleton.joints.get(JointKind::FootLeft) {
            Some(joint) => joint,
            None => continue,
        };
        let right = match skeleton.joints.get(JointKind::FootRight) {
            Some(joint) => joint,
            None => continue,
        };

        let feet = Vec3::midpoint(left.position, right.position);
        let on_floor = floor.closest_point_on_floor_plane(feet);
        if bounds.contains(on_floor) {
            inside.push((BodyHandle::new(slot), on_floor.y));
        }
    }

    inside.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));
    inside.into_iter().map(|(handle, _)| handle).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::fixtures::standing_skeleton;

    fn level_floor() -> FloorPlane {
        FloorPlane::from_clip_plane([0.0, 1.0, 0.0, 1.0])
    }

    #[test]
    fn test_central_body_picks_smallest_lateral_offset() {
        let skeletons = vec![
            standing_skeleton(0, 0.3, 2.0),
            standing_skeleton(1, -0.9, 2.0),
            standing_skeleton(2, 0.1, 2.0),
        ];
        let handle = central_body_index(&skeletons, &SelectionConfig::default());
        assert_eq!(handle, Some(BodyHandle::new(2)));
    }

    #[test]
    fn test_central_body_none_when_nothing_tracked() {
        let mut skeletons = vec![standing_skeleton(0, 0.0, 2.0)];
        skeletons[0].tracked = false;
        assert_eq!(
            central_body_index(&skeletons, &SelectionConfig::default()),
            None
        );
        assert_eq!(central_body_index(&[], &SelectionConfig::default()), None);
    }

    #[test]
    fn test_central_body_thresholds_are_strict() {
        // lateral offset exactly at the threshold does not qualify
        let at_limit = vec![standing_skeleton(0, 0.7, 2.0)];
        assert_eq!(
            central_body_index(&at_limit, &SelectionConfig::default()),
            None
        );
        // too far away does not qualify either
        let too_deep = vec![standing_skeleton(0, 0.1, 3.5)];
        assert_eq!(
            central_body_index(&too_deep, &SelectionConfig::default()),
            None
        );
    }

    #[test]
    fn test_central_body_tie_keeps_first_slot() {
        let skeletons = vec![
            standing_skeleton(0, 0.25, 2.0),
            standing_skeleton(1, -0.25, 2.0),
        ];
        assert_eq!(
            central_body_index(&skeletons, &SelectionConfig::default()),
            Some(BodyHandle::new(0))
        );
    }

    #[test]
    fn test_central_body_resolves_to_skeleton() {
        let skeletons = vec![
            standing_skeleton(0, 0.6, 2.0),
            standing_skeleton(1, 0.05, 2.0),
        ];
        let body = central_body(&skeletons, &SelectionConfig::default()).unwrap();
        assert_eq!(body.id, 1);
    }

    #[test]
    fn test_body_by_handle_accepts_slot_zero() {
        let skeletons = vec![standing_skeleton(0, 0.0, 2.0)];
        assert!(body_by_handle(&skeletons, BodyHandle::new(0)).is_some());
        assert!(body_by_handle(&skeletons, BodyHandle::new(1)).is_none());
    }

    #[test]
    fn test_tracked_bodies_preserves_order() {
        let mut skeletons = vec![
            standing_skeleton(0, 0.0, 2.0),
            standing_skeleton(1, 0.5, 2.0),
            standing_skeleton(2, 1.0, 2.0),
        ];
        skeletons[1].tracked = false;
        let ids: Vec<u8> = tracked_bodies(&skeletons).map(|s| s.id).collect();
        assert_eq!(ids, vec![0, 2]);
        assert_eq!(tracked_body_count(&skeletons), 2);
    }

    #[test]
    fn test_floor_bounds_orders_nearest_first() {
        let skeletons = vec![
            standing_skeleton(0, 0.0, 2.0),
            standing_skeleton(1, 0.5, 1.0),
            standing_skeleton(2, 5.0, 2.0),
        ];
        let bounds = Rect2::new(-1.0, 0.5, 2.0, 3.0);
        let hits = bodies_within_floor_bounds(&skeletons, &bounds, &level_floor());
        assert_eq!(hits, vec![BodyHandle::new(1), BodyHandle::new(0)]);
    }

    #[test]
    fn test_floor_bounds_skips_untracked_spine() {
        let mut skeletons = vec![standing_skeleton(0, 0.0, 2.0)];
        let mut spine = *skeletons[0].joints.get(JointKind::SpineBase).unwrap();
        spine.tracking_state = TrackingState::NotTracked;
        skeletons[0].joints.insert(JointKind::SpineBase, spine);

        let bounds = Rect2::new(-1.0, 0.5, 2.0, 3.0);
        assert!(bodies_within_floor_bounds(&skeletons, &bounds, &level_floor()).is_empty());
    }

    #[test]
    fn test_floor_bounds_requires_both_feet() {
        let mut skeleton = RawSkeleton::new(0);
        skeleton.tracked = true;
        let spine = *standing_skeleton(0, 0.0, 2.0)
            .joints
            .get(JointKind::SpineBase)
            .unwrap();
        skeleton.joints.insert(JointKind::SpineBase, spine);

        let bounds = Rect2::new(-1.0, 0.5, 2.0, 3.0);
        assert!(bodies_within_floor_bounds(&[skeleton], &bounds, &level_floor()).is_empty());
    }
}
