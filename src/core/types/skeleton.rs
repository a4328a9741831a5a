//! Skeleton, joint, and hand-state types reported by the sensor.

use serde::{Deserialize, Serialize};

use crate::core::types::{Quaternion, Vec3};

/// Body landmarks reported by the sensor, in sensor enumeration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(usize)]
pub enum JointKind {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointKind {
    /// Number of joint kinds
    pub const COUNT: usize = 25;

    /// All kinds in enumeration order
    pub const ALL: [JointKind; JointKind::COUNT] = [
        JointKind::SpineBase,
        JointKind::SpineMid,
        JointKind::Neck,
        JointKind::Head,
        JointKind::ShoulderLeft,
        JointKind::ElbowLeft,
        JointKind::WristLeft,
        JointKind::HandLeft,
        JointKind::ShoulderRight,
        JointKind::ElbowRight,
        JointKind::WristRight,
        JointKind::HandRight,
        JointKind::HipLeft,
        JointKind::KneeLeft,
        JointKind::AnkleLeft,
        JointKind::FootLeft,
        JointKind::HipRight,
        JointKind::KneeRight,
        JointKind::AnkleRight,
        JointKind::FootRight,
        JointKind::SpineShoulder,
        JointKind::HandTipLeft,
        JointKind::ThumbLeft,
        JointKind::HandTipRight,
        JointKind::ThumbRight,
    ];

    /// Slot index of this kind
    #[inline]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Kind at the given slot index, if in range
    #[inline]
    pub fn from_index(index: usize) -> Option<JointKind> {
        JointKind::ALL.get(index).copied()
    }
}

/// Per-joint confidence tier reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    /// The joint was not observed this frame
    NotTracked,
    /// Position was estimated, not measured
    Inferred,
    /// Position was measured directly
    Tracked,
}

impl Default for TrackingState {
    fn default() -> Self {
        TrackingState::NotTracked
    }
}

/// Hand gesture classification reported by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandState {
    Unknown,
    NotTracked,
    Open,
    Closed,
    Lasso,
}

impl Default for HandState {
    fn default() -> Self {
        HandState::Unknown
    }
}

/// Raw sensor measurement for one joint, immutable for the frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawJoint {
    /// Position in camera space, meters
    pub position: Vec3,
    /// Absolute joint orientation
    pub orientation: Quaternion,
    /// Measurement confidence
    pub tracking_state: TrackingState,
}

/// Fixed-capacity map from joint kind to per-joint data.
///
/// One slot per kind; iteration always runs in enumeration order
/// regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointMap<T> {
    slots: [Option<T>; JointKind::COUNT],
}

impl<T> JointMap<T> {
    /// Creates an empty map
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Value stored for a kind, if present
    #[inline]
    pub fn get(&self, kind: JointKind) -> Option<&T> {
        self.slots[kind.index()].as_ref()
    }

    /// Stores a value for a kind, returning the previous one
    #[inline]
    pub fn insert(&mut self, kind: JointKind, value: T) -> Option<T> {
        self.slots[kind.index()].replace(value)
    }

    /// True when the kind has a stored value
    #[inline]
    pub fn contains(&self, kind: JointKind) -> bool {
        self.slots[kind.index()].is_some()
    }

    /// Empties every slot
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    /// True when no slot is filled
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Stored entries in enumeration order
    pub fn iter(&self) -> impl Iterator<Item = (JointKind, &T)> + '_ {
        JointKind::ALL
            .iter()
            .filter_map(move |&kind| self.slots[kind.index()].as_ref().map(|v| (kind, v)))
    }
}

impl<T> Default for JointMap<T> {
    fn default() -> Self {
        JointMap::new()
    }
}

/// One tracked person's joint set for a single sensor frame.
///
/// Owned by the frame snapshot; the tracking core only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSkeleton {
    /// Sensor body slot id, 0..MAX_BODIES
    pub id: u8,
    /// Whether the sensor currently tracks this body
    pub tracked: bool,
    /// Raw joints keyed by kind
    pub joints: JointMap<RawJoint>,
    /// Left-hand gesture state
    pub left_hand_state: HandState,
    /// Right-hand gesture state
    pub right_hand_state: HandState,
}

impl RawSkeleton {
    /// Creates an untracked skeleton with no joints
    pub fn new(id: u8) -> Self {
        Self {
            id,
            tracked: false,
            joints: JointMap::new(),
            left_hand_state: HandState::default(),
            right_hand_state: HandState::default(),
        }
    }
}

/// Identity of a skeleton within one frame's list: its slot index.
///
/// A handle never owns the skeleton. It must be re-resolved against each
/// new frame, and resolution can fail once the slot stops tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Wraps a slot index
    #[inline]
    pub fn new(index: usize) -> Self {
        BodyHandle(index)
    }

    /// The wrapped slot index
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}
