//! Canonical mocap clip data model.
//!
//! A clip is a set of named joints, each carrying one position per frame.
//! The playable frame count is derived once at construction from joint 0
//! and fixed for the clip's lifetime; per-joint lengths are not otherwise
//! reconciled here, so a short joint surfaces as `OutOfRange` at sample
//! time rather than as silent truncation. `import` applies the stricter
//! uniform-length rule when loading external files.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::error::PlaybackError;

/// A single joint position, serialized as `[x, y, z]`.
///
/// `Pod` so hosts can view instance data as raw bytes when uploading.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize, Pod, Zeroable)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Vec3 {
    fn from([x, y, z]: [f32; 3]) -> Self {
        Self { x, y, z }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(v: Vec3) -> Self {
        [v.x, v.y, v.z]
    }
}

/// One joint's position sequence, one entry per frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JointTrack {
    pub name: String,
    pub positions: Vec<Vec3>,
}

/// An immutable mocap clip: all joint tracks plus the derived frame count.
///
/// Constructed via [`MocapClip::from_joints`]; fields stay private so the
/// stored `frame_count` can be trusted by the clock and sampler.
#[derive(Clone, Debug, PartialEq)]
pub struct MocapClip {
    name: String,
    joints: Vec<JointTrack>,
    frame_count: usize,
}

impl MocapClip {
    /// Build a clip from joint tracks. The frame count comes from joint 0.
    ///
    /// Fails with `EmptyAnimation` when `joints` is empty. A clip whose
    /// joint 0 has no positions constructs with `frame_count == 0` and is
    /// rejected later by `FrameClock::new`.
    pub fn from_joints(name: impl Into<String>, joints: Vec<JointTrack>) -> Result<Self, PlaybackError> {
        let frame_count = match joints.first() {
            Some(first) => first.positions.len(),
            None => return Err(PlaybackError::EmptyAnimation),
        };
        Ok(Self {
            name: name.into(),
            joints,
            frame_count,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn joints(&self) -> &[JointTrack] {
        &self.joints
    }

    /// Number of joints, which is also the instance count a renderer must
    /// provision for this clip.
    #[inline]
    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    /// Playable frame count, fixed at construction from joint 0.
    #[inline]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Position of `joint` at `frame`, bounds-checked on both axes.
    ///
    /// Also fails for a frame that exists clip-wide but is missing from
    /// this particular joint (possible when tracks have uneven lengths).
    pub fn position_at(&self, joint: usize, frame: usize) -> Result<Vec3, PlaybackError> {
        let out_of_range = || PlaybackError::OutOfRange {
            joint,
            frame,
            joint_count: self.joints.len(),
            frame_count: self.frame_count,
        };
        if frame >= self.frame_count {
            return Err(out_of_range());
        }
        let track = self.joints.get(joint).ok_or_else(out_of_range)?;
        track.positions.get(frame).copied().ok_or_else(out_of_range)
    }
}
