//! Frame sampling: clip + frame index -> per-joint position snapshot.

use crate::data::{MocapClip, Vec3};
use crate::error::PlaybackError;

/// All joint positions for one frame, in joint order.
///
/// Index `i` of `positions` is joint `i` of the source clip, which is the
/// ordering instance buffers are filled in as well.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub frame: usize,
    pub positions: Vec<Vec3>,
}

impl FrameSnapshot {
    /// Number of joints captured, which is the instance count a region
    /// must hold to accept this snapshot.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Sample every joint of `clip` at `frame` into a fresh snapshot.
pub fn sample(clip: &MocapClip, frame: usize) -> Result<FrameSnapshot, PlaybackError> {
    let mut snapshot = FrameSnapshot::default();
    sample_into(clip, frame, &mut snapshot)?;
    Ok(snapshot)
}

/// Sample into an existing snapshot, reusing its allocation.
///
/// Fails with `OutOfRange` when `frame` is outside the clip or a joint
/// track is too short to cover it; the snapshot contents are unspecified
/// after an error.
pub fn sample_into(
    clip: &MocapClip,
    frame: usize,
    out: &mut FrameSnapshot,
) -> Result<(), PlaybackError> {
    out.frame = frame;
    out.positions.clear();
    out.positions.reserve(clip.joint_count());
    for joint in 0..clip.joint_count() {
        out.positions.push(clip.position_at(joint, frame)?);
    }
    Ok(())
}
