//! Error types for mocap playback.

/// Errors surfaced by clip construction, sampling, and buffer synchronization.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlaybackError {
    /// Clip has no joints, or no frames to step through.
    #[error("animation has no joints or frames to play")]
    EmptyAnimation,

    /// A joint/frame pair outside the clip's bounds.
    #[error("sample out of range: joint {joint} frame {frame} (clip is {joint_count} joints x {frame_count} frames)")]
    OutOfRange {
        joint: usize,
        frame: usize,
        joint_count: usize,
        frame_count: usize,
    },

    /// Snapshot size disagrees with the instance region, either its
    /// declared capacity or the window its `replace` hands over.
    #[error("instance count mismatch: snapshot has {expected} joints but region holds {actual} instances")]
    InstanceCountMismatch { expected: usize, actual: usize },

    /// The host failed to acquire its instance region for writing.
    #[error("instance region acquisition failed: {reason}")]
    RegionAcquire { reason: String },
}
