//! Player: owns a clip and its clock, runs the per-tick pipeline.

use crate::clock::FrameClock;
use crate::data::MocapClip;
use crate::error::PlaybackError;
use crate::sampling::{sample_into, FrameSnapshot};
use crate::sync::{sync_snapshot, InstanceRegion};

/// What a completed tick presented: the frame index and how many
/// instances were written. `instances` is the count hosts pass to their
/// instanced draw call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub frame: usize,
    pub instances: usize,
}

/// Looping playback over a single clip.
///
/// Each `tick` samples the current frame, synchronizes it into the
/// host's instance region, then advances the clock. Tick 1 therefore
/// presents frame 0, and after the last frame playback wraps to 0.
#[derive(Debug)]
pub struct Player {
    clip: MocapClip,
    clock: FrameClock,
    snapshot: FrameSnapshot,
}

impl Player {
    /// Fails with `EmptyAnimation` when the clip has no frames.
    pub fn new(clip: MocapClip) -> Result<Self, PlaybackError> {
        let clock = FrameClock::new(clip.frame_count())?;
        Ok(Self {
            clip,
            clock,
            snapshot: FrameSnapshot::default(),
        })
    }

    pub fn clip(&self) -> &MocapClip {
        &self.clip
    }

    /// Frame the next tick will present.
    pub fn current_frame(&self) -> usize {
        self.clock.frame()
    }

    /// Run one playback step: sample, sync, advance.
    ///
    /// The clock only advances after a successful sync, so a failed tick
    /// leaves the player positioned to retry the same frame and the
    /// region holding the last fully presented one.
    pub fn tick(&mut self, region: &mut dyn InstanceRegion) -> Result<TickReport, PlaybackError> {
        let frame = self.clock.frame();
        sample_into(&self.clip, frame, &mut self.snapshot)?;
        sync_snapshot(&self.snapshot, region)?;
        self.clock.advance();
        Ok(TickReport {
            frame,
            instances: self.snapshot.len(),
        })
    }
}
