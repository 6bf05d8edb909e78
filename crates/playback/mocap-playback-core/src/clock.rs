//! Frame clock: the single piece of playback state.
//!
//! The clock owns the current frame index and the wrap rule; it never
//! reads wall time. Hosts decide when a tick happens, the clock only
//! answers "which frame" and "advance by one".

use crate::error::PlaybackError;

/// Wrapping frame counter over `0..frame_count`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameClock {
    frame: usize,
    frame_count: usize,
}

impl FrameClock {
    /// Create a clock positioned at frame 0.
    ///
    /// Fails with `EmptyAnimation` when `frame_count` is zero; a clock
    /// that exists always has a valid current frame.
    pub fn new(frame_count: usize) -> Result<Self, PlaybackError> {
        if frame_count == 0 {
            return Err(PlaybackError::EmptyAnimation);
        }
        Ok(Self {
            frame: 0,
            frame_count,
        })
    }

    /// Current frame, always in `0..frame_count`.
    #[inline]
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Step to the next frame, wrapping from the last frame back to 0.
    ///
    /// The wrap happens in the transition itself, so `frame_count` is
    /// never observable as a current frame. Returns the new frame.
    pub fn advance(&mut self) -> usize {
        self.frame = if self.frame == self.frame_count - 1 {
            0
        } else {
            self.frame + 1
        };
        self.frame
    }
}
