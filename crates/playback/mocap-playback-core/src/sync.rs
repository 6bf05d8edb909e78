//! Instance buffer synchronization.
//!
//! The core never talks to a GPU. Hosts implement [`InstanceRegion`] over
//! whatever per-instance storage their renderer draws from, and
//! [`sync_snapshot`] pushes a sampled frame through that boundary as one
//! whole-buffer replace. A renderer that draws only between `replace`
//! calls therefore never observes a partially written frame.

use crate::data::Vec3;
use crate::error::PlaybackError;
use crate::sampling::FrameSnapshot;

/// Writable per-instance position storage owned by a host renderer.
///
/// `replace` is a scoped acquisition: the host maps (or otherwise locks)
/// its storage, hands the full window to `write`, and releases when the
/// call returns, on error paths included. The slice passed to `write`
/// must cover exactly `instance_capacity()` positions, and its previous
/// contents must not be assumed to survive, callers overwrite the whole
/// window.
pub trait InstanceRegion {
    /// Number of instance slots this region holds.
    fn instance_capacity(&self) -> usize;

    /// Acquire the region, let `write` fill it, release it.
    ///
    /// Fails with `RegionAcquire` when the backing storage cannot be
    /// mapped for writing.
    fn replace(
        &mut self,
        write: &mut dyn FnMut(&mut [Vec3]),
    ) -> Result<(), PlaybackError>;
}

/// Copy a sampled frame into an instance region.
///
/// The count check runs before the region is acquired: on
/// `InstanceCountMismatch` the region has not been mapped and its
/// contents are untouched. The handed window is checked again against
/// the snapshot, so a host whose `replace` delivers a wrong-length
/// slice gets the same error back instead of a panic; such a window is
/// left unwritten.
pub fn sync_snapshot(
    snapshot: &FrameSnapshot,
    region: &mut dyn InstanceRegion,
) -> Result<(), PlaybackError> {
    let expected = snapshot.len();
    let actual = region.instance_capacity();
    if expected != actual {
        return Err(PlaybackError::InstanceCountMismatch { expected, actual });
    }
    let mut written = 0;
    region.replace(&mut |window| {
        written = window.len();
        if written == expected {
            window.copy_from_slice(&snapshot.positions);
        }
    })?;
    if written != expected {
        return Err(PlaybackError::InstanceCountMismatch {
            expected,
            actual: written,
        });
    }
    Ok(())
}

/// Plain in-memory region, the reference host for tests and benches.
#[derive(Clone, Debug)]
pub struct CpuInstanceRegion {
    positions: Vec<Vec3>,
    generation: u64,
}

impl CpuInstanceRegion {
    pub fn new(capacity: usize) -> Self {
        Self {
            positions: vec![Vec3::ZERO; capacity],
            generation: 0,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Completed replace count; bumps once per successful `replace`, so a
    /// reader can tell full frames apart without inspecting positions.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl InstanceRegion for CpuInstanceRegion {
    fn instance_capacity(&self) -> usize {
        self.positions.len()
    }

    fn replace(
        &mut self,
        write: &mut dyn FnMut(&mut [Vec3]),
    ) -> Result<(), PlaybackError> {
        write(&mut self.positions);
        self.generation += 1;
        Ok(())
    }
}
