//! Mocap playback core (renderer-agnostic)
//!
//! Frame-stepped playback of recorded motion capture: a clip of per-joint
//! position tracks, a wrapping frame clock, a per-frame sampler, and a
//! synchronizer that pushes sampled frames into a host renderer's
//! per-instance storage through the [`sync::InstanceRegion`] boundary.
//! Hosts drive [`player::Player::tick`] at their chosen rate and draw one
//! instance per joint from whatever the region last presented.

pub mod clock;
pub mod data;
pub mod error;
pub mod import;
pub mod player;
pub mod sampling;
pub mod sync;

// Re-exports for consumers (hosts)
pub use clock::FrameClock;
pub use data::{JointTrack, MocapClip, Vec3};
pub use error::PlaybackError;
pub use import::{parse_mocap_json, ImportError, MocapImport};
pub use player::{Player, TickReport};
pub use sampling::{sample, sample_into, FrameSnapshot};
pub use sync::{sync_snapshot, CpuInstanceRegion, InstanceRegion};
