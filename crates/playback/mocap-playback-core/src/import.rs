//! Mocap JSON import.
//!
//! Parses recorder output of the shape
//! `{ "name", "frameRate", "joints": [{ "name", "positions": [[x,y,z], ..] }] }`
//! into a validated [`MocapClip`]. Import is stricter than clip
//! construction: every joint must carry the same number of frames, so a
//! truncated recording fails here instead of mid-playback.

use serde::Deserialize;

use crate::data::{JointTrack, MocapClip};

/// Errors raised while loading a mocap file.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ImportError {
    #[error("malformed mocap JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("mocap clip has no joints")]
    NoJoints,

    #[error("joint '{joint}' has no frames")]
    NoFrames { joint: String },

    #[error("joint '{joint}' has {actual} frames, expected {expected}")]
    UnevenFrameCounts {
        joint: String,
        expected: usize,
        actual: usize,
    },
}

/// A successfully imported clip plus metadata the recorder wrote next to
/// the joint data. `frame_rate` is advisory; playback hosts may use it or
/// substitute their own rate.
#[derive(Debug)]
pub struct MocapImport {
    pub clip: MocapClip,
    pub frame_rate: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ClipFile {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "frameRate", default)]
    frame_rate: Option<f32>,
    joints: Vec<JointTrack>,
}

/// Parse and validate mocap JSON.
pub fn parse_mocap_json(s: &str) -> Result<MocapImport, ImportError> {
    let file: ClipFile = serde_json::from_str(s)?;

    let expected = match file.joints.first() {
        Some(first) => first.positions.len(),
        None => return Err(ImportError::NoJoints),
    };
    if expected == 0 {
        return Err(ImportError::NoFrames {
            joint: file.joints[0].name.clone(),
        });
    }
    for joint in &file.joints {
        if joint.positions.len() != expected {
            return Err(ImportError::UnevenFrameCounts {
                joint: joint.name.clone(),
                expected,
                actual: joint.positions.len(),
            });
        }
    }

    let name = file.name.unwrap_or_else(|| "untitled".to_string());
    // joints verified non-empty above
    let clip = MocapClip::from_joints(name, file.joints).map_err(|_| ImportError::NoJoints)?;
    Ok(MocapImport {
        clip,
        frame_rate: file.frame_rate,
    })
}
