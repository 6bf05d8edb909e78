//! Fixture registry for the workspace test suites.
//!
//! `fixtures/manifest.json` names every recorded clip checked into the
//! repository, along with the joint and frame counts each recording is
//! known to contain. Tests look clips up by name instead of hardcoding
//! paths, and can cross-check what an importer produced against the
//! manifest's counts.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Registry {
    clips: HashMap<String, ClipEntry>,
}

/// Manifest row for one recorded clip.
#[derive(Debug, Clone, Deserialize)]
pub struct ClipEntry {
    path: String,
    /// Joint count the recording is known to contain.
    pub joints: usize,
    /// Frame count the recording is known to contain.
    pub frames: usize,
}

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

pub mod clips {
    use super::*;

    /// Names of every clip in the manifest, in no particular order.
    pub fn names() -> Vec<String> {
        REGISTRY.clips.keys().cloned().collect()
    }

    /// The manifest row for `name`.
    pub fn entry(name: &str) -> Result<ClipEntry> {
        REGISTRY
            .clips
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("unknown clip fixture '{name}'"))
    }

    /// Absolute path of the named clip's file.
    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(fixtures_dir().join(&entry(name)?.path))
    }

    /// Raw JSON text of the named clip.
    pub fn json(name: &str) -> Result<String> {
        let path = path(name)?;
        fs::read_to_string(&path)
            .with_context(|| format!("failed to read clip fixture at {}", path.display()))
    }
}
