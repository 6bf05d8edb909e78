//! Viewer configuration.
//!
//! Every knob has a default matching the reference stage: a 1280x720
//! window, a 2000x2000 floor grid with 100-unit spacing, radius-5 joint
//! spheres, and a camera at (100, 100, 10) looking at the origin.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;

/// Playback rate used when neither the config nor the clip names one.
pub const DEFAULT_FRAME_RATE: f32 = 12.0;

/// Band of accepted playback rates. Candidates outside it are skipped;
/// the bounds keep the tick period nonzero and representable.
pub const MIN_FRAME_RATE: f32 = 0.001;
pub const MAX_FRAME_RATE: f32 = 1000.0;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub window: WindowConfig,
    /// Overrides the clip's recorded rate when set.
    #[serde(default)]
    pub frame_rate: Option<f32>,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub sphere: SphereConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,
    #[serde(default = "default_window_height")]
    pub height: u32,
    #[serde(default = "default_window_title")]
    pub title: String,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_camera_eye")]
    pub eye: [f32; 3],
    #[serde(default = "default_camera_target")]
    pub target: [f32; 3],
    #[serde(default = "default_camera_fovy")]
    pub fovy_degrees: f32,
    #[serde(default = "default_camera_znear")]
    pub znear: f32,
    #[serde(default = "default_camera_zfar")]
    pub zfar: f32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct GridConfig {
    /// Full extent of the floor along x and z.
    #[serde(default = "default_grid_extent")]
    pub extent: u32,
    #[serde(default = "default_grid_spacing")]
    pub spacing: u32,
}

#[derive(Clone, Copy, Debug, Deserialize)]
pub struct SphereConfig {
    #[serde(default = "default_sphere_radius")]
    pub radius: f32,
    #[serde(default = "default_sphere_subdivisions")]
    pub subdivisions: u32,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config at {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))
    }

    /// Playback rate, in precedence order: config, clip, default.
    /// Candidates outside the accepted band are skipped.
    pub fn effective_frame_rate(&self, clip_rate: Option<f32>) -> f32 {
        self.frame_rate
            .into_iter()
            .chain(clip_rate)
            .find(|r| (MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(r))
            .unwrap_or(DEFAULT_FRAME_RATE)
    }

    /// Rejects values that would produce degenerate geometry or projection.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            bail!("window size must be at least 1x1");
        }
        if self.grid.spacing == 0 || self.grid.spacing > self.grid.extent {
            bail!("grid spacing must be between 1 and the grid extent");
        }
        if self.sphere.subdivisions < 3 {
            bail!("sphere subdivisions must be at least 3");
        }
        if !self.sphere.radius.is_finite() || self.sphere.radius <= 0.0 {
            bail!("sphere radius must be positive");
        }
        if !(self.camera.fovy_degrees > 0.0 && self.camera.fovy_degrees < 180.0) {
            bail!("camera fov must be strictly between 0 and 180 degrees");
        }
        if !(self.camera.znear > 0.0 && self.camera.zfar > self.camera.znear) {
            bail!("camera clip planes must satisfy 0 < znear < zfar");
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: default_camera_eye(),
            target: default_camera_target(),
            fovy_degrees: default_camera_fovy(),
            znear: default_camera_znear(),
            zfar: default_camera_zfar(),
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            extent: default_grid_extent(),
            spacing: default_grid_spacing(),
        }
    }
}

impl Default for SphereConfig {
    fn default() -> Self {
        Self {
            radius: default_sphere_radius(),
            subdivisions: default_sphere_subdivisions(),
        }
    }
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

fn default_window_title() -> String {
    "Mocap Viewer".to_string()
}

fn default_camera_eye() -> [f32; 3] {
    [100.0, 100.0, 10.0]
}

fn default_camera_target() -> [f32; 3] {
    [0.0, 0.0, 0.0]
}

fn default_camera_fovy() -> f32 {
    35.0
}

fn default_camera_znear() -> f32 {
    0.1
}

fn default_camera_zfar() -> f32 {
    5000.0
}

fn default_grid_extent() -> u32 {
    2000
}

fn default_grid_spacing() -> u32 {
    100
}

fn default_sphere_radius() -> f32 {
    5.0
}

fn default_sphere_subdivisions() -> u32 {
    21
}
