//! Orbit camera.
//!
//! Spherical coordinates around a target point: dragging orbits, the
//! wheel dollies. Projection math uses nalgebra with a final remap of
//! the clip-space depth range from OpenGL's [-1, 1] to wgpu's [0, 1].

use bytemuck::{Pod, Zeroable};
use nalgebra::{Matrix4, Perspective3, Point3, Vector3};

use crate::config::CameraConfig;

const MIN_PITCH: f32 = -1.55;
const MAX_PITCH: f32 = 1.55;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 4000.0;

/// Depth remap applied after the perspective transform.
#[rustfmt::skip]
fn opengl_to_wgpu() -> Matrix4<f32> {
    Matrix4::new(
        1.0, 0.0, 0.0, 0.0,
        0.0, 1.0, 0.0, 0.0,
        0.0, 0.0, 0.5, 0.5,
        0.0, 0.0, 0.0, 1.0,
    )
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

pub struct OrbitCamera {
    target: Point3<f32>,
    distance: f32,
    yaw: f32,
    pitch: f32,
    fovy: f32,
    znear: f32,
    zfar: f32,
}

impl OrbitCamera {
    pub fn from_config(cfg: &CameraConfig) -> Self {
        let eye = Point3::from(cfg.eye);
        let target = Point3::from(cfg.target);
        let offset = eye - target;
        let distance = offset.norm().max(MIN_DISTANCE);
        Self {
            target,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            fovy: cfg.fovy_degrees.to_radians(),
            znear: cfg.znear,
            zfar: cfg.zfar,
        }
    }

    pub fn eye(&self) -> Point3<f32> {
        let dir = Vector3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.target + dir * self.distance
    }

    /// Rotate around the target from a cursor delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        const SENSITIVITY: f32 = 0.005;
        self.yaw -= dx * SENSITIVITY;
        self.pitch = (self.pitch + dy * SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Dolly toward/away from the target; positive steps move closer.
    pub fn zoom(&mut self, steps: f32) {
        self.distance = (self.distance * 0.9f32.powf(steps)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    pub fn view_proj(&self, aspect: f32) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(&self.eye(), &self.target, &Vector3::y());
        let proj = Perspective3::new(aspect, self.fovy, self.znear, self.zfar);
        opengl_to_wgpu() * proj.to_homogeneous() * view
    }

    pub fn uniform(&self, aspect: f32) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj(aspect).into(),
        }
    }
}
