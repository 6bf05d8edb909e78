//! mocap-viewer: instanced point-cloud playback of recorded mocap clips.
//!
//! Hosts the renderer-agnostic playback core in a winit/wgpu stage: a
//! fixed-rate timer drives playback ticks, a GPU instance buffer backs the
//! core's sync boundary, and an orbit camera frames the scene.

mod camera;
mod config;
mod gpu;
mod scene;
mod tick;

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use mocap_playback_core::{parse_mocap_json, Player, TickReport};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::camera::OrbitCamera;
use crate::config::ViewerConfig;
use crate::gpu::Renderer;
use crate::tick::TickTimer;

const USAGE: &str = "usage: mocap-viewer <clip.json> [--config <viewer.json>]";

/// Command line surface: the clip to play plus an optional config file.
#[derive(Debug, PartialEq, Eq)]
struct Args {
    clip: PathBuf,
    config: Option<PathBuf>,
}

impl Args {
    fn parse(mut raw: impl Iterator<Item = OsString>) -> Result<Self> {
        let mut clip = None;
        let mut config = None;
        while let Some(arg) = raw.next() {
            if arg == "--config" {
                let path = raw
                    .next()
                    .with_context(|| format!("--config expects a path\n{USAGE}"))?;
                config = Some(PathBuf::from(path));
            } else if clip.is_none() {
                clip = Some(PathBuf::from(arg));
            } else {
                bail!("unexpected argument {arg:?}\n{USAGE}");
            }
        }
        Ok(Self {
            clip: clip.with_context(|| format!("missing clip path\n{USAGE}"))?,
            config,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args_os().skip(1))?;
    let config = match &args.config {
        Some(path) => ViewerConfig::load(path)?,
        None => ViewerConfig::default(),
    };
    config.validate()?;

    let raw = fs::read_to_string(&args.clip)
        .with_context(|| format!("failed to read clip {}", args.clip.display()))?;
    let import = parse_mocap_json(&raw)
        .with_context(|| format!("failed to load clip {}", args.clip.display()))?;

    let rate = config.effective_frame_rate(import.frame_rate);
    log::info!(
        "loaded '{}': {} joints, {} frames, playing at {rate} fps",
        import.clip.name(),
        import.clip.joint_count(),
        import.clip.frame_count()
    );

    let title = format!("{} - {}", config.window.title, import.clip.name());
    let camera = OrbitCamera::from_config(&config.camera);
    let player = Player::new(import.clip).context("clip is not playable")?;

    let event_loop = EventLoop::new().context("failed to create the event loop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App {
        title,
        config,
        player,
        camera,
        timer: TickTimer::new(rate),
        window: None,
        renderer: None,
        presented: None,
        halted: false,
        dragging: false,
        cursor: None,
    };
    event_loop
        .run_app(&mut app)
        .context("event loop terminated abnormally")
}

/// Windowed host. Playback state lives in the core's [`Player`]; this
/// struct only adds the stage around it.
struct App {
    title: String,
    config: ViewerConfig,
    player: Player,
    camera: OrbitCamera,
    timer: TickTimer,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    /// Last successful tick; its instance count drives the draw call.
    presented: Option<TickReport>,
    /// Set when a tick fails. Ticking stops, the last good frame stays up.
    halted: bool,
    dragging: bool,
    cursor: Option<PhysicalPosition<f64>>,
}

impl App {
    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(
                self.config.window.width,
                self.config.window.height,
            ));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create the viewer window")?,
        );
        let renderer = pollster::block_on(Renderer::new(
            window.clone(),
            &self.config,
            self.player.clip().joint_count(),
        ))?;
        window.request_redraw();
        self.window = Some(window);
        self.renderer = Some(renderer);
        Ok(())
    }

    /// Run every playback tick the fixed-rate timer has accrued.
    fn step_playback(&mut self) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        if self.halted {
            return;
        }
        for _ in 0..self.timer.update() {
            let mut region = renderer.instance_region();
            match self.player.tick(&mut region) {
                Ok(report) => {
                    log::trace!("tick: frame {} ({} instances)", report.frame, report.instances);
                    self.presented = Some(report);
                }
                Err(err) => {
                    log::error!("playback halted: {err}");
                    self.halted = true;
                    break;
                }
            }
        }
    }

    fn draw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };
        let instances = self.presented.map_or(0, |report| report.instances as u32);
        match renderer.render(&self.camera, instances) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    renderer.resize(size.width, size.height);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("surface out of memory");
                event_loop.exit();
            }
            Err(err) => log::warn!("skipped a frame: {err:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.init_graphics(event_loop) {
            log::error!("failed to start the viewer: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.step_playback();
                self.draw(event_loop);
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.dragging = state == ElementState::Pressed;
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.dragging {
                    if let Some(prev) = self.cursor {
                        self.camera
                            .orbit((position.x - prev.x) as f32, (position.y - prev.y) as f32);
                    }
                }
                self.cursor = Some(position);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(position) => (position.y / 40.0) as f32,
                };
                self.camera.zoom(steps);
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
