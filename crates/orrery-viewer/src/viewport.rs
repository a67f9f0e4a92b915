// SPDX-License-Identifier: Apache-2.0
//! The viewport controller: owns the scene GPU state, camera, orbit
//! controls, and frame loop for one host window, from mount to unmount.
//!
//! Everything allocated at mount is instance-owned; nothing is shared
//! across controller instances and nothing survives `unmount`, which
//! consumes the controller so teardown can only run once.

use crate::{
    camera::{Camera, OrbitControls},
    frame_loop::{FrameLoop, Ticket},
    gpu::Gpu,
    input::{self, PointerState},
    perf::PerfStats,
    render::{self, HelperFlags},
    render_port::WinitRenderPort,
};
use anyhow::Result;
use glam::Vec3;
use orrery_app_core::prefs::ViewerPrefs;
use orrery_app_core::render_port::RenderPort;
use orrery_scene::SceneDef;
use std::time::Instant;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::{Window, WindowId};

pub struct Viewport {
    window: &'static Window,
    render_port: WinitRenderPort,
    gpu: Gpu,
    camera: Camera,
    controls: OrbitControls,
    pointer: PointerState,
    frame_loop: FrameLoop,
    pending: Option<Ticket>,
    helpers: HelperFlags,
    perf: PerfStats,
    last_frame: Instant,
}

impl Viewport {
    /// Construct the full viewport for a host window and start the
    /// frame loop.
    ///
    /// A missing host is a silent no-op (`Ok(None)`): the embedding may
    /// deliver the availability notification before the surface is laid
    /// out, and the next notification retries. GPU acquisition failures
    /// propagate.
    pub fn mount(
        host: Option<&'static Window>,
        scene: &SceneDef,
        prefs: &ViewerPrefs,
    ) -> Result<Option<Self>> {
        let Some(window) = host else {
            return Ok(None);
        };

        let gpu = pollster::block_on(Gpu::new(window, scene, prefs.hud.vsync))?;
        let aspect = gpu.config.width as f32 / gpu.config.height as f32;
        let camera = Camera::new(prefs.camera.fov_y_degrees, aspect);
        let controls = OrbitControls::from_pose(Vec3::from_array(prefs.camera.eye), Vec3::ZERO);

        let mut frame_loop = FrameLoop::new();
        let render_port = WinitRenderPort::new(window);
        let pending = frame_loop.arm();
        render_port.request_redraw();

        tracing::debug!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            allocations = gpu.manifest.len(),
            width = gpu.config.width,
            height = gpu.config.height,
            "viewport mounted"
        );

        Ok(Some(Self {
            window,
            render_port,
            gpu,
            camera,
            controls,
            pointer: PointerState::default(),
            frame_loop,
            pending,
            helpers: HelperFlags {
                show_grid: prefs.hud.show_grid,
                show_axes: prefs.hud.show_axes,
            },
            perf: PerfStats::default(),
            last_frame: Instant::now(),
        }))
    }

    /// Whether this controller owns the given window.
    pub fn matches(&self, id: WindowId) -> bool {
        self.window.id() == id
    }

    /// Route a pointer event into the orbit controls.
    pub fn handle_input(&mut self, event: &WindowEvent) {
        input::handle_window_event(event, &mut self.pointer, &mut self.controls);
    }

    /// Host surface changed size: reconfigure the render buffer and
    /// recompute the camera aspect. Zero-area sizes are ignored.
    pub fn resize(&mut self, size: PhysicalSize<u32>) {
        if size.width == 0 || size.height == 0 {
            return;
        }
        self.gpu.resize(size);
        self.camera
            .set_aspect(self.gpu.config.width as f32 / self.gpu.config.height as f32);
        tracing::debug!(
            width = self.gpu.config.width,
            height = self.gpu.config.height,
            "viewport resized"
        );
    }

    /// Display pixel ratio changed (e.g. the window moved across
    /// monitors): re-clamp and resize.
    pub fn rescale(&mut self, scale_factor: f64) {
        self.gpu.rescale(scale_factor, self.window.inner_size());
        self.camera
            .set_aspect(self.gpu.config.width as f32 / self.gpu.config.height as f32);
    }

    /// One frame-loop tick: advance damping, render, reschedule.
    ///
    /// Renders nothing when the loop has been stopped or the callback's
    /// ticket went stale, so extra redraw callbacks after teardown are
    /// inert.
    pub fn frame(&mut self) {
        let Some(ticket) = self.pending.take() else {
            return;
        };
        if !self.frame_loop.fire(ticket) {
            return;
        }

        self.controls.update();
        let (eye, target) = self.controls.pose();
        let view_proj = self.camera.view_proj(eye, target);
        render::render_frame(&mut self.gpu, view_proj, self.helpers);

        self.perf.push(self.last_frame.elapsed().as_secs_f32() * 1000.0);
        self.last_frame = Instant::now();

        self.pending = self.frame_loop.arm();
        if self.pending.is_some() {
            self.render_port.request_redraw();
        }
    }

    /// Tear the viewport down: cancel the frame loop, release every
    /// scene allocation through the disposal manifest, then drop the
    /// surface and device. Consuming `self` makes a second teardown
    /// unrepresentable; the window itself belongs to the embedding.
    pub fn unmount(mut self) {
        debug_assert!(self.frame_loop.is_running());
        self.frame_loop.stop();
        self.pending = None;
        let avg_frame_ms = f64::from(self.perf.avg_frame_ms());
        let released = self.gpu.dispose();
        tracing::debug!(released, avg_frame_ms, "viewport unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_without_a_host_is_a_silent_no_op() {
        let mounted = Viewport::mount(None, &SceneDef::sample(), &ViewerPrefs::default())
            .expect("mount must not fail on a missing host");
        assert!(mounted.is_none());
    }
}
