// SPDX-License-Identifier: Apache-2.0
//! Winit-backed RenderPort implementation for the viewer.

use orrery_app_core::render_port::RenderPort;
use winit::window::Window;

/// Forwards redraw requests to the host window; one request schedules
/// one future frame callback.
#[derive(Clone)]
pub struct WinitRenderPort {
    win: &'static Window,
}

impl WinitRenderPort {
    pub fn new(win: &'static Window) -> Self {
        Self { win }
    }
}

impl RenderPort for WinitRenderPort {
    fn request_redraw(&self) {
        self.win.request_redraw();
    }
}
