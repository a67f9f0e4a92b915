// SPDX-License-Identifier: Apache-2.0
//! Application shell: wires the viewport controller into winit's
//! surface lifecycle.

use crate::viewport::Viewport;
use orrery_app_core::prefs::ViewerPrefs;
use orrery_scene::SceneDef;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

pub struct App {
    scene: SceneDef,
    prefs: ViewerPrefs,
    viewport: Option<Viewport>,
}

impl App {
    pub fn new(scene: SceneDef, prefs: ViewerPrefs) -> Self {
        Self {
            scene,
            prefs,
            viewport: None,
        }
    }

    fn teardown(&mut self, window_id: Option<WindowId>) {
        let Some(vp) = self.viewport.take() else {
            return;
        };
        match window_id {
            Some(id) if !vp.matches(id) => self.viewport = Some(vp),
            _ => vp.unmount(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // exactly one construction per teardown; a resume while mounted
        // is a duplicate notification
        if self.viewport.is_some() {
            return;
        }
        let [w, h] = self.prefs.window.inner_size;
        let attrs = Window::default_attributes()
            .with_title(self.prefs.window.title.as_str())
            .with_inner_size(LogicalSize::new(w, h))
            .with_visible(true);
        let window = match event_loop.create_window(attrs) {
            Ok(win) => win,
            Err(err) => {
                tracing::error!(%err, "window creation failed");
                event_loop.exit();
                return;
            }
        };
        // the surface borrows the window for 'static; the embedding
        // keeps the window alive for the rest of the process
        let window: &'static Window = Box::leak(Box::new(window));
        match Viewport::mount(Some(window), &self.scene, &self.prefs) {
            Ok(Some(vp)) => self.viewport = Some(vp),
            Ok(None) => {}
            Err(err) => {
                tracing::error!(error = %format!("{err:#}"), "viewport mount failed");
                event_loop.exit();
            }
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.teardown(None);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            self.teardown(Some(window_id));
            event_loop.exit();
            return;
        }
        let Some(vp) = self.viewport.as_mut() else {
            return;
        };
        if !vp.matches(window_id) {
            return;
        }
        match event {
            WindowEvent::Resized(size) => vp.resize(size),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => vp.rescale(scale_factor),
            WindowEvent::RedrawRequested => vp.frame(),
            other => vp.handle_input(&other),
        }
    }
}
