// SPDX-License-Identifier: Apache-2.0
//! Input handling: map winit pointer events onto the orbit controls.
//!
//! Left drag orbits, right drag pans, the wheel zooms. Everything else
//! is ignored; there is no picking or editing surface.

use crate::camera::OrbitControls;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

/// Pointer button/position state between events.
#[derive(Default)]
pub struct PointerState {
    rotating: bool,
    panning: bool,
    cursor: Option<Vec2>,
}

pub fn handle_window_event(
    event: &WindowEvent,
    pointer: &mut PointerState,
    controls: &mut OrbitControls,
) {
    match event {
        WindowEvent::MouseInput { state, button, .. } => {
            let pressed = *state == ElementState::Pressed;
            match button {
                MouseButton::Left => pointer.rotating = pressed,
                MouseButton::Right => pointer.panning = pressed,
                _ => {}
            }
        }
        WindowEvent::CursorMoved { position, .. } => {
            let pos = Vec2::new(position.x as f32, position.y as f32);
            if let Some(prev) = pointer.cursor {
                let delta = pos - prev;
                if pointer.rotating {
                    controls.rotate(delta);
                } else if pointer.panning {
                    controls.pan(delta);
                }
            }
            pointer.cursor = Some(pos);
        }
        WindowEvent::CursorLeft { .. } => {
            pointer.cursor = None;
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let y: f32 = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y,
                MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
            };
            controls.zoom(1.0 - y * 0.05);
        }
        _ => {}
    }
}
