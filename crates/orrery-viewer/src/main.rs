// SPDX-License-Identifier: Apache-2.0
//! orrery-viewer: native 3D node-graph viewport. Main wires the app
//! shell into winit and loads startup preferences.

use anyhow::Result;
use orrery_app_core::{config::ConfigService, prefs::ViewerPrefs};
use orrery_config_fs::FsConfigStore;
use orrery_scene::SceneDef;
use winit::event_loop::EventLoop;

mod app;
mod camera;
mod disposal;
mod frame_loop;
mod gpu;
mod input;
mod perf;
mod render;
mod render_port;
mod viewport;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();

    let prefs = load_prefs();
    let event_loop = EventLoop::new()?;
    let mut app = app::App::new(SceneDef::sample(), prefs);
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// Read startup preferences; any failure falls back to defaults so the
/// viewer always comes up.
fn load_prefs() -> ViewerPrefs {
    let service = match FsConfigStore::new() {
        Ok(store) => ConfigService::new(store),
        Err(err) => {
            tracing::warn!(%err, "config store unavailable, using defaults");
            return ViewerPrefs::default();
        }
    };
    match service.load::<ViewerPrefs>("viewer") {
        Ok(Some(prefs)) => prefs.sanitized(),
        Ok(None) => ViewerPrefs::default(),
        Err(err) => {
            tracing::warn!(%err, "could not read viewer prefs, using defaults");
            ViewerPrefs::default()
        }
    }
}
