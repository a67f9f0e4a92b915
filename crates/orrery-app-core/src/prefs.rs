// SPDX-License-Identifier: Apache-2.0
//! Startup preferences for the viewer (window, camera pose, HUD flags).
//!
//! Defaults reproduce the viewer's fixed constants; a config file can
//! override them. Values are sanitized before use so a hand-edited file
//! cannot put the camera into a degenerate pose.

use serde::{Deserialize, Serialize};

/// Startup preferences for a viewer surface.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ViewerPrefs {
    /// Host window settings.
    #[serde(default)]
    pub window: WindowPrefs,
    /// Initial camera pose and projection.
    #[serde(default)]
    pub camera: CameraPrefs,
    /// Helper visibility and presentation toggles.
    #[serde(default)]
    pub hud: HudPrefs,
}

/// Host window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowPrefs {
    /// Window title.
    pub title: String,
    /// Initial logical size [width, height].
    pub inner_size: [u32; 2],
}

impl Default for WindowPrefs {
    fn default() -> Self {
        Self {
            title: "Orrery".to_string(),
            inner_size: [1280, 720],
        }
    }
}

/// Initial camera pose and projection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraPrefs {
    /// World-space eye position; the camera always aims at the origin.
    pub eye: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
}

impl Default for CameraPrefs {
    fn default() -> Self {
        Self {
            eye: [3.0, 2.0, 5.0],
            fov_y_degrees: 60.0,
        }
    }
}

/// Helper visibility and presentation toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HudPrefs {
    /// Draw the ground grid.
    pub show_grid: bool,
    /// Draw the coordinate axes.
    pub show_axes: bool,
    /// Present with vsync.
    pub vsync: bool,
}

impl Default for HudPrefs {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_axes: true,
            vsync: true,
        }
    }
}

impl ViewerPrefs {
    /// Replace degenerate values with defaults and clamp the rest.
    pub fn sanitized(mut self) -> Self {
        let defaults = CameraPrefs::default();
        let eye_ok = self.camera.eye.iter().all(|c| c.is_finite())
            && self.camera.eye.iter().map(|c| c * c).sum::<f32>() > 0.01;
        if !eye_ok {
            self.camera.eye = defaults.eye;
        }
        if self.camera.fov_y_degrees.is_finite() {
            self.camera.fov_y_degrees = self.camera.fov_y_degrees.clamp(15.0, 120.0);
        } else {
            self.camera.fov_y_degrees = defaults.fov_y_degrees;
        }
        let [w, h] = self.window.inner_size;
        if w == 0 || h == 0 {
            self.window.inner_size = WindowPrefs::default().inner_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_fixed_pose() {
        let prefs = ViewerPrefs::default();
        assert_eq!(prefs.camera.eye, [3.0, 2.0, 5.0]);
        assert_eq!(prefs.camera.fov_y_degrees, 60.0);
        assert!(prefs.hud.show_grid && prefs.hud.show_axes);
    }

    #[test]
    fn sanitize_rejects_non_finite_eye() {
        let mut prefs = ViewerPrefs::default();
        prefs.camera.eye = [f32::NAN, 0.0, 0.0];
        assert_eq!(prefs.sanitized().camera.eye, [3.0, 2.0, 5.0]);
    }

    #[test]
    fn sanitize_rejects_eye_at_the_origin() {
        let mut prefs = ViewerPrefs::default();
        prefs.camera.eye = [0.0, 0.0, 0.0];
        assert_eq!(prefs.sanitized().camera.eye, [3.0, 2.0, 5.0]);
    }

    #[test]
    fn sanitize_clamps_fov() {
        let mut prefs = ViewerPrefs::default();
        prefs.camera.fov_y_degrees = 500.0;
        assert_eq!(prefs.sanitized().camera.fov_y_degrees, 120.0);
    }

    #[test]
    fn sanitize_restores_zero_window_size() {
        let mut prefs = ViewerPrefs::default();
        prefs.window.inner_size = [0, 720];
        assert_eq!(prefs.sanitized().window.inner_size, [1280, 720]);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let prefs: ViewerPrefs =
            serde_json::from_str(r#"{"hud":{"show_grid":false,"show_axes":true,"vsync":false}}"#)
                .expect("parse");
        assert!(!prefs.hud.show_grid);
        assert_eq!(prefs.camera.eye, [3.0, 2.0, 5.0]);
    }
}
