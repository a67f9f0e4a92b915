// SPDX-License-Identifier: Apache-2.0
//! Camera math and orbit controls.

use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::PI;

/// Damping factor for inertial orbit rotation.
pub const DAMPING: f32 = 0.08;

/// Pitch limit just short of the poles, so the view basis never
/// degenerates against the world up vector.
pub const MAX_PITCH: f32 = PI * 0.5 - 0.01;

const ROTATE_SPEED: f32 = 0.005;
const PAN_SPEED: f32 = 0.002;
const MIN_DISTANCE: f32 = 0.5;
const MAX_DISTANCE: f32 = 100.0;

/// Perspective projection state.
#[derive(Clone, Copy, Debug)]
pub struct Camera {
    /// Vertical field of view, radians.
    pub fov_y: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
    /// Render-extent width / height.
    pub aspect: f32,
}

impl Camera {
    /// A camera with the viewer's fixed clip planes.
    pub fn new(fov_y_degrees: f32, aspect: f32) -> Self {
        Self {
            fov_y: fov_y_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            aspect,
        }
    }

    /// Recompute the projection for a new surface aspect ratio.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Combined view-projection for an eye looking at `target`.
    pub fn view_proj(&self, eye: Vec3, target: Vec3) -> Mat4 {
        let view = Mat4::look_at_rh(eye, target, Vec3::Y);
        let proj = Mat4::perspective_rh(self.fov_y, self.aspect.max(1e-3), self.near, self.far);
        proj * view
    }
}

/// Damped orbit/pan/zoom state around a target point.
///
/// Rotation input accumulates into pending deltas; each [`update`]
/// applies `pending * DAMPING` and decays the remainder, so a drag
/// coasts to rest instead of stopping dead. Panning displaces the
/// target along the camera's right axis and the horizontal `up x right`
/// vector (no screen-space panning); zooming scales the orbit distance.
///
/// [`update`]: OrbitControls::update
#[derive(Clone, Copy, Debug)]
pub struct OrbitControls {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    damping: f32,
}

impl OrbitControls {
    /// Controls seeded from an eye position and target.
    pub fn from_pose(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().clamp(MIN_DISTANCE, MAX_DISTANCE);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin();
        let yaw = offset.x.atan2(offset.z);
        Self {
            target,
            yaw,
            pitch: pitch.clamp(-MAX_PITCH, MAX_PITCH),
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            damping: DAMPING,
        }
    }

    /// Accumulate an orbit drag, in surface pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        self.pending_yaw -= delta.x * ROTATE_SPEED;
        self.pending_pitch -= delta.y * ROTATE_SPEED;
    }

    /// Pan the target within the camera's horizontal plane.
    pub fn pan(&mut self, delta: Vec2) {
        let right = Vec3::new(self.yaw.cos(), 0.0, -self.yaw.sin());
        let screen_up = Vec3::Y.cross(right);
        let scale = PAN_SPEED * self.distance;
        self.target -= right * (delta.x * scale);
        self.target += screen_up * (delta.y * scale);
    }

    /// Scale the orbit distance; the factor is clamped into range.
    pub fn zoom(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 {
            self.distance = (self.distance * scale).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }
    }

    /// Advance the damping integration one tick.
    pub fn update(&mut self) {
        self.yaw += self.pending_yaw * self.damping;
        self.pitch = (self.pitch + self.pending_pitch * self.damping).clamp(-MAX_PITCH, MAX_PITCH);
        let decay = 1.0 - self.damping;
        self.pending_yaw *= decay;
        self.pending_pitch *= decay;
        if self.pending_yaw.abs() < 1e-6 {
            self.pending_yaw = 0.0;
        }
        if self.pending_pitch.abs() < 1e-6 {
            self.pending_pitch = 0.0;
        }
    }

    /// Current eye position and target.
    pub fn pose(&self) -> (Vec3, Vec3) {
        let offset = Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        ) * self.distance;
        (self.target + offset, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pose_round_trips_through_orbit_angles() {
        let controls = OrbitControls::from_pose(Vec3::new(3.0, 2.0, 5.0), Vec3::ZERO);
        let (eye, target) = controls.pose();
        assert_relative_eq!(eye.x, 3.0, epsilon = 1e-4);
        assert_relative_eq!(eye.y, 2.0, epsilon = 1e-4);
        assert_relative_eq!(eye.z, 5.0, epsilon = 1e-4);
        assert_eq!(target, Vec3::ZERO);
    }

    #[test]
    fn damped_rotation_eventually_applies_the_full_delta() {
        let mut controls = OrbitControls::from_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let (start_yaw, _) = (controls.yaw, controls.pitch);
        controls.rotate(Vec2::new(100.0, 0.0));
        for _ in 0..500 {
            controls.update();
        }
        // the geometric series of damped steps sums to the whole input
        assert_relative_eq!(controls.yaw, start_yaw - 100.0 * 0.005, epsilon = 1e-3);
        assert_eq!(controls.pending_yaw, 0.0);
    }

    #[test]
    fn single_update_applies_the_damping_fraction() {
        let mut controls = OrbitControls::from_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        let start_yaw = controls.yaw;
        controls.rotate(Vec2::new(10.0, 0.0));
        controls.update();
        assert_relative_eq!(
            controls.yaw,
            start_yaw - 10.0 * 0.005 * DAMPING,
            epsilon = 1e-6
        );
    }

    #[test]
    fn pitch_is_clamped_short_of_the_poles() {
        let mut controls = OrbitControls::from_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        controls.rotate(Vec2::new(0.0, -1e6));
        for _ in 0..1000 {
            controls.update();
        }
        assert!(controls.pitch <= MAX_PITCH);
        let (eye, _) = controls.pose();
        assert!(eye.is_finite());
    }

    #[test]
    fn pan_stays_in_the_horizontal_plane() {
        let mut controls = OrbitControls::from_pose(Vec3::new(3.0, 2.0, 5.0), Vec3::ZERO);
        controls.pan(Vec2::new(40.0, -25.0));
        let (_, target) = controls.pose();
        assert_eq!(target.y, 0.0);
        assert!(target.length() > 0.0);
    }

    #[test]
    fn zoom_clamps_the_distance_range() {
        let mut controls = OrbitControls::from_pose(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO);
        controls.zoom(1e-9);
        assert_relative_eq!(controls.distance, MIN_DISTANCE);
        controls.zoom(1e9);
        assert_relative_eq!(controls.distance, MAX_DISTANCE);
        controls.zoom(f32::NAN);
        assert_relative_eq!(controls.distance, MAX_DISTANCE);
    }

    #[test]
    fn aspect_update_is_exact() {
        let mut camera = Camera::new(60.0, 4.0 / 3.0);
        camera.set_aspect(1920.0 / 1080.0);
        assert_eq!(camera.aspect, 1920.0 / 1080.0);
        let vp = camera.view_proj(Vec3::new(3.0, 2.0, 5.0), Vec3::ZERO);
        assert!(vp.is_finite());
    }
}
