//! Orbit camera, per-view presets and animated view transitions

use cosmic_core::{Point3f, Ray, Vector3f};
use nalgebra::{Matrix4, Perspective3, Point3, Vector4};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Pitch stays this far from the poles so the up vector never degenerates
const POLE_MARGIN: f32 = 0.01;

/// Radians of orbit per pixel of drag at rotate speed 1
const ORBIT_RADIANS_PER_PIXEL: f32 = 0.01;

/// Starting pose and control limits of one view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraPreset {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub min_distance: f32,
    pub max_distance: f32,
    /// Fraction of the remaining motion applied per 60 Hz frame; 0 disables damping
    pub damping: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
}

impl CameraPreset {
    pub fn galaxy() -> Self {
        Self {
            eye: [0.0, 80.0, 200.0],
            target: [0.0, 0.0, 0.0],
            min_distance: 50.0,
            max_distance: 1000.0,
            damping: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
        }
    }

    pub fn solar() -> Self {
        Self {
            eye: [0.0, 30.0, 70.0],
            min_distance: 5.0,
            max_distance: 100.0,
            zoom_speed: 0.6,
            ..Self::galaxy()
        }
    }

    pub fn eye_point(&self) -> Point3f {
        Point3f::from(self.eye)
    }

    pub fn target_point(&self) -> Point3f {
        Point3f::from(self.target)
    }
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::galaxy()
    }
}

/// Camera orbiting a target point on a sphere of variable radius
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub target: Point3f,
    yaw: f32,
    pitch: f32,
    distance: f32,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_pan: Vector3f,
    preset: CameraPreset,
    /// Vertical field of view in radians
    pub fov_y: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,
}

impl OrbitCamera {
    pub fn new(preset: CameraPreset, fov_y: f32, aspect_ratio: f32) -> Self {
        let mut camera = Self {
            target: preset.target_point(),
            yaw: 0.0,
            pitch: 0.0,
            distance: 1.0,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_pan: Vector3f::zeros(),
            preset,
            fov_y,
            aspect_ratio,
            near: 0.1,
            far: 5000.0,
        };
        camera.reset();
        camera
    }

    pub fn preset(&self) -> &CameraPreset {
        &self.preset
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn eye(&self) -> Point3f {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target + Vector3f::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw) * self.distance
    }

    /// Place the camera at `eye` looking at `target`, ignoring distance limits
    pub fn look_at(&mut self, eye: Point3f, target: Point3f) {
        let offset = eye - target;
        self.target = target;
        self.distance = offset.norm().max(f32::EPSILON);
        self.yaw = offset.x.atan2(offset.z);
        self.pitch = (offset.y / self.distance).clamp(-1.0, 1.0).asin();
        self.clear_motion();
    }

    /// Return to the preset pose
    pub fn reset(&mut self) {
        let (eye, target) = (self.preset.eye_point(), self.preset.target_point());
        self.look_at(eye, target);
        self.distance = self.clamp_distance(self.distance);
    }

    /// Adopt another view's limits, keeping the current pose
    pub fn set_preset(&mut self, preset: CameraPreset) {
        self.preset = preset;
        self.clear_motion();
    }

    /// Orbit by a mouse drag of (`dx`, `dy`) pixels
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        let k = ORBIT_RADIANS_PER_PIXEL * self.preset.rotate_speed;
        self.pending_yaw -= dx * k;
        self.pending_pitch += dy * k;
    }

    /// Slide the target in the view plane by a drag of (`dx`, `dy`) pixels
    pub fn pan(&mut self, dx: f32, dy: f32) {
        let view = self.view_matrix();
        let right = Vector3f::new(view[(0, 0)], view[(0, 1)], view[(0, 2)]);
        let up = Vector3f::new(view[(1, 0)], view[(1, 1)], view[(1, 2)]);
        // Scale with distance so the point under the cursor roughly follows it
        let k = self.preset.pan_speed * self.distance * 0.001;
        self.pending_pan += (-right * dx + up * dy) * k;
    }

    /// Dolly toward the target for positive `steps` (wheel notches)
    pub fn zoom(&mut self, steps: f32) {
        let scale = 0.95f32.powf(steps * self.preset.zoom_speed);
        self.distance = self.clamp_distance(self.distance * scale);
    }

    /// Apply pending orbit and pan motion for a frame of `dt` seconds
    pub fn update(&mut self, dt: f32) {
        let fraction = if self.preset.damping > 0.0 {
            1.0 - (1.0 - self.preset.damping.min(1.0)).powf(dt * 60.0)
        } else {
            1.0
        };

        let yaw = self.pending_yaw * fraction;
        let pitch = self.pending_pitch * fraction;
        let pan = self.pending_pan * fraction;
        self.pending_yaw -= yaw;
        self.pending_pitch -= pitch;
        self.pending_pan -= pan;

        self.yaw += yaw;
        self.pitch = (self.pitch + pitch).clamp(-FRAC_PI_2 + POLE_MARGIN, FRAC_PI_2 - POLE_MARGIN);
        self.target += pan;
    }

    /// Get the view matrix
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye(), &self.target, &Vector3f::y())
    }

    /// Get the projection matrix
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let perspective = Perspective3::new(self.aspect_ratio, self.fov_y, self.near, self.far);
        perspective.into_inner()
    }

    /// Ray through pixel (`x`, `y`) of a `width`×`height` viewport
    pub fn screen_ray(&self, x: f32, y: f32, width: f32, height: f32) -> Ray {
        let ndc_x = 2.0 * x / width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / height;
        let eye = self.eye();

        let Some(inverse) = (self.projection_matrix() * self.view_matrix()).try_inverse() else {
            return Ray::new(eye, self.target - eye);
        };
        let far = inverse * Vector4::new(ndc_x, ndc_y, 1.0, 1.0);
        let far = Point3::from(far.xyz() / far.w);
        Ray::new(eye, far - eye)
    }

    /// Pixel position of `world`, or `None` when it is behind the camera or
    /// outside the view
    pub fn project(&self, world: &Point3f, width: f32, height: f32) -> Option<[f32; 2]> {
        let clip = self.projection_matrix() * self.view_matrix() * world.to_homogeneous();
        if clip.w <= self.near {
            return None;
        }
        let ndc = clip.xyz() / clip.w;
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || ndc.z > 1.0 {
            return None;
        }
        Some([(ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height])
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.preset.min_distance, self.preset.max_distance)
    }

    fn clear_motion(&mut self) {
        self.pending_yaw = 0.0;
        self.pending_pitch = 0.0;
        self.pending_pan = Vector3f::zeros();
    }
}

/// Eased move of eye and target between two poses
#[derive(Debug, Clone)]
pub struct CameraFlight {
    from_eye: Point3f,
    from_target: Point3f,
    to_eye: Point3f,
    to_target: Point3f,
    duration: f32,
    elapsed: f32,
}

impl CameraFlight {
    pub fn new(from: (Point3f, Point3f), to: (Point3f, Point3f), duration: f32) -> Self {
        Self {
            from_eye: from.0,
            from_target: from.1,
            to_eye: to.0,
            to_target: to.1,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance by `dt` seconds and return the (eye, target) pose
    pub fn advance(&mut self, dt: f32) -> (Point3f, Point3f) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
        let t = if self.duration > 0.0 {
            smoothstep(self.elapsed / self.duration)
        } else {
            1.0
        };
        (
            self.from_eye + (self.to_eye - self.from_eye) * t,
            self.from_target + (self.to_target - self.from_target) * t,
        )
    }
}

pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn galaxy_camera() -> OrbitCamera {
        OrbitCamera::new(CameraPreset::galaxy(), 60f32.to_radians(), 1.5)
    }

    #[test]
    fn test_starts_at_preset_eye() {
        let camera = galaxy_camera();
        let eye = camera.eye();
        assert_relative_eq!(eye.y, 80.0, epsilon = 1e-3);
        assert_relative_eq!(eye.z, 200.0, epsilon = 1e-3);
        assert_relative_eq!(eye.x, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_zoom_respects_limits() {
        let mut camera = galaxy_camera();
        camera.zoom(1000.0);
        assert_relative_eq!(camera.distance(), 50.0);
        camera.zoom(-1000.0);
        assert_relative_eq!(camera.distance(), 1000.0);

        let mut solar = OrbitCamera::new(CameraPreset::solar(), 1.0, 1.0);
        solar.zoom(1000.0);
        assert_relative_eq!(solar.distance(), 5.0);
    }

    #[test]
    fn test_damped_orbit_converges_to_full_motion() {
        let mut camera = galaxy_camera();
        let start = camera.yaw;
        camera.orbit(100.0, 0.0);

        camera.update(1.0 / 60.0);
        let first_step = camera.yaw - start;
        assert_relative_eq!(first_step, -0.05, epsilon = 1e-4);

        for _ in 0..2000 {
            camera.update(1.0 / 60.0);
        }
        assert_relative_eq!(camera.yaw - start, -1.0, epsilon = 1e-3);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = galaxy_camera();
        camera.set_preset(CameraPreset { damping: 0.0, ..CameraPreset::galaxy() });
        camera.orbit(0.0, 10_000.0);
        camera.update(0.016);
        assert!(camera.eye().y < camera.target.y + camera.distance());
        assert!(camera.pitch < FRAC_PI_2);
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = galaxy_camera();
        let ray = camera.screen_ray(400.0, 300.0, 800.0, 600.0);
        let to_target = (camera.target - camera.eye()).normalize();
        assert_relative_eq!(ray.direction.dot(&to_target), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_project_target_to_center() {
        let camera = galaxy_camera();
        let screen = camera.project(&camera.target, 800.0, 600.0).unwrap();
        assert_relative_eq!(screen[0], 400.0, epsilon = 0.5);
        assert_relative_eq!(screen[1], 300.0, epsilon = 0.5);

        let behind = camera.eye() + (camera.eye() - camera.target);
        assert!(camera.project(&behind, 800.0, 600.0).is_none());
    }

    #[test]
    fn test_flight_eases_between_poses() {
        let a = (Point3f::new(0.0, 80.0, 200.0), Point3f::origin());
        let b = (Point3f::new(0.0, 30.0, 70.0), Point3f::origin());
        let mut flight = CameraFlight::new(a, b, 2.0);

        let (eye, _) = flight.advance(1.0);
        assert_relative_eq!(eye.y, 55.0, epsilon = 1e-4);
        assert!(!flight.is_finished());

        let (eye, _) = flight.advance(5.0);
        assert_relative_eq!(eye.z, 70.0);
        assert!(flight.is_finished());
    }

    #[test]
    fn test_smoothstep_edges() {
        assert_eq!(smoothstep(-1.0), 0.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert_eq!(smoothstep(2.0), 1.0);
    }
}
