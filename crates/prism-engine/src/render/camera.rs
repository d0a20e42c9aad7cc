use glam::{Mat4, Vec3};

/// Radians of orbit per logical pixel of pointer drag.
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Pitch stays short of the poles so `look_at` keeps a valid up vector.
const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

const MIN_DISTANCE: f32 = 1.2;
const MAX_DISTANCE: f32 = 50.0;

/// Distance factor per wheel line.
const ZOOM_STEP: f32 = 0.9;

/// Perspective orbit camera.
///
/// Interactive input (`orbit`, `zoom`) is buffered and only applied by
/// [`update`](Self::update), which also recomputes the view matrix. The
/// projection matrix is recomputed by
/// [`update_projection_matrix`](Self::update_projection_matrix), which must be
/// called after [`set_aspect_ratio`](Self::set_aspect_ratio).
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    target: Vec3,
    up: Vec3,

    fovy: f32,
    aspect: f32,
    near: f32,
    far: f32,

    yaw: f32,
    pitch: f32,
    distance: f32,

    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,

    view: Mat4,
    projection: Mat4,
}

impl Camera {
    /// Creates a camera at `eye` looking at `target` with a 45° vertical FOV.
    pub fn new(eye: Vec3, target: Vec3) -> Self {
        let offset = eye - target;
        let distance = offset.length().max(f32::EPSILON);
        let yaw = offset.x.atan2(offset.z);
        let pitch = (offset.y / distance).clamp(-1.0, 1.0).asin().clamp(-MAX_PITCH, MAX_PITCH);

        let mut camera = Self {
            eye,
            target,
            up: Vec3::Y,
            fovy: 45f32.to_radians(),
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
            yaw,
            pitch,
            distance,
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.view = camera.compute_view();
        camera.update_projection_matrix();
        camera
    }

    /// Queues an orbit by a pointer drag delta (logical pixels).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.pending_yaw -= dx * ORBIT_SENSITIVITY;
        self.pending_pitch += dy * ORBIT_SENSITIVITY;
    }

    /// Queues a zoom by wheel lines; positive moves toward the target.
    pub fn zoom(&mut self, lines: f32) {
        self.pending_zoom += lines;
    }

    /// Advances interactive state by one tick and recomputes the view matrix.
    pub fn update(&mut self) {
        self.yaw += std::mem::take(&mut self.pending_yaw);
        self.pitch = (self.pitch + std::mem::take(&mut self.pending_pitch)).clamp(-MAX_PITCH, MAX_PITCH);

        let zoom = std::mem::take(&mut self.pending_zoom);
        if zoom != 0.0 {
            self.distance = (self.distance * ZOOM_STEP.powf(zoom)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        }

        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.eye = self.target + Vec3::new(cp * sy, sp, cp * cy) * self.distance;
        self.view = self.compute_view();
    }

    /// Sets the viewport aspect ratio (width / height).
    ///
    /// Non-finite or non-positive ratios (e.g. from a minimized window) are ignored.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Recomputes the projection matrix from FOV, aspect and clip planes.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fovy, self.aspect, self.near, self.far);
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    fn compute_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn camera() -> Camera {
        Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO)
    }

    #[test]
    fn update_without_input_keeps_eye() {
        let mut cam = camera();
        cam.update();
        assert_relative_eq!(cam.eye().x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(cam.eye().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(cam.eye().z, 5.0, epsilon = 1e-5);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let mut cam = camera();
        cam.orbit(120.0, -40.0);
        cam.update();
        let clip = cam.view_projection() * cam.target().extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn orbit_preserves_distance() {
        let mut cam = camera();
        cam.orbit(300.0, 150.0);
        cam.update();
        assert_relative_eq!(cam.eye().length(), 5.0, epsilon = 1e-4);
    }

    #[test]
    fn orbit_is_consumed_by_update() {
        let mut cam = camera();
        cam.orbit(100.0, 0.0);
        cam.update();
        let after_first = cam.eye();
        cam.update();
        assert_eq!(cam.eye(), after_first);
    }

    #[test]
    fn pitch_is_clamped_short_of_pole() {
        let mut cam = camera();
        cam.orbit(0.0, 100_000.0);
        cam.update();
        assert!(cam.eye().y < 5.0);
        assert!(cam.view().is_finite());
    }

    #[test]
    fn zoom_is_clamped() {
        let mut cam = camera();
        cam.zoom(1_000.0);
        cam.update();
        assert_relative_eq!(cam.eye().length(), MIN_DISTANCE, epsilon = 1e-4);
    }

    #[test]
    fn aspect_change_requires_projection_update() {
        let mut cam = camera();
        let before = cam.projection();
        cam.set_aspect_ratio(2.0);
        assert_eq!(cam.projection(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection(), before);
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = camera();
        cam.set_aspect_ratio(16.0 / 9.0);
        cam.set_aspect_ratio(0.0);
        cam.set_aspect_ratio(f32::NAN);
        assert_relative_eq!(cam.aspect(), 16.0 / 9.0);
    }
}
