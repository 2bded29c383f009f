// Perspective camera looking down -Z at the hull.
//
// The camera only ever moves along Z (wheel zoom), so the view is a plain
// look-at toward the origin.

use super::constants::{CAMERA_FAR, CAMERA_FOVY_DEG, CAMERA_NEAR};
use glam::{Mat4, Vec2, Vec3, Vec4};

#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(distance: f32, aspect: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: sane_aspect(aspect),
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.eye = Vec3::new(0.0, 0.0, distance);
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = sane_aspect(width as f32 / height.max(1) as f32);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// World-space ray through a point in normalized device coordinates.
    ///
    /// Returns `(origin, direction)` with a unit-length direction.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far = far.truncate() / far.w;
        (self.eye, (far - self.eye).normalize())
    }
}

#[inline]
fn sane_aspect(aspect: f32) -> f32 {
    if aspect.is_finite() && aspect > 0.0 {
        aspect
    } else {
        1.0
    }
}
