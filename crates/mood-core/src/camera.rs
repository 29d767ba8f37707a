//! Camera for the GPU backend.

use glam::{Mat4, Vec3};

/// Simple right-handed camera description with perspective projection.
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
    /// Camera for a mood's configured base position, looking at the origin.
    pub fn for_base(base_eye: Vec3, aspect: f32) -> Self {
        Self {
            eye: base_eye,
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: 75.0_f32.to_radians(),
            znear: 0.1,
            zfar: 1000.0,
        }
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

    /// Slow orbit around the mood's base position, looking at the origin.
    pub fn orbit(&mut self, base_eye: Vec3, time_sec: f32) {
        self.eye = Vec3::new(
            base_eye.x + (time_sec * 0.3).sin() * 1.5,
            base_eye.y + (time_sec * 0.2).cos() * 1.0,
            base_eye.z,
        );
        self.target = Vec3::ZERO;
    }
}
