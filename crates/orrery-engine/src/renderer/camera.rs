use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3, Vec4};
use crate::systems::pick::Ray;

/// Perspective camera looking at a target point.
/// Produces GL-convention matrices (clip z in -1..1) so the host can hand
/// them to three.js unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_y_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    pub up: Vec3,
}

/// GPU-side uniform data for the camera.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y_deg,
            aspect,
            near,
            far,
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Move the camera and re-aim it.
    pub fn look_from(&mut self, position: Vec3, target: Vec3) {
        self.position = position;
        self.target = target;
    }

    /// Update aspect on viewport resize. Degenerate sizes are ignored.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Looking straight along `up` degenerates look_at; nudge the target.
        let forward = self.target - self.position;
        let target = if forward.cross(self.up).length_squared() < 1e-12 {
            self.target + Vec3::new(0.0, 0.0, -1e-3)
        } else {
            self.target
        };
        Mat4::look_at_rh(self.position, target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Picking ray from the camera through a point in normalized device
    /// coordinates (-1..1, +y up).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let near = inverse * Vec4::new(ndc.x, ndc.y, -1.0, 1.0);
        let far = inverse * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        Ray::new(self.position, far - near)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            position: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 10000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 4.0 / 3.0, 0.1, 10000.0);
        cam.look_from(Vec3::new(0.0, 30.0, 500.0), Vec3::ZERO);
        cam
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        let expected = (Vec3::ZERO - cam.position).normalize();
        assert!((ray.direction - expected).length() < 1e-4);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn target_projects_to_center() {
        let cam = camera();
        let clip = cam.view_projection() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn right_edge_ray_leans_right() {
        let cam = camera();
        let ray = cam.ray_from_ndc(Vec2::new(1.0, 0.0));
        assert!(ray.direction.x > 0.0);
    }

    #[test]
    fn top_down_view_is_finite() {
        let mut cam = camera();
        cam.look_from(Vec3::new(0.0, 900.0, 0.0), Vec3::ZERO);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn resize_ignores_zero_height() {
        let mut cam = camera();
        cam.resize(800.0, 0.0);
        assert!((cam.aspect - 4.0 / 3.0).abs() < 1e-6);
        cam.resize(1000.0, 500.0);
        assert_eq!(cam.aspect, 2.0);
    }
}
