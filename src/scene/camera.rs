//! Perspective camera
//!
//! The camera sits wherever the orbit controls put it and always looks at
//! the origin. Points are carried world -> view -> normalized device
//! coordinates; the canvas turns NDC into cells.

use crate::math::Vec3;

/// Near clip plane distance
pub const NEAR_PLANE: f64 = 0.1;
/// Far clip plane distance
pub const FAR_PLANE: f64 = 1000.0;

const WORLD_UP: Vec3 = Vec3 {
    x: 0.0,
    y: 1.0,
    z: 0.0,
};

/// Perspective projection parameters
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    fov_radians: f64,
    near: f64,
    far: f64,
}

impl Camera {
    pub fn new(fov_degrees: f64) -> Self {
        Camera {
            fov_radians: fov_degrees.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    /// Focal length for a unit image plane: 1 / tan(fov / 2)
    pub fn focal(&self) -> f64 {
        let half = self.fov_radians / 2.0;
        1.0 / half.tan()
    }

    pub fn near(&self) -> f64 {
        self.near
    }

    pub fn far(&self) -> f64 {
        self.far
    }

    /// Build the view basis for an eye position looking at a target
    pub fn view_from(&self, eye: Vec3, target: Vec3) -> ViewTransform {
        let forward = (target - eye).normalized();
        let right = forward.cross(WORLD_UP).normalized();
        let up = right.cross(forward);
        ViewTransform {
            eye,
            right,
            up,
            forward,
        }
    }

    /// Project a view-space point to NDC. `None` when the point falls
    /// outside the near/far planes. `aspect` is canvas width over height
    /// in world-proportional units.
    pub fn project(&self, v: Vec3, aspect: f64) -> Option<(f64, f64)> {
        if v.z < self.near || v.z > self.far {
            return None;
        }
        let focal = self.focal();
        Some((v.x / v.z * focal / aspect, v.y / v.z * focal))
    }
}

/// An orthonormal view basis
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    eye: Vec3,
    right: Vec3,
    up: Vec3,
    forward: Vec3,
}

impl ViewTransform {
    /// World point to view space: x right, y up, z depth along the gaze
    pub fn to_view(&self, p: Vec3) -> Vec3 {
        let q = p - self.eye;
        Vec3::new(q.dot(self.right), q.dot(self.up), q.dot(self.forward))
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn camera_on_z() -> (Camera, ViewTransform) {
        let camera = Camera::new(75.0);
        let view = camera.view_from(Vec3::new(0.0, 0.0, 70.0), Vec3::ZERO);
        (camera, view)
    }

    #[test]
    fn test_target_lands_on_axis() {
        let (_, view) = camera_on_z();
        let v = view.to_view(Vec3::ZERO);

        assert!(v.x.abs() < EPS);
        assert!(v.y.abs() < EPS);
        assert!((v.z - 70.0).abs() < EPS);
    }

    #[test]
    fn test_basis_orientation() {
        let (_, view) = camera_on_z();

        // +X world is screen right, +Y world is screen up
        let right = view.to_view(Vec3::new(1.0, 0.0, 69.0));
        assert!(right.x > 0.0);
        let above = view.to_view(Vec3::new(0.0, 1.0, 69.0));
        assert!(above.y > 0.0);
    }

    #[test]
    fn test_center_projects_to_origin() {
        let (camera, view) = camera_on_z();
        let (nx, ny) = camera.project(view.to_view(Vec3::ZERO), 1.0).unwrap();

        assert!(nx.abs() < EPS);
        assert!(ny.abs() < EPS);
    }

    #[test]
    fn test_nearer_points_project_larger() {
        let camera = Camera::new(75.0);
        let near = camera.project(Vec3::new(5.0, 0.0, 10.0), 1.0).unwrap();
        let far = camera.project(Vec3::new(5.0, 0.0, 20.0), 1.0).unwrap();

        assert!((near.0 - 2.0 * far.0).abs() < EPS);
    }

    #[test]
    fn test_clip_planes_cull() {
        let camera = Camera::new(75.0);

        assert!(camera.project(Vec3::new(0.0, 0.0, 0.05), 1.0).is_none());
        assert!(camera.project(Vec3::new(0.0, 0.0, -5.0), 1.0).is_none());
        assert!(camera.project(Vec3::new(0.0, 0.0, 1500.0), 1.0).is_none());
        assert!(camera.project(Vec3::new(0.0, 0.0, 500.0), 1.0).is_some());
    }

    #[test]
    fn test_wide_aspect_shrinks_x() {
        let camera = Camera::new(75.0);
        let square = camera.project(Vec3::new(5.0, 5.0, 10.0), 1.0).unwrap();
        let wide = camera.project(Vec3::new(5.0, 5.0, 10.0), 2.0).unwrap();

        assert!((wide.0 - square.0 / 2.0).abs() < EPS);
        assert!((wide.1 - square.1).abs() < EPS);
    }
}
