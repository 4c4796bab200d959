//! Orbit camera that always looks at the center of the cube.

use cgmath::{Angle, Deg, InnerSpace, Point2, Vector3};

use crate::Ray;

/// Default distance from the camera to the center of the cube.
pub const DEFAULT_CAMERA_DISTANCE: f32 = 5.0;
/// Default vertical field of view.
pub const DEFAULT_FOV: Deg<f32> = Deg(75.0);
/// Default elevation of the camera above the horizon, in radians.
pub const DEFAULT_PITCH: f32 = 0.5;
/// Default azimuth of the camera, in radians.
pub const DEFAULT_YAW: f32 = 0.5;

/// World-space directions of the screen axes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraBasis {
    /// Screen-right.
    pub right: Vector3<f32>,
    /// Screen-up.
    pub up: Vector3<f32>,
    /// Direction the camera looks in.
    pub forward: Vector3<f32>,
}

/// Perspective camera on a sphere around the origin, parametrized by two
/// angles.
///
/// The angles are unclamped. Dragging far enough vertically carries the
/// camera over the pole.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Elevation angle in radians. Positive is above the horizon.
    pub pitch: f32,
    /// Azimuth angle in radians, from +Z toward +X.
    pub yaw: f32,
    /// Radius of the sphere that the camera moves on.
    pub distance: f32,
    /// Vertical field of view.
    pub fov: Deg<f32>,

    /// Width and height of the viewport in pixels.
    target_size: [u32; 2],
}
impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV, DEFAULT_PITCH, DEFAULT_YAW)
    }
}
impl OrbitCamera {
    /// Constructs a camera with a 1x1 viewport.
    pub fn new(distance: f32, fov: Deg<f32>, pitch: f32, yaw: f32) -> Self {
        Self {
            pitch,
            yaw,
            distance,
            fov,
            target_size: [1, 1],
        }
    }

    /// Returns the viewport size in pixels.
    pub fn target_size(&self) -> [u32; 2] {
        self.target_size
    }
    /// Sets the viewport size in pixels. Returns `false` and leaves the
    /// camera unchanged if either dimension is zero.
    pub fn set_target_size(&mut self, target_size: [u32; 2]) -> bool {
        if target_size.contains(&0) {
            return false;
        }
        self.target_size = target_size;
        true
    }
    /// Returns the viewport's width divided by its height.
    pub fn aspect(&self) -> f32 {
        let [w, h] = self.target_size;
        w as f32 / h as f32
    }

    /// Orbits the camera by a pointer delta in pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.yaw += dx * sensitivity;
        self.pitch += dy * sensitivity;
    }

    /// Returns the position of the camera.
    pub fn eye(&self) -> Vector3<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vector3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch) * self.distance
    }

    /// Returns the screen axes in world space, for a camera at [`Self::eye()`]
    /// looking at the origin with +Y as the up hint.
    pub fn basis(&self) -> CameraBasis {
        let forward = -self.eye().normalize();
        let right = forward.cross(Vector3::unit_y());
        let right = if right.magnitude2() < 1e-12 {
            // Looking straight up or down
            let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
            Vector3::new(cos_yaw, 0.0, -sin_yaw)
        } else {
            right.normalize()
        };
        let up = right.cross(forward);
        CameraBasis { right, up, forward }
    }

    /// Returns the ray from the camera through a pixel of the viewport.
    /// `cursor` is measured from the top left corner, with Y pointing down.
    pub fn ray_through(&self, cursor: Point2<f32>) -> Ray {
        let [w, h] = self.target_size.map(|x| x as f32);
        let ndc_x = 2.0 * cursor.x / w - 1.0;
        let ndc_y = 1.0 - 2.0 * cursor.y / h;
        let tan_half_fov = (self.fov / 2.0).tan();

        let CameraBasis { right, up, forward } = self.basis();
        let direction = forward
            + right * (ndc_x * tan_half_fov * self.aspect())
            + up * (ndc_y * tan_half_fov);
        Ray::new(self.eye(), direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_approx(a: Vector3<f32>, b: Vector3<f32>) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn test_eye_stays_on_sphere() {
        let mut camera = OrbitCamera::default();
        for _ in 0..50 {
            camera.orbit(37.0, -23.0, 0.01);
            assert!((camera.eye().magnitude() - DEFAULT_CAMERA_DISTANCE).abs() < 1e-4);
        }
    }

    #[test]
    fn test_front_view_basis() {
        let camera = OrbitCamera::new(5.0, DEFAULT_FOV, 0.0, 0.0);
        assert_approx(camera.eye(), Vector3::new(0.0, 0.0, 5.0));
        let basis = camera.basis();
        assert_approx(basis.right, Vector3::unit_x());
        assert_approx(basis.up, Vector3::unit_y());
        assert_approx(basis.forward, -Vector3::unit_z());
    }

    #[test]
    fn test_side_view_basis() {
        let camera = OrbitCamera::new(5.0, DEFAULT_FOV, 0.0, std::f32::consts::FRAC_PI_2);
        let basis = camera.basis();
        assert_approx(basis.right, -Vector3::unit_z());
        assert_approx(basis.up, Vector3::unit_y());
    }

    #[test]
    fn test_basis_at_pole() {
        let camera = OrbitCamera::new(5.0, DEFAULT_FOV, std::f32::consts::FRAC_PI_2, 0.0);
        let basis = camera.basis();
        assert_approx(basis.right, Vector3::unit_x());
        assert!((basis.up.magnitude() - 1.0).abs() < 1e-5);
        assert!(basis.up.dot(basis.forward).abs() < 1e-5);
    }

    #[test]
    fn test_center_ray_hits_origin() {
        let mut camera = OrbitCamera::default();
        assert!(camera.set_target_size([800, 600]));
        assert!(!camera.set_target_size([0, 600]));
        assert_eq!(camera.target_size(), [800, 600]);

        let ray = camera.ray_through(Point2::new(400.0, 300.0));
        assert_approx(ray.at(DEFAULT_CAMERA_DISTANCE), Vector3::new(0.0, 0.0, 0.0));
    }
}
