//! Ray casting against piece boxes.

use cgmath::{InnerSpace, Matrix, Vector3};
use float_ord::FloatOrd;

use crate::{Lattice, PIECE_SIZE, PieceId, Pose};

/// Half-line in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vector3<f32>,
    /// Unit direction of the ray.
    pub direction: Vector3<f32>,
}
impl Ray {
    /// Constructs a ray, normalizing `direction`.
    pub fn new(origin: Vector3<f32>, direction: Vector3<f32>) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vector3<f32> {
        self.origin + self.direction * t
    }

    /// Returns the distance along the ray to where it first enters a cube
    /// with edge length `size` placed at `pose`, or `None` if it misses.
    ///
    /// A ray starting inside the cube hits it at distance 0.
    pub fn intersect_cube(&self, pose: Pose, size: f32) -> Option<f32> {
        // The rotation is orthonormal, so its transpose is its inverse.
        let to_local = pose.rotation.transpose();
        let origin = to_local * (self.origin - pose.position);
        let direction = to_local * self.direction;
        let half = size / 2.0;

        let mut t_enter = 0.0_f32;
        let mut t_exit = f32::INFINITY;
        for i in 0..3 {
            let (o, d) = (origin[i], direction[i]);
            if d.abs() < f32::EPSILON {
                if o.abs() > half {
                    return None;
                }
                continue;
            }
            let t1 = (-half - o) / d;
            let t2 = (half - o) / d;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
            if t_exit < t_enter {
                return None;
            }
        }
        Some(t_enter)
    }
}

/// Returns the piece whose box `ray` hits first, given the world pose of each
/// piece.
pub fn pick_piece(
    lattice: &Lattice,
    ray: &Ray,
    pose_of: impl Fn(PieceId) -> Pose,
) -> Option<PieceId> {
    lattice
        .piece_ids()
        .filter_map(|id| Some((id, ray.intersect_cube(pose_of(id), PIECE_SIZE)?)))
        .min_by_key(|&(_, t)| FloatOrd(t))
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LatticeCoord, Sign};

    #[test]
    fn test_ray_cube_intersection() {
        let pose = Lattice::new()[PieceId(0)].rest_pose();
        let ray = Ray::new(Vector3::new(-1.0, -1.0, 5.0), -Vector3::unit_z());
        let t = ray.intersect_cube(pose, PIECE_SIZE).unwrap();
        assert!((t - (6.0 - PIECE_SIZE / 2.0)).abs() < 1e-5, "{t}");

        let miss = Ray::new(Vector3::new(-0.5, -1.0, 5.0), -Vector3::unit_z());
        assert_eq!(miss.intersect_cube(pose, PIECE_SIZE), None);

        let away = Ray::new(Vector3::new(-1.0, -1.0, 5.0), Vector3::unit_z());
        assert_eq!(away.intersect_cube(pose, PIECE_SIZE), None);
    }

    #[test]
    fn test_pick_nearest_piece() {
        let lattice = Lattice::new();
        let ray = Ray::new(Vector3::new(1.0, 0.0, 10.0), -Vector3::unit_z());
        let picked = pick_piece(&lattice, &ray, |id| lattice[id].rest_pose()).unwrap();
        assert_eq!(
            lattice[picked].coord(),
            LatticeCoord([Sign::Pos, Sign::Zero, Sign::Pos]),
        );

        // Between two columns of pieces
        let gap = Ray::new(Vector3::new(0.5, 0.0, 10.0), -Vector3::unit_z());
        assert_eq!(pick_piece(&lattice, &gap, |id| lattice[id].rest_pose()), None);
    }
}
