use cgmath::{Matrix3, SquareMatrix};

use crate::projection::dominant_face;
use crate::{Axis, Face};

/// Axis-aligned orientation of a piece, stored as the faces that the piece's
/// local X+, Y+, and Z+ axes currently point toward.
///
/// Only the 24 proper rotations are reachable by turning layers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Orientation([Face; 3]);
impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
impl Orientation {
    /// Identity orientation.
    pub const IDENTITY: Self = Self([Face::R, Face::U, Face::F]);

    /// Returns the face that the piece's local `axis` currently points toward.
    pub fn image(self, axis: Axis) -> Face {
        self.0[axis.index()]
    }

    /// Returns the rotation matrix for this orientation.
    pub fn matrix(self) -> Matrix3<f32> {
        let [x, y, z] = self.0.map(Face::vector);
        Matrix3::from_cols(x, y, z)
    }

    /// Snaps a rotation matrix to the nearest axis-aligned orientation, column
    /// by column.
    ///
    /// The input is expected to already be within floating-point error of an
    /// axis-aligned rotation.
    pub fn snap(m: Matrix3<f32>) -> Self {
        Self([m.x, m.y, m.z].map(|column| dominant_face(column).0))
    }

    /// Returns whether this is a proper rotation (as opposed to a reflection
    /// or a degenerate matrix).
    pub fn is_proper_rotation(self) -> bool {
        let [x, y, z] = self.0.map(Face::axis);
        x != y && y != z && z != x && self.matrix().determinant() > 0.0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cgmath::{Deg, Rad};
    use strum::IntoEnumIterator;

    use super::*;

    fn quarter_turn(axis: Axis) -> Matrix3<f32> {
        Matrix3::from_axis_angle(axis.unit_vec3(), Rad::from(Deg(90.0)))
    }

    #[test]
    fn test_identity_matrix() {
        assert_eq!(Orientation::IDENTITY.matrix(), Matrix3::identity());
        assert!(Orientation::IDENTITY.is_proper_rotation());
    }

    #[test]
    fn test_snap_reaches_24_proper_rotations() {
        let mut seen = HashSet::new();
        let mut frontier = vec![Orientation::IDENTITY];
        while let Some(o) = frontier.pop() {
            if !seen.insert(o) {
                continue;
            }
            assert!(o.is_proper_rotation(), "{o:?}");
            for axis in Axis::iter() {
                frontier.push(Orientation::snap(quarter_turn(axis) * o.matrix()));
            }
        }
        assert_eq!(seen.len(), 24);
    }

    #[test]
    fn test_snap_quarter_turn_about_y() {
        // +90 degrees about Y takes X+ to Z- and Z+ to X+.
        let o = Orientation::snap(quarter_turn(Axis::Y));
        assert_eq!(o.image(Axis::X), Face::B);
        assert_eq!(o.image(Axis::Y), Face::U);
        assert_eq!(o.image(Axis::Z), Face::R);
    }
}
