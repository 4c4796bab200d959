//! Axes and faces of the cube.

use std::fmt;

use cgmath::Vector3;
use strum::{EnumIter, IntoEnumIterator};

use crate::Sign;

/// 3-dimensional axis.
#[derive(EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    /// X axis (right).
    X = 0,
    /// Y axis (up).
    Y = 1,
    /// Z axis (towards the camera).
    Z = 2,
}
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
            Axis::Z => write!(f, "z"),
        }
    }
}
impl Axis {
    /// Returns the unit vector along this axis.
    pub fn unit_vec3(self) -> Vector3<f32> {
        match self {
            Axis::X => Vector3::unit_x(),
            Axis::Y => Vector3::unit_y(),
            Axis::Z => Vector3::unit_z(),
        }
    }

    /// Returns the index of this axis into a vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the component of `v` along this axis.
    pub fn component(self, v: Vector3<f32>) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }
}

/// Face of the cube.
///
/// The discriminants match the order of the 9-symbol blocks in a facelet
/// string: `U`, `R`, `F`, `D`, `L`, `B`.
#[derive(EnumIter, Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Face {
    /// Up (+Y).
    #[default]
    U = 0,
    /// Right (+X).
    R = 1,
    /// Front (+Z).
    F = 2,
    /// Down (-Y).
    D = 3,
    /// Left (-X).
    L = 4,
    /// Back (-Z).
    B = 5,
}
impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
impl Face {
    /// Number of faces on a cube.
    pub const COUNT: usize = 6;

    /// Returns the face with the given outward normal.
    ///
    /// # Panics
    ///
    /// Panics if `sign` is zero.
    pub fn new(axis: Axis, sign: Sign) -> Self {
        use Face::*;

        match (axis, sign) {
            (Axis::X, Sign::Pos) => R,
            (Axis::X, Sign::Neg) => L,
            (Axis::Y, Sign::Pos) => U,
            (Axis::Y, Sign::Neg) => D,
            (Axis::Z, Sign::Pos) => F,
            (Axis::Z, Sign::Neg) => B,
            (_, Sign::Zero) => panic!("face sign cannot be zero"),
        }
    }

    /// Returns the face whose label is `c`.
    pub fn from_symbol(c: char) -> Option<Self> {
        Face::iter().find(|f| f.symbol() == c)
    }

    /// Returns the index of this face's 9-symbol block in a facelet string.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis perpendicular to this face.
    pub fn axis(self) -> Axis {
        use Face::*;

        match self {
            R | L => Axis::X,
            U | D => Axis::Y,
            F | B => Axis::Z,
        }
    }
    /// Returns the sign of this face's outward normal along its axis.
    pub fn sign(self) -> Sign {
        use Face::*;

        match self {
            R | U | F => Sign::Pos,
            L | D | B => Sign::Neg,
        }
    }
    /// Returns the face on the other side of the cube.
    #[must_use]
    pub fn opposite(self) -> Self {
        Face::new(self.axis(), -self.sign())
    }

    /// Returns the single-letter label of this face.
    pub fn symbol(self) -> char {
        use Face::*;

        match self {
            U => 'U',
            R => 'R',
            F => 'F',
            D => 'D',
            L => 'L',
            B => 'B',
        }
    }
    /// Returns the human-friendly name of this face.
    pub fn name(self) -> &'static str {
        use Face::*;

        match self {
            U => "Up",
            R => "Right",
            F => "Front",
            D => "Down",
            L => "Left",
            B => "Back",
        }
    }

    /// Returns the outward unit normal of this face.
    pub fn vector(self) -> Vector3<f32> {
        self.axis().unit_vec3() * self.sign().float()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_face_symbols_roundtrip() {
        for face in Face::iter() {
            assert_eq!(Face::from_symbol(face.symbol()), Some(face));
            assert_eq!(Face::new(face.axis(), face.sign()), face);
            assert_eq!(face.opposite().opposite(), face);
            assert_ne!(face.opposite(), face);
        }
        assert_eq!(Face::from_symbol('W'), None);
    }

    #[test]
    fn test_face_order_matches_facelet_blocks() {
        let order: String = Face::iter().map(|f| f.symbol()).collect();
        assert_eq!(order, "URFDLB");
    }
}
