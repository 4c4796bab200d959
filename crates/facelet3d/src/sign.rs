//! Sign enum, doubling as a lattice coordinate component.

use std::ops::{Mul, Neg};

/// Positive, negative, or zero.
///
/// Every piece coordinate component on a 3x3x3 lattice is one of these, so
/// this is also the type of a layer value.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Sign {
    /// Negative.
    Neg = -1,
    /// Zero.
    #[default]
    Zero = 0,
    /// Positive.
    Pos = 1,
}
impl Neg for Sign {
    type Output = Sign;
    fn neg(self) -> Sign {
        match self {
            Sign::Neg => Sign::Pos,
            Sign::Zero => Sign::Zero,
            Sign::Pos => Sign::Neg,
        }
    }
}
impl Mul<Sign> for Sign {
    type Output = Sign;
    fn mul(self, rhs: Sign) -> Sign {
        match self {
            Sign::Neg => -rhs,
            Sign::Zero => Sign::Zero,
            Sign::Pos => rhs,
        }
    }
}
impl Sign {
    /// Returns an integer representation of the sign (either -1, 0, or 1).
    pub const fn int(self) -> i8 {
        match self {
            Sign::Neg => -1,
            Sign::Zero => 0,
            Sign::Pos => 1,
        }
    }
    /// Returns a floating-point representation of the sign (either -1.0, 0.0,
    /// or 1.0).
    pub const fn float(self) -> f32 {
        self.int() as f32
    }
    /// Returns true if `Sign::Zero` or false otherwise.
    pub const fn is_zero(self) -> bool {
        matches!(self, Sign::Zero)
    }

    /// Returns the sign of a nonzero integer, or `Sign::Zero` for zero.
    pub const fn of_int(i: i32) -> Sign {
        match i.signum() {
            -1 => Sign::Neg,
            1 => Sign::Pos,
            _ => Sign::Zero,
        }
    }
    /// Rounds a lattice coordinate to the nearest integer and returns it as a
    /// sign, or `None` if it rounds to something outside `-1..=1`.
    pub fn from_coordinate(x: f32) -> Option<Sign> {
        let rounded = x.round();
        if rounded == -1.0 {
            Some(Sign::Neg)
        } else if rounded == 0.0 {
            Some(Sign::Zero)
        } else if rounded == 1.0 {
            Some(Sign::Pos)
        } else {
            None
        }
    }

    /// Returns an iterator over all signs, in ascending order.
    pub fn iter() -> impl Clone + Iterator<Item = Sign> {
        [Sign::Neg, Sign::Zero, Sign::Pos].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_from_coordinate() {
        assert_eq!(Sign::from_coordinate(0.9999), Some(Sign::Pos));
        assert_eq!(Sign::from_coordinate(-1.0001), Some(Sign::Neg));
        assert_eq!(Sign::from_coordinate(-0.0), Some(Sign::Zero));
        assert_eq!(Sign::from_coordinate(0.2), Some(Sign::Zero));
        assert_eq!(Sign::from_coordinate(1.7), None);
    }

    #[test]
    fn test_sign_mul() {
        for a in Sign::iter() {
            for b in Sign::iter() {
                assert_eq!((a * b).int(), a.int() * b.int());
            }
        }
    }
}
