//! Interpolation functions.

use std::f32::consts::PI;

/// Function that maps a float from the range 0.0 to 1.0 to another float
/// from 0.0 to 1.0.
pub type InterpolateFn = fn(f32) -> f32;

/// Interpolate linearly.
pub const LINEAR: InterpolateFn = |x| x;
/// Interpolate using a quadratic ease-in-out.
pub const QUADRATIC_IN_OUT: InterpolateFn = |x| {
    if x < 0.5 {
        2.0 * x * x
    } else {
        -1.0 + (4.0 - 2.0 * x) * x
    }
};
/// Interpolate using cosine from 0.0 to PI.
pub const COSINE: InterpolateFn = |x| (1.0 - (x * PI).cos()) / 2.0;
/// Interpolate using cosine from 0.0 to PI/2.0.
pub const COSINE_ACCEL: InterpolateFn = |x| 1.0 - (x * PI / 2.0).cos();
/// Interpolate using cosine from PI/2.0 to 0.0.
pub const COSINE_DECEL: InterpolateFn = |x| ((1.0 - x) * PI / 2.0).cos();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_endpoints() {
        for f in [LINEAR, QUADRATIC_IN_OUT, COSINE, COSINE_ACCEL, COSINE_DECEL] {
            assert!(f(0.0).abs() < 1e-6);
            assert!((f(1.0) - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_quadratic_in_out_is_continuous_and_symmetric() {
        assert_eq!(QUADRATIC_IN_OUT(0.5), 0.5);
        assert!((QUADRATIC_IN_OUT(0.25) - 0.125).abs() < 1e-6);
        assert!((QUADRATIC_IN_OUT(0.75) - 0.875).abs() < 1e-6);
        let mut prev = 0.0;
        for i in 1..=100 {
            let y = QUADRATIC_IN_OUT(i as f32 / 100.0);
            assert!(y >= prev);
            prev = y;
        }
    }
}
