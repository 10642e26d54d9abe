//! Angle helpers and numeric constants

use std::f64::consts::{PI, TAU};

/// Loose tolerance (1e-4)
pub const EPSILON_E4: f64 = 1e-4;
/// Medium tolerance (1e-5)
pub const EPSILON_E5: f64 = 1e-5;
/// Tight tolerance (1e-6)
pub const EPSILON_E6: f64 = 1e-6;

/// Convert degrees to radians
#[inline]
pub fn degree_to_radian(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Convert radians to degrees
#[inline]
pub fn radian_to_degree(radians: f64) -> f64 {
    radians * 180.0 / PI
}

/// `atan2(y, x)` mapped into `[0, 2π)`
pub fn atan_0_2pi(y: f64, x: f64) -> f64 {
    whirl_to_2pi(y.atan2(x))
}

/// Wrap any angle into `[0, 2π)`.
///
/// A coarse shift by whole turns is followed by at most a few single-turn
/// corrections, so huge magnitudes cost the same as small ones. Non-finite
/// input comes back as NaN.
pub fn whirl_to_2pi(theta: f64) -> f64 {
    if !theta.is_finite() {
        return f64::NAN;
    }

    let mut t = theta - TAU * (theta / TAU).floor();
    for _ in 0..4 {
        if t < 0.0 {
            t += TAU;
        } else if t >= TAU {
            t -= TAU;
        } else {
            break;
        }
    }
    // Rounding can leave t a hair below zero after the last correction
    if t < 0.0 || t >= TAU {
        t = 0.0;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_degree_radian_round_trip() {
        assert!((degree_to_radian(180.0) - PI).abs() < EPSILON);
        assert!((radian_to_degree(PI / 2.0) - 90.0).abs() < EPSILON);
        assert!((radian_to_degree(degree_to_radian(37.5)) - 37.5).abs() < EPSILON);
    }

    #[test]
    fn test_whirl_in_range_untouched() {
        assert!((whirl_to_2pi(1.0) - 1.0).abs() < EPSILON);
        assert_eq!(whirl_to_2pi(0.0), 0.0);
    }

    #[test]
    fn test_whirl_negative() {
        let t = whirl_to_2pi(-PI / 2.0);
        assert!((t - 1.5 * PI).abs() < EPSILON, "got {}", t);
    }

    #[test]
    fn test_whirl_full_turn_maps_to_zero() {
        let t = whirl_to_2pi(TAU);
        assert!(t.abs() < EPSILON, "got {}", t);
    }

    #[test]
    fn test_whirl_large_magnitudes() {
        for theta in [1e6, -1e6, 12345.678, -98765.4321, 1e12] {
            let t = whirl_to_2pi(theta);
            assert!((0.0..TAU).contains(&t), "{} -> {}", theta, t);
            // Same angle modulo a whole number of turns
            let turns = (theta - t) / TAU;
            assert!((turns - turns.round()).abs() < 1e-3, "{} -> {}", theta, t);
        }
    }

    #[test]
    fn test_whirl_tiny_negative() {
        let t = whirl_to_2pi(-1e-20);
        assert!((0.0..TAU).contains(&t));
    }

    #[test]
    fn test_whirl_non_finite() {
        assert!(whirl_to_2pi(f64::INFINITY).is_nan());
        assert!(whirl_to_2pi(f64::NAN).is_nan());
    }

    #[test]
    fn test_atan_0_2pi() {
        assert!((atan_0_2pi(1.0, 0.0) - PI / 2.0).abs() < EPSILON);
        assert!((atan_0_2pi(-1.0, 0.0) - 1.5 * PI).abs() < EPSILON);
        assert!((atan_0_2pi(0.0, -1.0) - PI).abs() < EPSILON);
    }
}
