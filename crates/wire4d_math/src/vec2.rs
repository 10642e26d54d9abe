//! 2D vector / point

use serde::{Deserialize, Serialize};

use crate::coords::Polar2D;
use crate::{whirl_to_2pi, MathError, VectorN};

/// 2D vector with x, y components. Also used as a 2D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `init` to `term`
    #[inline]
    pub fn between(init: Self, term: Self) -> Self {
        term - init
    }

    /// Component by index (0 = x, 1 = y)
    pub fn get(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            _ => Err(MathError::index("Vec2 component", index, 1)),
        }
    }

    /// Set a component by index
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            _ => return Err(MathError::index("Vec2 component", index, 1)),
        }
        Ok(())
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction
    pub fn normalized(self) -> Result<Self, MathError> {
        let len = self.length();
        if len == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(self / len)
    }

    /// Cosine of the angle between two vectors
    pub fn cos_angle(self, other: Self) -> Result<f64, MathError> {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(self.dot(other) / denom)
    }

    /// Polar form of this point; theta lies in `[0, 2π)`
    pub fn to_polar(self) -> Polar2D {
        Polar2D {
            r: self.length(),
            theta: whirl_to_2pi(self.y.atan2(self.x)),
        }
    }
}

impl VectorN for Vec2 {
    const DIM: usize = 2;

    fn component(&self, index: usize) -> f64 {
        self.get(index).unwrap_or(0.0)
    }

    fn from_slice(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }
}

impl std::ops::Div<f64> for Vec2 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_between() {
        let v = Vec2::between(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(v, Vec2::new(3.0, 4.0));
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_get_set() {
        let mut v = Vec2::new(1.0, 2.0);
        assert_eq!(v.get(1).unwrap(), 2.0);
        v.set(0, 7.0).unwrap();
        assert_eq!(v.x, 7.0);
        assert!(matches!(v.get(2), Err(MathError::OutOfRange { .. })));
        assert!(v.set(9, 1.0).is_err());
    }

    #[test]
    fn test_normalized() {
        let n = Vec2::new(0.0, -3.0).normalized().unwrap();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert_eq!(Vec2::ZERO.normalized(), Err(MathError::DegenerateVector));
    }

    #[test]
    fn test_cos_angle() {
        let c = Vec2::new(1.0, 0.0).cos_angle(Vec2::new(0.0, 2.0)).unwrap();
        assert!(c.abs() < 1e-12);
        assert!(Vec2::ZERO.cos_angle(Vec2::new(1.0, 0.0)).is_err());
    }
}
