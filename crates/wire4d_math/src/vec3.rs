//! 3D vector / point

use serde::{Deserialize, Serialize};

use crate::coords::{Cylindrical3D, Spherical3D};
use crate::{atan_0_2pi, MathError, VectorN};

/// 3D vector with x, y, z components. Also used as a 3D point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector from `init` to `term`
    #[inline]
    pub fn between(init: Self, term: Self) -> Self {
        term - init
    }

    /// Component by index (0 = x, 1 = y, 2 = z)
    pub fn get(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            _ => Err(MathError::index("Vec3 component", index, 2)),
        }
    }

    /// Set a component by index
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            _ => return Err(MathError::index("Vec3 component", index, 2)),
        }
        Ok(())
    }

    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
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

    /// Cylindrical form: radius in the XY plane, heading, and height
    pub fn to_cylindrical(self) -> Cylindrical3D {
        Cylindrical3D {
            r: (self.x * self.x + self.y * self.y).sqrt(),
            theta: atan_0_2pi(self.y, self.x),
            z: self.z,
        }
    }

    /// Spherical form: `rho` distance, `phi` angle from +Z, `theta` heading.
    ///
    /// The origin maps to all zeros.
    pub fn to_spherical(self) -> Spherical3D {
        let rho = self.length();
        if rho == 0.0 {
            return Spherical3D { rho: 0.0, phi: 0.0, theta: 0.0 };
        }
        Spherical3D {
            rho,
            phi: (self.z / rho).clamp(-1.0, 1.0).acos(),
            theta: atan_0_2pi(self.y, self.x),
        }
    }
}

impl VectorN for Vec3 {
    const DIM: usize = 3;

    fn component(&self, index: usize) -> f64 {
        self.get(index).unwrap_or(0.0)
    }

    fn from_slice(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2))
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl std::ops::Div<f64> for Vec3 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self::new(self.x / scalar, self.y / scalar, self.z / scalar)
    }
}

impl std::ops::Neg for Vec3 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_right_handed_basis() {
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::Z), Vec3::X);
        assert_eq!(Vec3::Z.cross(Vec3::X), Vec3::Y);
    }

    #[test]
    fn test_dot_and_length() {
        let v = Vec3::new(2.0, 3.0, 6.0);
        assert_eq!(v.dot(Vec3::new(1.0, 1.0, 1.0)), 11.0);
        assert_eq!(v.length(), 7.0);
    }

    #[test]
    fn test_normalized_unit_length() {
        for v in [Vec3::new(1e-8, 0.0, 0.0), Vec3::new(-3.0, 4.0, 12.0), Vec3::new(1e8, 2.0, -5.0)] {
            let n = v.normalized().unwrap();
            assert!((n.length() - 1.0).abs() < 1e-12, "{:?}", v);
        }
        assert_eq!(Vec3::ZERO.normalized(), Err(MathError::DegenerateVector));
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(Vec3::ZERO.get(3).is_err());
    }
}
