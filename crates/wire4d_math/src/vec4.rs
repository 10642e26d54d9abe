//! Homogeneous 4D vector type

use serde::{Deserialize, Serialize};

use crate::{MathError, Vec3, VectorN};

/// Homogeneous vector with x, y, z, w components.
///
/// Points carry `w = 1`. Dot product, length, normalization and the
/// arithmetic operators work on xyz only: `+`, `-`, `*` and unary `-` keep
/// the left operand's `w`, so adding an offset to a point leaves it a point.
/// The full four-component product is only used by matrix multiplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    /// The origin as a homogeneous point
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 1.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// Homogeneous point (w = 1)
    #[inline]
    pub const fn point(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// Direction (w = 0); unaffected by translation
    #[inline]
    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Vector from `init` to `term`, returned with w = 1
    #[inline]
    pub fn between(init: Self, term: Self) -> Self {
        Self::point(term.x - init.x, term.y - init.y, term.z - init.z)
    }

    /// Component by index (0 = x, 1 = y, 2 = z, 3 = w)
    pub fn get(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.x),
            1 => Ok(self.y),
            2 => Ok(self.z),
            3 => Ok(self.w),
            _ => Err(MathError::index("Vec4 component", index, 3)),
        }
    }

    /// Set a component by index
    pub fn set(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.x = value,
            1 => self.y = value,
            2 => self.z = value,
            3 => self.w = value,
            _ => return Err(MathError::index("Vec4 component", index, 3)),
        }
        Ok(())
    }

    /// Dot product of the xyz parts
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product of the xyz parts, returned with w = 1
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::point(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared of the xyz part
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length of the xyz part
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Normalize xyz to unit length, keeping w
    pub fn normalized(self) -> Result<Self, MathError> {
        let len = self.length();
        if len == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(Self::new(self.x / len, self.y / len, self.z / len, self.w))
    }

    /// Cosine of the angle between the xyz parts
    pub fn cos_angle(self, other: Self) -> Result<f64, MathError> {
        let denom = self.length() * other.length();
        if denom == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(self.dot(other) / denom)
    }

    /// Divide through by w, giving a point with w = 1
    pub fn to_cartesian(self) -> Result<Self, MathError> {
        if self.w == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(Self::point(self.x / self.w, self.y / self.w, self.z / self.w))
    }

    /// Extract the xyz components
    #[inline]
    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    /// Linear interpolation between two vectors (all four components)
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
            self.w + (other.w - self.w) * t,
        )
    }

    /// True if every component is finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl From<Vec3> for Vec4 {
    fn from(v: Vec3) -> Self {
        Self::point(v.x, v.y, v.z)
    }
}

impl VectorN for Vec4 {
    const DIM: usize = 4;

    fn component(&self, index: usize) -> f64 {
        self.get(index).unwrap_or(0.0)
    }

    fn from_slice(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or(0.0);
        Self::new(at(0), at(1), at(2), at(3))
    }
}

// Operator overloads

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z, self.w)
    }
}

impl std::ops::AddAssign for Vec4 {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z, self.w)
    }
}

impl std::ops::SubAssign for Vec4 {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.x -= other.x;
        self.y -= other.y;
        self.z -= other.z;
    }
}

impl std::ops::Mul<f64> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar, self.w)
    }
}

impl std::ops::Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }
}
