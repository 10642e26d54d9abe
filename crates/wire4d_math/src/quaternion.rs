//! Quaternions for 3D rotation

use bytemuck::{Pod, Zeroable};

use crate::{MathError, Vec3};

/// Quaternion `w + xi + yj + zk`.
///
/// Indexed access follows storage order: 0 = w, 1 = x, 2 = y, 3 = z.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Quaternion {
    pub const ZERO: Self = Self { w: 0.0, x: 0.0, y: 0.0, z: 0.0 };
    pub const IDENTITY: Self = Self { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Pure quaternion holding a 3D vector (w = 0)
    #[inline]
    pub fn from_vector(v: Vec3) -> Self {
        Self::new(0.0, v.x, v.y, v.z)
    }

    /// Rotation of `angle` radians about `axis`
    pub fn from_axis_angle(axis: Vec3, angle: f64) -> Result<Self, MathError> {
        let axis = axis.normalized()?;
        let (s, c) = (angle * 0.5).sin_cos();
        Ok(Self::new(c, axis.x * s, axis.y * s, axis.z * s))
    }

    pub fn get(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.w),
            1 => Ok(self.x),
            2 => Ok(self.y),
            3 => Ok(self.z),
            _ => Err(MathError::index("quaternion component", index, 3)),
        }
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.w = value,
            1 => self.x = value,
            2 => self.y = value,
            3 => self.z = value,
            _ => return Err(MathError::index("quaternion component", index, 3)),
        }
        Ok(())
    }

    /// Vector part
    #[inline]
    pub fn vector(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(self.w, -self.x, -self.y, -self.z)
    }

    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    pub fn normalized(&self) -> Result<Self, MathError> {
        let n = self.norm();
        if n == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        Ok(Self::new(self.w / n, self.x / n, self.y / n, self.z / n))
    }

    /// Multiplicative inverse; zero quaternion has none
    pub fn inverse(&self) -> Result<Self, MathError> {
        let n2 = self.norm_squared();
        if n2 == 0.0 {
            return Err(MathError::DegenerateVector);
        }
        let c = self.conjugate();
        Ok(Self::new(c.w / n2, c.x / n2, c.y / n2, c.z / n2))
    }

    /// Rotate `v` by this quaternion (`q v q*`); `self` should be unit length
    pub fn rotate(&self, v: Vec3) -> Vec3 {
        (*self * Self::from_vector(v) * self.conjugate()).vector()
    }
}

/// Hamilton product
impl std::ops::Mul for Quaternion {
    type Output = Self;

    fn mul(self, q: Self) -> Self {
        Self::new(
            self.w * q.w - self.x * q.x - self.y * q.y - self.z * q.z,
            self.w * q.x + self.x * q.w + self.y * q.z - self.z * q.y,
            self.w * q.y - self.x * q.z + self.y * q.w + self.z * q.x,
            self.w * q.z + self.x * q.y - self.y * q.x + self.z * q.w,
        )
    }
}

impl std::ops::Add for Quaternion {
    type Output = Self;

    fn add(self, q: Self) -> Self {
        Self::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }
}

impl std::ops::Sub for Quaternion {
    type Output = Self;

    fn sub(self, q: Self) -> Self {
        Self::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }
}

impl std::ops::Mul<f64> for Quaternion {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }
}
