//! 3D planes in point-normal form

use crate::{MathError, ParamLine3D, Vec3, EPSILON_E5};

/// Plane through `point` with normal `normal`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane3D {
    pub point: Vec3,
    pub normal: Vec3,
}

/// Where a parametric line meets a plane
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlaneHit {
    /// Parallel, not on the plane
    None,
    /// The line lies in the plane
    Everywhere,
    /// Single crossing at parameter `t`, inside the segment or not
    At { t: f64, point: Vec3, in_segment: bool },
}

impl Plane3D {
    /// Build a plane, optionally normalizing the normal.
    ///
    /// A zero-length normal is rejected only when normalization is requested.
    pub fn new(point: Vec3, normal: Vec3, normalize: bool) -> Result<Self, MathError> {
        let normal = if normalize { normal.normalized()? } else { normal };
        Ok(Self { point, normal })
    }

    /// `n · (p - p0)`: positive on the side the normal points to, zero on the
    /// plane. Scaled by `|n|` when the normal is not unit length.
    #[inline]
    pub fn signed_distance(&self, p: Vec3) -> f64 {
        self.normal.dot(p - self.point)
    }

    /// Intersect with a parametric segment
    pub fn intersect_line(&self, line: &ParamLine3D) -> PlaneHit {
        let denom = self.normal.dot(line.v);
        let start = self.signed_distance(line.p0);
        if denom.abs() <= EPSILON_E5 {
            return if start.abs() <= EPSILON_E5 { PlaneHit::Everywhere } else { PlaneHit::None };
        }
        let t = -start / denom;
        PlaneHit::At { t, point: line.point_at(t), in_segment: (0.0..=1.0).contains(&t) }
    }
}
