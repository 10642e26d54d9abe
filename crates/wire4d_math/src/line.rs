//! Parametric line segments

use crate::{Vec2, Vec3, EPSILON_E5};

/// Outcome of intersecting two parametric lines
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intersection {
    /// Parallel and distinct
    NoIntersect,
    /// Lines cross within both segments, at the given parameters
    InSegment(f64, f64),
    /// Infinite lines cross, but outside at least one segment
    OutOfSegment(f64, f64),
    /// Coincident lines
    Everywhere,
}

/// 2D segment `p0 + t·(p1 - p0)`, `t ∈ [0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamLine2D {
    pub p0: Vec2,
    pub p1: Vec2,
    pub v: Vec2,
}

impl ParamLine2D {
    pub fn new(p0: Vec2, p1: Vec2) -> Self {
        Self { p0, p1, v: Vec2::between(p0, p1) }
    }

    pub fn point_at(&self, t: f64) -> Vec2 {
        self.p0 + self.v * t
    }

    /// Intersect with another line, reporting the parameter on each
    pub fn intersect(&self, other: &Self) -> Intersection {
        let det = self.v.x * other.v.y - self.v.y * other.v.x;
        let dx = self.p0.x - other.p0.x;
        let dy = self.p0.y - other.p0.y;

        if det.abs() <= EPSILON_E5 {
            // Parallel: coincident if the offset between origins is along v
            let offset_cross = other.v.x * dy - other.v.y * dx;
            let along = if other.v.x == 0.0 && other.v.y == 0.0 {
                self.v.x * dy - self.v.y * dx
            } else {
                offset_cross
            };
            return if along.abs() <= EPSILON_E5 {
                Intersection::Everywhere
            } else {
                Intersection::NoIntersect
            };
        }

        let t1 = (other.v.x * dy - other.v.y * dx) / det;
        let t2 = (self.v.x * dy - self.v.y * dx) / det;

        if (0.0..=1.0).contains(&t1) && (0.0..=1.0).contains(&t2) {
            Intersection::InSegment(t1, t2)
        } else {
            Intersection::OutOfSegment(t1, t2)
        }
    }
}

/// 3D segment `p0 + t·(p1 - p0)`, `t ∈ [0, 1]`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParamLine3D {
    pub p0: Vec3,
    pub p1: Vec3,
    pub v: Vec3,
}

impl ParamLine3D {
    pub fn new(p0: Vec3, p1: Vec3) -> Self {
        Self { p0, p1, v: Vec3::between(p0, p1) }
    }

    pub fn point_at(&self, t: f64) -> Vec3 {
        self.p0 + self.v * t
    }
}
