//! Polar, cylindrical and spherical coordinate systems
//!
//! Each system converts to a Cartesian point with `to_point`; the reverse
//! direction lives on the vector types (`Vec2::to_polar`, `Vec3::to_cylindrical`,
//! `Vec3::to_spherical`). Angles are radians and azimuths are kept in `[0, 2π)`.

use std::f64::consts::{PI, TAU};

use crate::{whirl_to_2pi, MathError, Vec2, Vec3};

fn check_radius(what: &'static str, r: f64) -> Result<(), MathError> {
    if r.is_nan() || r < 0.0 {
        return Err(MathError::OutOfRange { what, value: r, min: 0.0, max: f64::INFINITY });
    }
    Ok(())
}

/// 2D polar coordinate (radius, azimuth)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar2D {
    pub r: f64,
    pub theta: f64,
}

impl Polar2D {
    /// Create a polar coordinate; `theta` is wrapped into `[0, 2π)`
    pub fn new(r: f64, theta: f64) -> Result<Self, MathError> {
        check_radius("polar radius", r)?;
        Ok(Self { r, theta: whirl_to_2pi(theta) })
    }

    /// Cartesian point for this coordinate
    pub fn to_point(self) -> Vec2 {
        Vec2::new(self.r * self.theta.cos(), self.r * self.theta.sin())
    }
}

/// 3D cylindrical coordinate (radius, azimuth, height)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cylindrical3D {
    pub r: f64,
    pub theta: f64,
    pub z: f64,
}

impl Cylindrical3D {
    pub fn new(r: f64, theta: f64, z: f64) -> Result<Self, MathError> {
        check_radius("cylindrical radius", r)?;
        Ok(Self { r, theta: whirl_to_2pi(theta), z })
    }

    pub fn to_point(self) -> Vec3 {
        Vec3::new(self.r * self.theta.cos(), self.r * self.theta.sin(), self.z)
    }
}

/// 3D spherical coordinate.
///
/// `rho` is the distance from the origin, `phi` the angle from the +z axis in
/// `[0, π]` and `theta` the azimuth in the xy plane in `[0, 2π]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical3D {
    pub rho: f64,
    pub phi: f64,
    pub theta: f64,
}

impl Spherical3D {
    /// Create a spherical coordinate, rejecting components outside their domain
    pub fn new(rho: f64, phi: f64, theta: f64) -> Result<Self, MathError> {
        check_radius("spherical rho", rho)?;
        if !(0.0..=PI).contains(&phi) {
            return Err(MathError::OutOfRange { what: "spherical phi", value: phi, min: 0.0, max: PI });
        }
        if !(0.0..=TAU).contains(&theta) {
            return Err(MathError::OutOfRange {
                what: "spherical theta",
                value: theta,
                min: 0.0,
                max: TAU,
            });
        }
        Ok(Self { rho, phi, theta })
    }

    pub fn to_point(self) -> Vec3 {
        let (sin_phi, cos_phi) = self.phi.sin_cos();
        let (sin_theta, cos_theta) = self.theta.sin_cos();
        Vec3::new(
            self.rho * sin_phi * cos_theta,
            self.rho * sin_phi * sin_theta,
            self.rho * cos_phi,
        )
    }
}
