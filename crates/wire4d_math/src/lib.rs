//! Homogeneous-coordinate math for the wire4d pipeline
//!
//! ## Core Types
//!
//! - [`Vec2`], [`Vec3`] - plain Cartesian vectors
//! - [`Vec4`] - homogeneous vector; dot/length ignore `w`
//! - [`Matrix`] - row-major matrix with runtime dimensions
//! - [`FixedMatrix`] / [`Mat4`] - compile-time sized matrices and 4x4 transforms
//! - [`Quaternion`] - 3D rotation
//!
//! ## Geometry
//!
//! - [`Polar2D`], [`Cylindrical3D`], [`Spherical3D`] - alternative coordinates
//! - [`ParamLine2D`], [`ParamLine3D`] - parametric segments
//! - [`Plane3D`] - point-normal plane
//!
//! All transforms use row vectors (`v' = v · M`).

mod angle;
mod error;
mod vec2;
mod vec3;
mod vec4;
mod vector;
pub mod coords;
pub mod line;
pub mod mat4;
pub mod matrix;
pub mod plane;
pub mod quaternion;

pub use angle::{
    atan_0_2pi, degree_to_radian, radian_to_degree, whirl_to_2pi, EPSILON_E4, EPSILON_E5,
    EPSILON_E6,
};
pub use coords::{Cylindrical3D, Polar2D, Spherical3D};
pub use error::MathError;
pub use line::{Intersection, ParamLine2D, ParamLine3D};
pub use mat4::{
    FixedMatrix, Mat1x2, Mat1x3, Mat1x4, Mat2, Mat3, Mat3x2, Mat4, Mat4x3, RotationOrder,
};
pub use matrix::Matrix;
pub use plane::{Plane3D, PlaneHit};
pub use quaternion::Quaternion;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
pub use vector::VectorN;
