//! Fixed-size matrices and the 4x4 transform constructors
//!
//! Row-vector convention throughout: a point is transformed as `p' = p · M`,
//! so translation sits in the bottom row and `A * B` applies `A` first.

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use crate::{MathError, Matrix, Vec3, Vec4, VectorN};

/// Row-major `R × C` matrix with compile-time dimensions
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedMatrix<const R: usize, const C: usize> {
    pub m: [[f64; C]; R],
}

pub type Mat4 = FixedMatrix<4, 4>;
pub type Mat4x3 = FixedMatrix<4, 3>;
pub type Mat3 = FixedMatrix<3, 3>;
pub type Mat3x2 = FixedMatrix<3, 2>;
pub type Mat2 = FixedMatrix<2, 2>;
pub type Mat1x4 = FixedMatrix<1, 4>;
pub type Mat1x3 = FixedMatrix<1, 3>;
pub type Mat1x2 = FixedMatrix<1, 2>;

impl<const R: usize, const C: usize> Default for FixedMatrix<R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const R: usize, const C: usize> FixedMatrix<R, C> {
    #[inline]
    pub const fn new(m: [[f64; C]; R]) -> Self {
        Self { m }
    }

    #[inline]
    pub const fn zeros() -> Self {
        Self { m: [[0.0; C]; R] }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, MathError> {
        self.check(row, col)?;
        Ok(self.m[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MathError> {
        self.check(row, col)?;
        self.m[row][col] = value;
        Ok(())
    }

    fn check(&self, row: usize, col: usize) -> Result<(), MathError> {
        if row >= R {
            return Err(MathError::index("matrix row", row, R - 1));
        }
        if col >= C {
            return Err(MathError::index("matrix column", col, C - 1));
        }
        Ok(())
    }

    pub fn replace_row(&mut self, row: usize, values: [f64; C]) -> Result<(), MathError> {
        if row >= R {
            return Err(MathError::index("matrix row", row, R - 1));
        }
        self.m[row] = values;
        Ok(())
    }

    pub fn transpose(&self) -> FixedMatrix<C, R> {
        let mut t = FixedMatrix::<C, R>::zeros();
        for r in 0..R {
            for c in 0..C {
                t.m[c][r] = self.m[r][c];
            }
        }
        t
    }

    pub fn zero_this(&mut self) {
        self.m = [[0.0; C]; R];
    }

    /// Copy into a runtime-sized matrix
    pub fn to_matrix(&self) -> Matrix {
        Matrix::from_raw(R, C, self.m.iter().flatten().copied().collect())
    }
}

impl<const N: usize> FixedMatrix<N, N> {
    pub fn identity() -> Self {
        let mut m = Self::zeros();
        m.identity_this();
        m
    }

    pub fn identity_this(&mut self) {
        self.zero_this();
        for i in 0..N {
            self.m[i][i] = 1.0;
        }
    }

    pub fn transpose_in_place(&mut self) {
        for r in 0..N {
            for c in (r + 1)..N {
                let tmp = self.m[r][c];
                self.m[r][c] = self.m[c][r];
                self.m[c][r] = tmp;
            }
        }
    }

    /// Row vector times matrix; the vector must have `N` components
    pub fn mul_vector<V: VectorN>(&self, v: &V) -> Result<V, MathError> {
        if V::DIM != N {
            return Err(MathError::InvalidArgument(format!(
                "expected a {}-component vector for a {n}x{n} matrix",
                N,
                n = N
            )));
        }
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate().take(N) {
            *slot = (0..N).map(|j| v.component(j) * self.m[j][i]).sum();
        }
        Ok(V::from_slice(&out[..N]))
    }
}

impl<const R: usize, const C: usize> TryFrom<&Matrix> for FixedMatrix<R, C> {
    type Error = MathError;

    fn try_from(src: &Matrix) -> Result<Self, MathError> {
        if src.rows() != R || src.cols() != C {
            return Err(MathError::DimensionMismatch {
                expected: format!("{}x{}", R, C),
                found: format!("{}x{}", src.rows(), src.cols()),
            });
        }
        let mut out = Self::zeros();
        for (r, row) in out.m.iter_mut().enumerate() {
            row.copy_from_slice(src.row(r)?);
        }
        Ok(out)
    }
}

impl<const R: usize, const C: usize> From<FixedMatrix<R, C>> for Matrix {
    fn from(m: FixedMatrix<R, C>) -> Self {
        m.to_matrix()
    }
}

impl<const R: usize, const K: usize, const C: usize> Mul<FixedMatrix<K, C>> for FixedMatrix<R, K> {
    type Output = FixedMatrix<R, C>;

    fn mul(self, rhs: FixedMatrix<K, C>) -> FixedMatrix<R, C> {
        let mut out = FixedMatrix::<R, C>::zeros();
        for r in 0..R {
            for c in 0..C {
                out.m[r][c] = (0..K).map(|k| self.m[r][k] * rhs.m[k][c]).sum();
            }
        }
        out
    }
}

impl<const R: usize, const C: usize> fmt::Display for FixedMatrix<R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.m {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

/// Axis order for composing Euler rotations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RotationOrder {
    #[default]
    Xyz,
    Yxz,
    Xzy,
    Yzx,
    Zyx,
    Zxy,
}

impl RotationOrder {
    pub const ALL: [RotationOrder; 6] = [
        RotationOrder::Xyz,
        RotationOrder::Yxz,
        RotationOrder::Xzy,
        RotationOrder::Yzx,
        RotationOrder::Zyx,
        RotationOrder::Zxy,
    ];

    /// Axis indices (0 = X, 1 = Y, 2 = Z) in application order
    pub fn axes(self) -> [usize; 3] {
        match self {
            RotationOrder::Xyz => [0, 1, 2],
            RotationOrder::Yxz => [1, 0, 2],
            RotationOrder::Xzy => [0, 2, 1],
            RotationOrder::Yzx => [1, 2, 0],
            RotationOrder::Zyx => [2, 1, 0],
            RotationOrder::Zxy => [2, 0, 1],
        }
    }
}

impl fmt::Display for RotationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RotationOrder::Xyz => "XYZ",
            RotationOrder::Yxz => "YXZ",
            RotationOrder::Xzy => "XZY",
            RotationOrder::Yzx => "YZX",
            RotationOrder::Zyx => "ZYX",
            RotationOrder::Zxy => "ZXY",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for RotationOrder {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, MathError> {
        RotationOrder::ALL
            .into_iter()
            .find(|o| o.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| MathError::InvalidArgument(format!("unknown rotation order '{}'", s)))
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = FixedMatrix::new([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Rotation about the X axis
    pub fn rotation_x(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        FixedMatrix::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Y axis
    pub fn rotation_y(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        FixedMatrix::new([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about the Z axis
    pub fn rotation_z(angle: f64) -> Mat4 {
        let (s, c) = angle.sin_cos();
        FixedMatrix::new([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation about a single axis by index (0 = X, 1 = Y, 2 = Z)
    fn rotation_axis(axis: usize, angle: f64) -> Mat4 {
        match axis {
            0 => Mat4::rotation_x(angle),
            1 => Mat4::rotation_y(angle),
            _ => Mat4::rotation_z(angle),
        }
    }

    /// Euler rotation: per-axis rotations by `angles.{x,y,z}` composed in
    /// `order`. Zero angles contribute nothing and are skipped.
    pub fn rotation(angles: Vec3, order: RotationOrder) -> Mat4 {
        let per_axis = [angles.x, angles.y, angles.z];
        let mut m = Mat4::IDENTITY;
        for axis in order.axes() {
            let angle = per_axis[axis];
            if angle != 0.0 {
                m = m * Mat4::rotation_axis(axis, angle);
            }
        }
        m
    }

    /// Translation by `offset` (bottom row)
    pub fn translation(offset: Vec3) -> Mat4 {
        let mut m = Mat4::IDENTITY;
        m.m[3] = [offset.x, offset.y, offset.z, 1.0];
        m
    }

    /// Non-uniform scale
    pub fn scale(factors: Vec3) -> Mat4 {
        FixedMatrix::new([
            [factors.x, 0.0, 0.0, 0.0],
            [0.0, factors.y, 0.0, 0.0],
            [0.0, 0.0, factors.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Transform a homogeneous vector (all four components participate)
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        )
    }
}

impl Mul<Mat4> for Vec4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, m: Mat4) -> Vec4 {
        m.transform(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat_approx_eq<const R: usize, const C: usize>(
        a: &FixedMatrix<R, C>,
        b: &FixedMatrix<R, C>,
    ) -> bool {
        a.m.iter().flatten().zip(b.m.iter().flatten()).all(|(x, y)| approx_eq(*x, *y))
    }

    #[test]
    fn test_identity() {
        assert_eq!(Mat4::identity(), Mat4::IDENTITY);
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v * Mat4::IDENTITY, v);
    }

    #[test]
    fn test_rotation_z_quarter_turn() {
        // Row-vector convention: +x goes to +y
        let v = Vec4::point(1.0, 0.0, 0.0) * Mat4::rotation_z(FRAC_PI_2);
        assert!(vec_approx_eq(v, Vec4::point(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotation_x_quarter_turn() {
        let v = Vec4::point(0.0, 1.0, 0.0) * Mat4::rotation_x(FRAC_PI_2);
        assert!(vec_approx_eq(v, Vec4::point(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_rotation_y_quarter_turn() {
        let v = Vec4::point(0.0, 0.0, 1.0) * Mat4::rotation_y(FRAC_PI_2);
        assert!(vec_approx_eq(v, Vec4::point(1.0, 0.0, 0.0)));
    }

    #[test]
    fn test_rotation_matches_explicit_composition() {
        let angles = Vec3::new(0.3, -1.1, 2.4);
        for order in RotationOrder::ALL {
            let mut expected = Mat4::IDENTITY;
            for axis in order.axes() {
                let m = match axis {
                    0 => Mat4::rotation_x(angles.x),
                    1 => Mat4::rotation_y(angles.y),
                    _ => Mat4::rotation_z(angles.z),
                };
                expected = expected * m;
            }
            let direct = Mat4::rotation(angles, order);
            assert!(mat_approx_eq(&direct, &expected), "order {}", order);
        }
    }

    #[test]
    fn test_rotation_skips_zero_angles() {
        let m = Mat4::rotation(Vec3::new(0.0, 0.7, 0.0), RotationOrder::Zxy);
        assert!(mat_approx_eq(&m, &Mat4::rotation_y(0.7)));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let t = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(Vec4::point(0.0, 0.0, 0.0) * t, Vec4::point(1.0, 2.0, 3.0));
        assert_eq!(Vec4::direction(1.0, 0.0, 0.0) * t, Vec4::direction(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_scale() {
        let v = Vec4::point(1.0, 1.0, 1.0) * Mat4::scale(Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(v, Vec4::point(2.0, 3.0, 4.0));
    }

    #[test]
    fn test_mul_composition_order() {
        // Scale first, then translate
        let m = Mat4::scale(Vec3::new(2.0, 2.0, 2.0)) * Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(Vec4::point(1.0, 1.0, 1.0) * m, Vec4::point(3.0, 2.0, 2.0));
    }

    #[test]
    fn test_mul_associative() {
        let a = Mat4::rotation_x(0.4) * Mat4::translation(Vec3::new(1.0, -2.0, 0.5));
        let b = Mat4::scale(Vec3::new(1.5, 0.5, 2.0));
        let c = Mat4::rotation_z(-1.2);
        assert!(mat_approx_eq(&((a * b) * c), &(a * (b * c))));
    }

    #[test]
    fn test_non_square_multiply() {
        let a = Mat1x3::new([[1.0, 2.0, 3.0]]);
        let b = Mat3x2::new([[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
        let c: Mat1x2 = a * b;
        assert_eq!(c.m, [[4.0, 5.0]]);
    }

    #[test]
    fn test_transpose() {
        let a = Mat4x3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0], [10.0, 11.0, 12.0]]);
        let t = a.transpose();
        assert_eq!(t.m[2], [3.0, 6.0, 9.0, 12.0]);
        let mut r = Mat3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        r.transpose_in_place();
        assert_eq!(r.m[0], [1.0, 4.0, 7.0]);
    }

    #[test]
    fn test_generic_conversion() {
        let m = Mat4::rotation_y(0.5);
        let g: Matrix = m.into();
        let back = Mat4::try_from(&g).unwrap();
        assert_eq!(back, m);

        let small = Matrix::identity(3).unwrap();
        assert!(matches!(Mat4::try_from(&small), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_fixed_mul_vector() {
        let m = Mat2::new([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(m.mul_vector(&crate::Vec2::new(1.0, 2.0)).unwrap(), crate::Vec2::new(2.0, 1.0));
        assert!(m.mul_vector(&Vec3::new(1.0, 2.0, 3.0)).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Mat3::identity();
        m.set(2, 1, 4.0).unwrap();
        assert_eq!(m.get(2, 1).unwrap(), 4.0);
        assert!(m.get(3, 0).is_err());
    }

    #[test]
    fn test_rotation_order_parse() {
        assert_eq!("zyx".parse::<RotationOrder>().unwrap(), RotationOrder::Zyx);
        assert!("XYX".parse::<RotationOrder>().is_err());
    }
}
