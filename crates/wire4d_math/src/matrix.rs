//! Generic row-major matrix with runtime dimensions
//!
//! Vectors are treated as row vectors: `v' = v · M`. The fixed-size family in
//! [`crate::mat4`] uses the same convention and converts to and from this type.

use std::fmt;

use crate::{MathError, VectorN};

/// Row-major `rows × cols` matrix of `f64`.
///
/// The shape is fixed at construction. Every mutating operation keeps
/// `data.len() == rows * cols`.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from explicit rows.
    ///
    /// Fails with `InvalidArgument` when a dimension is zero, the row count
    /// differs from `rows`, or any row does not have exactly `cols` entries.
    pub fn new(rows: usize, cols: usize, values: Vec<Vec<f64>>) -> Result<Self, MathError> {
        if rows == 0 || cols == 0 {
            return Err(MathError::InvalidArgument(format!(
                "matrix dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }
        if values.len() != rows {
            return Err(MathError::InvalidArgument(format!(
                "expected {} rows, got {}",
                rows,
                values.len()
            )));
        }
        let mut data = Vec::with_capacity(rows * cols);
        for (i, row) in values.into_iter().enumerate() {
            if row.len() != cols {
                return Err(MathError::InvalidArgument(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }
        Ok(Self { rows, cols, data })
    }

    /// Row-major data whose length is already known to be `rows * cols`
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// All-zero matrix
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MathError> {
        if rows == 0 || cols == 0 {
            return Err(MathError::InvalidArgument(format!(
                "matrix dimensions must be non-zero, got {}x{}",
                rows, cols
            )));
        }
        Ok(Self { rows, cols, data: vec![0.0; rows * cols] })
    }

    /// `n × n` identity
    pub fn identity(n: usize) -> Result<Self, MathError> {
        let mut m = Self::zeros(n, n)?;
        m.identity_this()?;
        Ok(m)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn check(&self, row: usize, col: usize) -> Result<usize, MathError> {
        if row >= self.rows {
            return Err(MathError::index("matrix row", row, self.rows - 1));
        }
        if col >= self.cols {
            return Err(MathError::index("matrix column", col, self.cols - 1));
        }
        Ok(row * self.cols + col)
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64, MathError> {
        let i = self.check(row, col)?;
        Ok(self.data[i])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MathError> {
        let i = self.check(row, col)?;
        self.data[i] = value;
        Ok(())
    }

    /// Borrow one row
    pub fn row(&self, row: usize) -> Result<&[f64], MathError> {
        if row >= self.rows {
            return Err(MathError::index("matrix row", row, self.rows - 1));
        }
        let start = row * self.cols;
        Ok(&self.data[start..start + self.cols])
    }

    /// Overwrite one row; `values` must have exactly `cols` entries
    pub fn replace_row(&mut self, row: usize, values: &[f64]) -> Result<(), MathError> {
        if row >= self.rows {
            return Err(MathError::index("matrix row", row, self.rows - 1));
        }
        if values.len() != self.cols {
            return Err(MathError::InvalidArgument(format!(
                "replacement row has {} entries, expected {}",
                values.len(),
                self.cols
            )));
        }
        let start = row * self.cols;
        self.data[start..start + self.cols].copy_from_slice(values);
        Ok(())
    }

    /// Rows as nested vectors
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(|r| r.to_vec()).collect()
    }

    /// New `cols × rows` matrix
    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Self { rows: self.cols, cols: self.rows, data }
    }

    /// Transpose a square matrix in place
    pub fn transpose_in_place(&mut self) -> Result<(), MathError> {
        if !self.is_square() {
            return Err(MathError::InvalidArgument(format!(
                "in-place transpose needs a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        let n = self.rows;
        for r in 0..n {
            for c in (r + 1)..n {
                self.data.swap(r * n + c, c * n + r);
            }
        }
        Ok(())
    }

    /// `self × other`; requires `self.cols == other.rows`
    pub fn multiply(&self, other: &Self) -> Result<Self, MathError> {
        if self.cols != other.rows {
            return Err(MathError::DimensionMismatch {
                expected: format!("{} rows", self.cols),
                found: format!("{} rows", other.rows),
            });
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for r in 0..self.rows {
            for c in 0..other.cols {
                let mut sum = 0.0;
                for k in 0..self.cols {
                    sum += self.data[r * self.cols + k] * other.data[k * other.cols + c];
                }
                data[r * other.cols + c] = sum;
            }
        }
        Ok(Self { rows: self.rows, cols: other.cols, data })
    }

    /// Row vector times matrix: `x[i] = Σ_j v[j] · m[j][i]`.
    ///
    /// The matrix must be square with as many rows as the vector has components.
    pub fn mul_vector<V: VectorN>(&self, v: &V) -> Result<V, MathError> {
        if self.rows != V::DIM || self.cols != V::DIM {
            return Err(MathError::InvalidArgument(format!(
                "expected a {n}x{n} matrix for a {n}-component vector, got {}x{}",
                self.rows,
                self.cols,
                n = V::DIM
            )));
        }
        let mut out = [0.0; 4];
        for (i, slot) in out.iter_mut().enumerate().take(V::DIM) {
            *slot = (0..V::DIM).map(|j| v.component(j) * self.data[j * self.cols + i]).sum();
        }
        Ok(V::from_slice(&out[..V::DIM]))
    }

    /// Set every entry to zero
    pub fn zero_this(&mut self) {
        self.data.iter_mut().for_each(|x| *x = 0.0);
    }

    /// Overwrite with the identity; square matrices only
    pub fn identity_this(&mut self) -> Result<(), MathError> {
        if !self.is_square() {
            return Err(MathError::InvalidArgument(format!(
                "identity needs a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.zero_this();
        for i in 0..self.rows {
            self.data[i * self.cols + i] = 1.0;
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.data.chunks(self.cols) {
            let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vec2, Vec3, Vec4};

    fn mat_approx_eq(a: &Matrix, b: &Matrix) -> bool {
        a.rows() == b.rows()
            && a.cols() == b.cols()
            && a.data.iter().zip(&b.data).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    #[test]
    fn test_new_validates_shape() {
        assert!(Matrix::new(2, 2, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).is_ok());
        assert!(matches!(
            Matrix::new(2, 2, vec![vec![1.0, 2.0]]),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(matches!(
            Matrix::new(2, 2, vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MathError::InvalidArgument(_))
        ));
        assert!(Matrix::zeros(0, 3).is_err());
    }

    #[test]
    fn test_get_set_bounds() {
        let mut m = Matrix::zeros(2, 3).unwrap();
        m.set(1, 2, 5.0).unwrap();
        assert_eq!(m.get(1, 2).unwrap(), 5.0);
        assert!(matches!(m.get(2, 0), Err(MathError::OutOfRange { .. })));
        assert!(matches!(m.set(0, 3, 1.0), Err(MathError::OutOfRange { .. })));
    }

    #[test]
    fn test_transpose() {
        let m = Matrix::new(2, 3, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let t = m.transpose();
        assert_eq!(t.rows(), 3);
        assert_eq!(t.cols(), 2);
        assert_eq!(t.to_rows(), vec![vec![1.0, 4.0], vec![2.0, 5.0], vec![3.0, 6.0]]);
    }

    #[test]
    fn test_transpose_in_place() {
        let mut m = Matrix::new(2, 2, vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        m.transpose_in_place().unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 3.0], vec![2.0, 4.0]]);
        let mut rect = Matrix::zeros(2, 3).unwrap();
        assert!(rect.transpose_in_place().is_err());
    }

    #[test]
    fn test_multiply_shape() {
        let a = Matrix::new(2, 3, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        let b = Matrix::new(3, 1, vec![vec![1.0], vec![0.0], vec![-1.0]]).unwrap();
        let c = a.multiply(&b).unwrap();
        assert_eq!(c.to_rows(), vec![vec![-2.0], vec![-2.0]]);
        assert!(matches!(b.multiply(&b), Err(MathError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_multiply_associative() {
        let a = Matrix::new(2, 3, vec![vec![1.5, -2.0, 0.25], vec![3.0, 0.5, -1.0]]).unwrap();
        let b = Matrix::new(3, 2, vec![vec![0.1, 2.0], vec![-3.0, 1.0], vec![4.0, 0.7]]).unwrap();
        let c = Matrix::new(2, 4, vec![vec![1.0, 2.0, 3.0, 4.0], vec![-1.0, 0.5, 0.0, 2.0]])
            .unwrap();
        let left = a.multiply(&b).unwrap().multiply(&c).unwrap();
        let right = a.multiply(&b.multiply(&c).unwrap()).unwrap();
        assert!(mat_approx_eq(&left, &right));
    }

    #[test]
    fn test_identity_is_neutral() {
        let a = Matrix::new(3, 3, vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]])
            .unwrap();
        let i = Matrix::identity(3).unwrap();
        assert!(mat_approx_eq(&a.multiply(&i).unwrap(), &a));
        assert!(mat_approx_eq(&i.multiply(&a).unwrap(), &a));
    }

    #[test]
    fn test_mul_vector_row_convention() {
        // Translation lives in the bottom row
        let m = Matrix::new(
            4,
            4,
            vec![
                vec![1.0, 0.0, 0.0, 0.0],
                vec![0.0, 1.0, 0.0, 0.0],
                vec![0.0, 0.0, 1.0, 0.0],
                vec![10.0, 20.0, 30.0, 1.0],
            ],
        )
        .unwrap();
        let p = m.mul_vector(&Vec4::point(1.0, 2.0, 3.0)).unwrap();
        assert_eq!(p, Vec4::point(11.0, 22.0, 33.0));
    }

    #[test]
    fn test_mul_vector_dimensions() {
        let m2 = Matrix::new(2, 2, vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap();
        assert_eq!(m2.mul_vector(&Vec2::new(3.0, 4.0)).unwrap(), Vec2::new(4.0, 3.0));
        assert!(matches!(
            m2.mul_vector(&Vec3::new(1.0, 2.0, 3.0)),
            Err(MathError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_replace_row_and_zero() {
        let mut m = Matrix::identity(3).unwrap();
        m.replace_row(1, &[7.0, 8.0, 9.0]).unwrap();
        assert_eq!(m.row(1).unwrap(), &[7.0, 8.0, 9.0]);
        assert!(m.replace_row(1, &[1.0]).is_err());
        m.zero_this();
        assert!(m.to_rows().iter().flatten().all(|&x| x == 0.0));
        m.identity_this().unwrap();
        assert_eq!(m, Matrix::identity(3).unwrap());
    }
}
