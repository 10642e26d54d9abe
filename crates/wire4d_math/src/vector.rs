//! Trait shared by the fixed-dimension vector types
//!
//! The generic [`Matrix`](crate::Matrix) multiplies vectors of any of the
//! supported dimensions through this trait.

/// A vector with a fixed number of `f64` components
pub trait VectorN: Copy {
    /// Number of components
    const DIM: usize;

    /// Component by index; indices at or past `DIM` read as 0
    fn component(&self, index: usize) -> f64;

    /// Build from a slice; missing trailing components are 0
    fn from_slice(values: &[f64]) -> Self;
}
