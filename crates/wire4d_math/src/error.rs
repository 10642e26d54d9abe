//! Error type shared by the math primitives

use std::fmt;

/// Errors raised by vector, matrix and coordinate operations
#[derive(Debug, Clone, PartialEq)]
pub enum MathError {
    /// An argument had the wrong shape or an unusable value
    InvalidArgument(String),
    /// A numeric value (usually an index) fell outside its documented domain
    OutOfRange {
        /// What was being indexed or validated
        what: &'static str,
        /// The offending value
        value: f64,
        /// Inclusive lower bound
        min: f64,
        /// Inclusive upper bound
        max: f64,
    },
    /// Two matrices (or a matrix and a vector) cannot be combined
    DimensionMismatch {
        /// Shape required by the operation, e.g. "4 rows"
        expected: String,
        /// Shape actually supplied
        found: String,
    },
    /// The vector has zero length and cannot be normalized
    DegenerateVector,
}

impl MathError {
    pub(crate) fn index(what: &'static str, value: usize, max: usize) -> Self {
        MathError::OutOfRange {
            what,
            value: value as f64,
            min: 0.0,
            max: max as f64,
        }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            MathError::OutOfRange { what, value, min, max } => {
                write!(f, "{} out of range: {} not in [{}, {}]", what, value, min, max)
            }
            MathError::DimensionMismatch { expected, found } => {
                write!(f, "Dimension mismatch: expected {}, found {}", expected, found)
            }
            MathError::DegenerateVector => write!(f, "Zero-length vector cannot be normalized"),
        }
    }
}

impl std::error::Error for MathError {}
