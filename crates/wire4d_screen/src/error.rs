//! Screen error type

use std::fmt;

use crate::BufferSelect;

/// Errors raised by colors and the framebuffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// An argument had an unusable value (zero dimensions, malformed hex, ...)
    InvalidArgument(String),
    /// A numeric value fell outside its documented domain
    OutOfRange {
        what: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// The target buffer is locked
    BufferLocked(BufferSelect),
}

impl fmt::Display for ScreenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScreenError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ScreenError::OutOfRange { what, value, min, max } => {
                write!(f, "{} out of range: {} not in [{}, {}]", what, value, min, max)
            }
            ScreenError::BufferLocked(buffer) => write!(f, "{} buffer is locked", buffer),
        }
    }
}

impl std::error::Error for ScreenError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ScreenError::BufferLocked(BufferSelect::Secondary);
        assert_eq!(err.to_string(), "secondary buffer is locked");
        let err = ScreenError::OutOfRange { what: "red channel", value: 300, min: 0, max: 255 };
        assert!(err.to_string().contains("300"));
    }
}
