//! Render pipeline error type

use std::fmt;

use wire4d_math::MathError;
use wire4d_screen::ScreenError;

/// Errors raised by the camera, objects, render lists and frame driver
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Failure in the math layer (degenerate basis, bad dimensions)
    Math(MathError),
    /// Failure drawing into or flipping the screen
    Screen(ScreenError),
    /// Malformed input to a constructor or stage
    InvalidArgument(String),
    /// A numeric value outside its documented domain
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// A stage was invoked on data that does not meet its precondition
    StateViolation(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Math(err) => write!(f, "Math error: {}", err),
            RenderError::Screen(err) => write!(f, "Screen error: {}", err),
            RenderError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            RenderError::OutOfRange { what, value, min, max } => {
                write!(f, "{} out of range: {} not in [{}, {}]", what, value, min, max)
            }
            RenderError::StateViolation(msg) => write!(f, "Pipeline state violation: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Math(err) => Some(err),
            RenderError::Screen(err) => Some(err),
            _ => None,
        }
    }
}

impl From<MathError> for RenderError {
    fn from(err: MathError) -> Self {
        RenderError::Math(err)
    }
}

impl From<ScreenError> for RenderError {
    fn from(err: ScreenError) -> Self {
        RenderError::Screen(err)
    }
}
