//! Per-vertex stage math and pipeline matrix builders
//!
//! Objects and render lists both run their stages through these functions,
//! so the two paths produce identical numbers for identical input.

pub mod matrices;
pub mod vertex;

pub use matrices::{
    build_camera_to_perspective_matrix, build_model_to_world_matrix,
    build_perspective_to_screen_4d_matrix, build_perspective_to_screen_matrix,
};
pub use vertex::{is_back_face, Projection, TransCoord};
