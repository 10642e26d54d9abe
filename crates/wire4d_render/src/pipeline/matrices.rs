//! Matrix builders for the matrix-based pipeline path
//!
//! Row-vector convention: a point is transformed as `p · M`.

use wire4d_math::{FixedMatrix, Mat4, Vec3, Vec4};

/// Translation from model space to `world_pos`
pub fn build_model_to_world_matrix(world_pos: Vec4) -> Mat4 {
    Mat4::translation(world_pos.xyz())
}

/// Camera to perspective (homogeneous) projection.
///
/// Maps `(x, y, z, 1)` to `(d·x, d·ar·y, z, z)`; dividing by `w` afterwards
/// gives the same x and y as the direct perspective stage.
pub fn build_camera_to_perspective_matrix(view_dist: f64, aspect_ratio: f64) -> Mat4 {
    FixedMatrix::new([
        [view_dist, 0.0, 0.0, 0.0],
        [0.0, view_dist * aspect_ratio, 0.0, 0.0],
        [0.0, 0.0, 1.0, 1.0],
        [0.0, 0.0, 0.0, 0.0],
    ])
}

fn screen_scale(viewport_width: usize, viewport_height: usize) -> (f64, f64) {
    (
        0.5 * viewport_width as f64 - 0.5,
        0.5 * viewport_height as f64 - 0.5,
    )
}

/// Perspective to screen mapping for still-homogeneous coordinates (`w = z`).
///
/// Apply before the divide by `w`.
pub fn build_perspective_to_screen_4d_matrix(viewport_width: usize, viewport_height: usize) -> Mat4 {
    let (alpha, beta) = screen_scale(viewport_width, viewport_height);
    FixedMatrix::new([
        [alpha, 0.0, 0.0, 0.0],
        [0.0, -beta, 0.0, 0.0],
        [alpha, beta, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Perspective to screen mapping for Cartesian coordinates (`w = 1`).
///
/// Apply after the divide by `w`.
pub fn build_perspective_to_screen_matrix(viewport_width: usize, viewport_height: usize) -> Mat4 {
    let (alpha, beta) = screen_scale(viewport_width, viewport_height);
    let mut m = Mat4::scale(Vec3::new(alpha, -beta, 1.0));
    m.m[3] = [alpha, beta, 0.0, 1.0];
    m
}
