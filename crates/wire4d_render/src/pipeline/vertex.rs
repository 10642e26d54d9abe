//! Per-vertex math shared by objects and render lists

use wire4d_math::Vec4;

use crate::{Camera4D, RenderError};

/// Which vertex list a transform reads and writes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransCoord {
    /// Transform the local list in place
    LocalOnly,
    /// Transform the transformed list in place
    TransOnly,
    /// Read the local list, write the transformed list
    #[default]
    LocalToTrans,
}

/// Apply `f` to a vertex list pair according to `coord`.
///
/// `local` and `trans` must have the same length.
pub(crate) fn apply(
    coord: TransCoord,
    local: &mut [Vec4],
    trans: &mut [Vec4],
    f: impl Fn(Vec4) -> Vec4,
) {
    match coord {
        TransCoord::LocalOnly => local.iter_mut().for_each(|v| *v = f(*v)),
        TransCoord::TransOnly => trans.iter_mut().for_each(|v| *v = f(*v)),
        TransCoord::LocalToTrans => {
            for (dst, src) in trans.iter_mut().zip(local.iter()) {
                *dst = f(*src);
            }
        }
    }
}

/// Face normal test against a world-space eye point.
///
/// The normal is `(v1 - v0) × (v2 - v0)` (counter-clockwise winding faces
/// the viewer). A face is a back face when `normal · (eye - v0) <= 0`, so
/// edge-on faces count as back faces.
pub fn is_back_face(v0: Vec4, v1: Vec4, v2: Vec4, eye: Vec4) -> bool {
    let normal = (v1 - v0).cross(v2 - v0);
    let view = eye - v0;
    normal.dot(view) <= 0.0
}

/// Projection constants captured from a camera
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub view_dist: f64,
    pub aspect_ratio: f64,
    /// `(viewport_width - 1) / 2`
    pub alpha: f64,
    /// `(viewport_height - 1) / 2`
    pub beta: f64,
}

impl Projection {
    pub fn from_camera(cam: &Camera4D) -> Self {
        Self {
            view_dist: cam.view_dist,
            aspect_ratio: cam.aspect_ratio,
            alpha: 0.5 * cam.viewport_width as f64 - 0.5,
            beta: 0.5 * cam.viewport_height as f64 - 0.5,
        }
    }

    /// Perspective divide folded into the projection; z and w are kept.
    ///
    /// Callers check [`ensure_in_front`] first.
    #[inline]
    pub fn perspective(&self, v: Vec4) -> Vec4 {
        Vec4::new(
            self.view_dist * v.x / v.z,
            self.view_dist * v.y * self.aspect_ratio / v.z,
            v.z,
            v.w,
        )
    }

    /// Map perspective coordinates to pixels; screen y grows downward
    #[inline]
    pub fn screen(&self, v: Vec4) -> Vec4 {
        Vec4::new(self.alpha + v.x * self.alpha, self.beta - v.y * self.beta, v.z, v.w)
    }
}

/// A vertex about to be divided by z must lie in front of the eye
pub(crate) fn ensure_in_front(v: Vec4, what: &str) -> Result<(), RenderError> {
    if v.z > 0.0 {
        Ok(())
    } else {
        Err(RenderError::StateViolation(format!(
            "{} has z = {} (must be in front of the camera before projection)",
            what, v.z
        )))
    }
}

/// A vertex about to be divided by w must have w != 0
pub(crate) fn ensure_homogeneous(v: Vec4, what: &str) -> Result<(), RenderError> {
    if v.w != 0.0 && v.w.is_finite() {
        Ok(())
    } else {
        Err(RenderError::StateViolation(format!("{} has w = {}", what, v.w)))
    }
}

/// Divide xyz by w, leaving w = 1
#[inline]
pub(crate) fn homogeneous_divide(v: Vec4) -> Vec4 {
    Vec4::point(v.x / v.w, v.y / v.w, v.z / v.w)
}
