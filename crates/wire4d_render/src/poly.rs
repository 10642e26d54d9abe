//! Polygons and their state/attribute flags

use bitflags::bitflags;
use wire4d_math::Vec4;
use wire4d_screen::{BufferSelect, Color, PresentationSink, Screen};

use crate::pipeline::is_back_face;
use crate::RenderError;

bitflags! {
    /// Per-frame visibility state of a polygon
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PolyState: u8 {
        /// Participates in the pipeline at all
        const ACTIVE = 1 << 0;
        /// Excluded this frame by clipping
        const CLIPPED = 1 << 1;
        /// Excluded this frame as facing away from the camera
        const BACKFACE = 1 << 2;
    }
}

impl PolyState {
    /// `ACTIVE && !CLIPPED && !BACKFACE`
    #[inline]
    pub fn is_eligible(self) -> bool {
        self.contains(PolyState::ACTIVE) && !self.intersects(PolyState::CLIPPED | PolyState::BACKFACE)
    }

    /// Clear the per-frame bits of an active polygon
    #[inline]
    pub fn reset(&mut self) {
        if self.contains(PolyState::ACTIVE) {
            self.remove(PolyState::CLIPPED | PolyState::BACKFACE);
        }
    }
}

bitflags! {
    /// Static polygon attributes. Shading bits are carried but not evaluated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct PolyAttributes: u16 {
        /// Visible from both sides; never marked as a back face
        const TWO_SIDED = 1 << 0;
        const TRANSPARENT = 1 << 1;
        const COLOR_8BIT = 1 << 2;
        const RGB16 = 1 << 3;
        const RGB24 = 1 << 4;
        const SHADE_PURE = 1 << 5;
        const SHADE_FLAT = 1 << 6;
        const SHADE_GOURAUD = 1 << 7;
        const SHADE_PHONG = 1 << 8;
    }
}

/// Triangle referencing three vertices of its owning object
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Poly4D {
    pub vert: [usize; 3],
    pub color: Color,
    pub state: PolyState,
    pub attributes: PolyAttributes,
}

impl Poly4D {
    pub fn new(vert: [usize; 3], color: Color, attributes: PolyAttributes) -> Self {
        Self { vert, color, state: PolyState::ACTIVE, attributes }
    }

    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.state.is_eligible()
    }

    /// The three vertices this polygon uses from `list`
    pub fn vertices(&self, list: &[Vec4]) -> Result<[Vec4; 3], RenderError> {
        let mut out = [Vec4::ZERO; 3];
        for (slot, &index) in out.iter_mut().zip(&self.vert) {
            *slot = *list.get(index).ok_or_else(|| {
                RenderError::StateViolation(format!(
                    "polygon references vertex {} of a {}-vertex list",
                    index,
                    list.len()
                ))
            })?;
        }
        Ok(out)
    }
}

/// Self-contained polygon snapshot stored in a render list
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderPoly {
    pub local: [Vec4; 3],
    pub trans: [Vec4; 3],
    pub color: Color,
    pub state: PolyState,
    pub attributes: PolyAttributes,
}

impl RenderPoly {
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.state.is_eligible()
    }
}

/// Back-face test shared by object and list polygons; updates `state` and
/// returns true if the polygon was newly marked.
pub(crate) fn mark_back_face(
    state: &mut PolyState,
    attributes: PolyAttributes,
    v: [Vec4; 3],
    eye: Vec4,
) -> bool {
    if !state.is_eligible() || attributes.contains(PolyAttributes::TWO_SIDED) {
        return false;
    }
    if is_back_face(v[0], v[1], v[2], eye) {
        state.insert(PolyState::BACKFACE);
        true
    } else {
        false
    }
}

/// Near/far rejection in camera space; returns true if newly clipped.
///
/// A polygon is clipped when any vertex is nearer than `near` (it could not
/// be projected) or every vertex is beyond `far`.
pub(crate) fn mark_clipped(state: &mut PolyState, v: [Vec4; 3], near: f64, far: f64) -> bool {
    if !state.is_eligible() {
        return false;
    }
    let too_near = v.iter().any(|p| p.z < near);
    let too_far = v.iter().all(|p| p.z > far);
    if too_near || too_far {
        state.insert(PolyState::CLIPPED);
        true
    } else {
        false
    }
}

/// Draw the three edges of a screen-space triangle
pub(crate) fn draw_triangle<S: PresentationSink>(
    screen: &mut Screen<S>,
    v: [Vec4; 3],
    color: Color,
    buffer: BufferSelect,
) -> Result<(), RenderError> {
    for (a, b) in [(0, 1), (1, 2), (2, 0)] {
        screen.draw_line(v[a].x, v[a].y, v[b].x, v[b].y, color, buffer)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> [Vec4; 3] {
        [Vec4::point(0.0, 0.0, 0.0), Vec4::point(1.0, 0.0, 0.0), Vec4::point(0.0, 1.0, 0.0)]
    }

    #[test]
    fn test_eligibility() {
        assert!(PolyState::ACTIVE.is_eligible());
        assert!(!PolyState::empty().is_eligible());
        assert!(!(PolyState::ACTIVE | PolyState::CLIPPED).is_eligible());
        assert!(!(PolyState::ACTIVE | PolyState::BACKFACE).is_eligible());
    }

    #[test]
    fn test_reset_only_touches_active() {
        let mut s = PolyState::ACTIVE | PolyState::CLIPPED | PolyState::BACKFACE;
        s.reset();
        assert_eq!(s, PolyState::ACTIVE);
        s.reset();
        assert_eq!(s, PolyState::ACTIVE);

        let mut inactive = PolyState::BACKFACE;
        inactive.reset();
        assert_eq!(inactive, PolyState::BACKFACE);
    }

    #[test]
    fn test_mark_back_face() {
        let mut state = PolyState::ACTIVE;
        assert!(!mark_back_face(&mut state, PolyAttributes::empty(), tri(), Vec4::point(0.0, 0.0, 5.0)));
        assert!(mark_back_face(&mut state, PolyAttributes::empty(), tri(), Vec4::point(0.0, 0.0, -5.0)));
        assert!(state.contains(PolyState::BACKFACE));
    }

    #[test]
    fn test_two_sided_never_back_face() {
        let mut state = PolyState::ACTIVE;
        assert!(!mark_back_face(&mut state, PolyAttributes::TWO_SIDED, tri(), Vec4::point(0.0, 0.0, -5.0)));
        assert!(state.is_eligible());
    }

    #[test]
    fn test_mark_clipped() {
        let near = [Vec4::point(0.0, 0.0, 0.5), Vec4::point(1.0, 0.0, 2.0), Vec4::point(0.0, 1.0, 2.0)];
        let mut state = PolyState::ACTIVE;
        assert!(mark_clipped(&mut state, near, 1.0, 100.0));

        let far = [Vec4::point(0.0, 0.0, 200.0), Vec4::point(1.0, 0.0, 150.0), Vec4::point(0.0, 1.0, 101.0)];
        let mut state = PolyState::ACTIVE;
        assert!(mark_clipped(&mut state, far, 1.0, 100.0));

        let straddle = [Vec4::point(0.0, 0.0, 50.0), Vec4::point(1.0, 0.0, 150.0), Vec4::point(0.0, 1.0, 2.0)];
        let mut state = PolyState::ACTIVE;
        assert!(!mark_clipped(&mut state, straddle, 1.0, 100.0));
        assert!(state.is_eligible());
    }

    #[test]
    fn test_vertices_lookup() {
        let list = tri();
        let poly = Poly4D::new([2, 0, 1], Color::WHITE, PolyAttributes::empty());
        assert_eq!(poly.vertices(&list).unwrap()[0], list[2]);
        let bad = Poly4D::new([0, 1, 3], Color::WHITE, PolyAttributes::empty());
        assert!(matches!(bad.vertices(&list), Err(RenderError::StateViolation(_))));
    }
}
