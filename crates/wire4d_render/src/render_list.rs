//! Render list: a reusable per-frame polygon buffer
//!
//! Polygons from any number of objects are copied into slots that are reused
//! across frames. `reset_this` only sets the live count back to zero; slots at
//! or past the count are stale and never read. Stages walk the live slots
//! through an index array, so sorting can reorder polygons without moving
//! them.

use wire4d_math::{Mat4, Vec4};
use wire4d_screen::{BufferSelect, PresentationSink, Screen};

use crate::pipeline::vertex::{self, ensure_homogeneous, ensure_in_front, homogeneous_divide};
use crate::pipeline::{Projection, TransCoord};
use crate::poly::{draw_triangle, mark_back_face, mark_clipped};
use crate::{Camera4D, Object4D, PolyState, RenderError, RenderPoly};

#[derive(Clone, Debug, Default)]
pub struct RenderList4D {
    slots: Vec<RenderPoly>,
    order: Vec<usize>,
    count: usize,
}

impl RenderList4D {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            order: Vec::with_capacity(capacity),
            count: 0,
        }
    }

    /// Number of live polygons
    #[inline]
    pub fn poly_count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Allocated slots, live or stale
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Forget every polygon; slots are kept for reuse
    pub fn reset_this(&mut self) {
        self.count = 0;
    }

    /// Live polygons in list order
    pub fn polys(&self) -> impl Iterator<Item = &RenderPoly> + '_ {
        self.order[..self.count].iter().map(move |&i| &self.slots[i])
    }

    /// Live slots in storage order; `order[..count]` only permutes these
    fn live_mut(&mut self) -> impl Iterator<Item = &mut RenderPoly> + '_ {
        self.slots[..self.count].iter_mut()
    }

    /// Append one polygon snapshot
    pub fn insert_poly(&mut self, poly: RenderPoly) {
        if self.count < self.slots.len() {
            self.slots[self.count] = poly;
        } else {
            self.slots.push(poly);
        }
        if self.count < self.order.len() {
            self.order[self.count] = self.count;
        } else {
            self.order.push(self.count);
        }
        self.count += 1;
    }

    /// Copy every eligible polygon of `obj` into the list.
    ///
    /// With `insert_local` the polygon's transformed vertices start as copies
    /// of the local ones; otherwise they come from the object's transformed
    /// list. Culled objects contribute nothing. Returns the number inserted.
    pub fn insert_object(
        &mut self,
        obj: &Object4D,
        insert_local: bool,
    ) -> Result<usize, RenderError> {
        if obj.is_culled() {
            return Ok(0);
        }
        let mut inserted = 0;
        for poly in obj.polys().iter().filter(|p| p.is_eligible()) {
            let local = poly.vertices(obj.vertices_local())?;
            let trans = if insert_local { local } else { poly.vertices(obj.vertices_trans())? };
            self.insert_poly(RenderPoly {
                local,
                trans,
                color: poly.color,
                state: poly.state,
                attributes: poly.attributes,
            });
            inserted += 1;
        }
        log::trace!("render list: {} polys from '{}'", inserted, obj.name());
        Ok(inserted)
    }

    /// Clear CLIPPED/BACKFACE on every live active polygon
    pub fn reset_states(&mut self) {
        for poly in self.live_mut() {
            poly.state.reset();
        }
    }

    /// Translate every live polygon by `world_pos`
    pub fn model_to_world_this(&mut self, world_pos: Vec4, coord: TransCoord) {
        for poly in self.live_mut() {
            vertex::apply(coord, &mut poly.local, &mut poly.trans, |v| v + world_pos);
        }
    }

    /// Multiply every live polygon by `m`
    pub fn transform_this(&mut self, m: &Mat4, coord: TransCoord) {
        for poly in self.live_mut() {
            vertex::apply(coord, &mut poly.local, &mut poly.trans, |v| v * *m);
        }
    }

    /// World-space back-face test on the transformed vertices
    pub fn remove_back_faces_this(&mut self, cam: &Camera4D) -> usize {
        let eye = cam.position;
        self.live_mut()
            .map(|poly| mark_back_face(&mut poly.state, poly.attributes, poly.trans, eye))
            .filter(|&marked| marked)
            .count()
    }

    fn map_eligible(&mut self, f: impl Fn(Vec4) -> Vec4) {
        for poly in self.live_mut().filter(|p| p.is_eligible()) {
            for v in &mut poly.trans {
                *v = f(*v);
            }
        }
    }

    fn check_eligible(
        &self,
        check: fn(Vec4, &str) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        for (n, poly) in self.polys().enumerate().filter(|(_, p)| p.is_eligible()) {
            for (k, v) in poly.trans.iter().enumerate() {
                check(*v, &format!("vertex {} of list polygon {}", k, n))?;
            }
        }
        Ok(())
    }

    pub fn world_to_camera_this(&mut self, cam: &Camera4D) {
        let mcam = cam.mcam;
        self.map_eligible(|v| v * mcam);
    }

    /// Near/far rejection in camera space. Returns how many were clipped.
    pub fn clip_this(&mut self, cam: &Camera4D) -> usize {
        let (near, far) = (cam.near_clip_z, cam.far_clip_z);
        self.live_mut()
            .map(|poly| mark_clipped(&mut poly.state, poly.trans, near, far))
            .filter(|&marked| marked)
            .count()
    }

    /// See [`Object4D::camera_to_perspective_this`]
    pub fn camera_to_perspective_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        self.check_eligible(ensure_in_front)?;
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.perspective(v));
        Ok(())
    }

    pub fn convert_from_homogeneous_this(&mut self) -> Result<(), RenderError> {
        self.check_eligible(ensure_homogeneous)?;
        self.map_eligible(homogeneous_divide);
        Ok(())
    }

    pub fn perspective_to_screen_this(&mut self, cam: &Camera4D) {
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.screen(v));
    }

    pub fn camera_to_screen_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        self.check_eligible(ensure_in_front)?;
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.screen(proj.perspective(v)));
        Ok(())
    }

    /// Draw every eligible polygon in list order. Returns how many were drawn.
    pub fn draw_wire<S: PresentationSink>(
        &self,
        screen: &mut Screen<S>,
        buffer: BufferSelect,
    ) -> Result<usize, RenderError> {
        let mut drawn = 0;
        for poly in self.polys().filter(|p| p.is_eligible()) {
            draw_triangle(screen, poly.trans, poly.color, buffer)?;
            drawn += 1;
        }
        Ok(drawn)
    }

    /// Count of live polygons carrying `flag`
    pub fn count_with(&self, flag: PolyState) -> usize {
        self.polys().filter(|p| p.state.contains(flag)).count()
    }
}
