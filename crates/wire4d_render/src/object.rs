//! Objects: a mesh with its own local and transformed vertex lists
//!
//! Per-frame order of the object stages:
//!
//! 1. [`Object4D::reset_this`]
//! 2. [`Object4D::model_to_world_this`]
//! 3. [`Object4D::cull_this`]
//! 4. [`Object4D::remove_back_faces_this`]
//! 5. [`Object4D::world_to_camera_this`]
//! 6. [`Object4D::camera_to_perspective_this`]
//! 7. [`Object4D::perspective_to_screen_this`]
//! 8. [`Object4D::draw_wire`]
//!
//! Once [`ObjectState::CULLED`] is set, every later stage is a no-op until the
//! next reset.

use bitflags::bitflags;
use wire4d_math::{Mat4, RotationOrder, Vec3, Vec4};
use wire4d_screen::{BufferSelect, Color, PresentationSink, Screen};

use crate::pipeline::vertex::{self, ensure_homogeneous, ensure_in_front, homogeneous_divide};
use crate::pipeline::{build_model_to_world_matrix, Projection, TransCoord};
use crate::poly::{draw_triangle, mark_back_face, mark_clipped};
use crate::{Camera4D, Poly4D, PolyAttributes, RenderError};

bitflags! {
    /// Object-level state
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ObjectState: u8 {
        const ACTIVE = 1 << 0;
        const VISIBLE = 1 << 1;
        /// Outside the view volume this frame
        const CULLED = 1 << 2;
    }
}

bitflags! {
    /// Which view-volume bounds [`Object4D::cull_this`] tests
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct CullPlanes: u8 {
        const X = 1 << 0;
        const Y = 1 << 1;
        const Z = 1 << 2;
        const ALL = Self::X.bits() | Self::Y.bits() | Self::Z.bits();
    }
}

/// Geometry an object is built from
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    /// Counter-clockwise vertex index triples
    pub polys: Vec<[usize; 3]>,
    /// One color per polygon; extra entries are ignored
    pub colors: Vec<Color>,
    /// Attributes applied to every polygon
    pub attributes: PolyAttributes,
}

/// Placement baked into an object at construction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub scale: Vec3,
    pub position: Vec3,
    /// Rotation angles (radians) about x, y, z, applied in XYZ order
    pub rotation: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            scale: Vec3::new(1.0, 1.0, 1.0),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        }
    }
}

/// A renderable object
#[derive(Clone, Debug)]
pub struct Object4D {
    id: u32,
    name: String,
    pub state: ObjectState,
    max_radius: f64,
    /// World position (w = 1)
    pub world_pos: Vec4,
    ux: Vec4,
    uy: Vec4,
    uz: Vec4,
    vlist_local: Vec<Vec4>,
    vlist_trans: Vec<Vec4>,
    polys: Vec<Poly4D>,
}

impl Object4D {
    /// Build an object, baking scale and rotation into the local vertices.
    ///
    /// Fails with `InvalidArgument` on an empty vertex list or too few
    /// colors, and `OutOfRange` on a polygon index past the vertex list.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        mesh: Mesh,
        pose: Pose,
    ) -> Result<Self, RenderError> {
        let name = name.into();
        let Mesh { vertices, polys, colors, attributes } = mesh;

        if vertices.is_empty() {
            return Err(RenderError::InvalidArgument(format!("object '{}' has no vertices", name)));
        }
        if colors.len() < polys.len() {
            return Err(RenderError::InvalidArgument(format!(
                "object '{}' has {} polygons but only {} colors",
                name,
                polys.len(),
                colors.len()
            )));
        }
        let max_index = vertices.len() - 1;
        for tri in &polys {
            if let Some(&bad) = tri.iter().find(|&&i| i > max_index) {
                return Err(RenderError::OutOfRange {
                    what: "polygon vertex index",
                    value: bad as f64,
                    min: 0.0,
                    max: max_index as f64,
                });
            }
        }

        let bake = Mat4::scale(pose.scale) * Mat4::rotation(pose.rotation, RotationOrder::Xyz);
        let vlist_local: Vec<Vec4> = vertices.iter().map(|&v| Vec4::from(v) * bake).collect();
        let max_radius = vlist_local.iter().map(|v| v.length()).fold(0.0, f64::max);
        let polys = polys
            .into_iter()
            .zip(colors)
            .map(|(vert, color)| Poly4D::new(vert, color, attributes))
            .collect();

        log::debug!(
            "Object {} '{}': {} vertices, radius {:.3}",
            id,
            name,
            vlist_local.len(),
            max_radius
        );

        Ok(Self {
            id,
            name,
            state: ObjectState::ACTIVE | ObjectState::VISIBLE,
            max_radius,
            world_pos: Vec4::from(pose.position),
            ux: Vec4::direction(1.0, 0.0, 0.0),
            uy: Vec4::direction(0.0, 1.0, 0.0),
            uz: Vec4::direction(0.0, 0.0, 1.0),
            vlist_trans: vlist_local.clone(),
            vlist_local,
            polys,
        })
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largest distance of a local vertex from the local origin
    #[inline]
    pub fn max_radius(&self) -> f64 {
        self.max_radius
    }

    #[inline]
    pub fn vert_count(&self) -> usize {
        self.vlist_local.len()
    }

    #[inline]
    pub fn vertices_local(&self) -> &[Vec4] {
        &self.vlist_local
    }

    #[inline]
    pub fn vertices_trans(&self) -> &[Vec4] {
        &self.vlist_trans
    }

    #[inline]
    pub fn polys(&self) -> &[Poly4D] {
        &self.polys
    }

    #[inline]
    pub fn polys_mut(&mut self) -> &mut [Poly4D] {
        &mut self.polys
    }

    /// Local orientation basis (x, y, z axes)
    #[inline]
    pub fn basis(&self) -> [Vec4; 3] {
        [self.ux, self.uy, self.uz]
    }

    #[inline]
    pub fn is_culled(&self) -> bool {
        self.state.contains(ObjectState::CULLED)
    }

    /// Clear CULLED, and CLIPPED/BACKFACE on every active polygon
    pub fn reset_this(&mut self) {
        self.state.remove(ObjectState::CULLED);
        for poly in &mut self.polys {
            poly.state.reset();
        }
    }

    pub fn build_model_to_world_matrix(&self) -> Mat4 {
        build_model_to_world_matrix(self.world_pos)
    }

    /// Translate vertices by the world position
    pub fn model_to_world_this(&mut self, coord: TransCoord) {
        if self.is_culled() {
            return;
        }
        let offset = self.world_pos;
        vertex::apply(coord, &mut self.vlist_local, &mut self.vlist_trans, |v| v + offset);
    }

    /// Multiply vertices by `m`. With `transform_basis` the local basis is
    /// rotated too; use that only with rotation matrices.
    ///
    /// CULLED only blocks writes to the transformed list; `LocalOnly` pose
    /// edits always apply.
    pub fn transform_this(&mut self, m: &Mat4, coord: TransCoord, transform_basis: bool) {
        if self.is_culled() && coord != TransCoord::LocalOnly {
            return;
        }
        vertex::apply(coord, &mut self.vlist_local, &mut self.vlist_trans, |v| v * *m);
        if transform_basis {
            self.ux = self.ux * *m;
            self.uy = self.uy * *m;
            self.uz = self.uz * *m;
        }
    }

    /// Bounding-sphere test against the camera's view volume.
    ///
    /// The sphere is centred on the world position with the object's max
    /// radius. Z compares against the near/far distances; X and Y compare
    /// against the half-extents of the view plane projected to the sphere's
    /// depth. Sets CULLED and returns true when the object is outside.
    pub fn cull_this(&mut self, cam: &Camera4D, planes: CullPlanes) -> bool {
        let center = cam.world_to_camera(self.world_pos);
        let r = self.max_radius;

        let outside_z = planes.contains(CullPlanes::Z)
            && (center.z - r > cam.far_clip_z || center.z + r < cam.near_clip_z);

        let bound = |half_extent: f64| half_extent * center.z / cam.view_dist;
        let outside_x = planes.contains(CullPlanes::X) && {
            let b = bound(0.5 * cam.view_plane_width);
            center.x - r > b || center.x + r < -b
        };
        let outside_y = planes.contains(CullPlanes::Y) && {
            let b = bound(0.5 * cam.view_plane_height);
            center.y - r > b || center.y + r < -b
        };

        if outside_z || outside_x || outside_y {
            log::trace!("cull '{}' at camera {:?} (r = {:.3})", self.name, center, r);
            self.state.insert(ObjectState::CULLED);
            true
        } else {
            false
        }
    }

    /// Mark eligible polygons facing away from the camera as BACKFACE.
    ///
    /// Runs in world space on the transformed list. Returns how many were marked.
    pub fn remove_back_faces_this(&mut self, cam: &Camera4D) -> Result<usize, RenderError> {
        if self.is_culled() {
            return Ok(0);
        }
        let mut marked = 0;
        for poly in &mut self.polys {
            let v = poly.vertices(&self.vlist_trans)?;
            if mark_back_face(&mut poly.state, poly.attributes, v, cam.position) {
                marked += 1;
            }
        }
        Ok(marked)
    }

    /// Indices of transformed vertices used by eligible polygons.
    ///
    /// Fails with `StateViolation` if an eligible polygon points past the
    /// vertex list.
    fn eligible_vertices(&self) -> Result<Vec<usize>, RenderError> {
        let mut used = vec![false; self.vlist_trans.len()];
        for poly in self.polys.iter().filter(|p| p.is_eligible()) {
            poly.vertices(&self.vlist_trans)?;
            for &i in &poly.vert {
                used[i] = true;
            }
        }
        Ok(used.iter().enumerate().filter_map(|(i, &u)| u.then_some(i)).collect())
    }

    fn map_eligible(&mut self, f: impl Fn(Vec4) -> Vec4) -> Result<(), RenderError> {
        for i in self.eligible_vertices()? {
            self.vlist_trans[i] = f(self.vlist_trans[i]);
        }
        Ok(())
    }

    /// Transform the vertices of eligible polygons into camera space
    pub fn world_to_camera_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        if self.is_culled() {
            return Ok(());
        }
        let mcam = cam.mcam;
        self.map_eligible(|v| v * mcam)
    }

    /// Mark polygons outside the near/far distances as CLIPPED (camera
    /// space). Returns how many were marked.
    pub fn clip_this(&mut self, cam: &Camera4D) -> Result<usize, RenderError> {
        if self.is_culled() {
            return Ok(0);
        }
        let mut marked = 0;
        for poly in &mut self.polys {
            let v = poly.vertices(&self.vlist_trans)?;
            if mark_clipped(&mut poly.state, v, cam.near_clip_z, cam.far_clip_z) {
                marked += 1;
            }
        }
        Ok(marked)
    }

    fn check_eligible(
        &self,
        check: fn(Vec4, &str) -> Result<(), RenderError>,
    ) -> Result<(), RenderError> {
        for i in self.eligible_vertices()? {
            check(self.vlist_trans[i], &format!("vertex {} of '{}'", i, self.name))?;
        }
        Ok(())
    }

    /// Perspective projection with the divide folded in.
    ///
    /// Fails with `StateViolation`, before touching any vertex, if an
    /// eligible vertex has `z <= 0`.
    pub fn camera_to_perspective_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        if self.is_culled() {
            return Ok(());
        }
        self.check_eligible(ensure_in_front)?;
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.perspective(v))
    }

    /// Divide eligible vertices by w (matrix path, after `mper`)
    pub fn convert_from_homogeneous_this(&mut self) -> Result<(), RenderError> {
        if self.is_culled() {
            return Ok(());
        }
        self.check_eligible(ensure_homogeneous)?;
        self.map_eligible(homogeneous_divide)
    }

    /// Map perspective coordinates of eligible vertices to pixels
    pub fn perspective_to_screen_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        if self.is_culled() {
            return Ok(());
        }
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.screen(v))
    }

    /// Perspective and screen mapping in one pass
    pub fn camera_to_screen_this(&mut self, cam: &Camera4D) -> Result<(), RenderError> {
        if self.is_culled() {
            return Ok(());
        }
        self.check_eligible(ensure_in_front)?;
        let proj = Projection::from_camera(cam);
        self.map_eligible(|v| proj.screen(proj.perspective(v)))
    }

    /// Draw the edges of every eligible polygon. Returns how many were drawn.
    pub fn draw_wire<S: PresentationSink>(
        &self,
        screen: &mut Screen<S>,
        buffer: BufferSelect,
    ) -> Result<usize, RenderError> {
        if self.is_culled() {
            return Ok(0);
        }
        let mut drawn = 0;
        for poly in self.polys.iter().filter(|p| p.is_eligible()) {
            draw_triangle(screen, poly.vertices(&self.vlist_trans)?, poly.color, buffer)?;
            drawn += 1;
        }
        Ok(drawn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CameraSettings, PolyState};
    use std::f64::consts::FRAC_PI_2;
    use wire4d_screen::NullSink;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn triangle_mesh() -> Mesh {
        Mesh {
            vertices: vec![
                Vec3::new(0.0, 0.0, 0.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            polys: vec![[0, 1, 2]],
            colors: vec![Color::WHITE],
            attributes: PolyAttributes::empty(),
        }
    }

    fn triangle_at(position: Vec3) -> Object4D {
        Object4D::new(1, "tri", triangle_mesh(), Pose { position, ..Default::default() }).unwrap()
    }

    fn camera(settings: CameraSettings) -> Camera4D {
        let mut cam = Camera4D::new(settings).unwrap();
        cam.build_world_to_camera().unwrap();
        cam
    }

    #[test]
    fn test_construction_bakes_pose() {
        let pose = Pose {
            scale: Vec3::new(2.0, 2.0, 2.0),
            position: Vec3::new(5.0, 0.0, 0.0),
            rotation: Vec3::new(0.0, 0.0, FRAC_PI_2),
        };
        let obj = Object4D::new(7, "tri", triangle_mesh(), pose).unwrap();
        let v1 = obj.vertices_local()[1];
        // (1,0,0) scaled by 2 then turned a quarter about z
        assert!(approx_eq(v1.x, 0.0));
        assert!(approx_eq(v1.y, 2.0));
        assert_eq!(v1.w, 1.0);
        assert!(approx_eq(obj.max_radius(), 2.0));
        assert_eq!(obj.world_pos, Vec4::point(5.0, 0.0, 0.0));
        assert_eq!(obj.vertices_trans(), obj.vertices_local());
        assert_eq!(obj.state, ObjectState::ACTIVE | ObjectState::VISIBLE);
        assert_eq!(obj.id(), 7);
        assert_eq!(obj.name(), "tri");
    }

    #[test]
    fn test_construction_validation() {
        let mut bad_index = triangle_mesh();
        bad_index.polys = vec![[0, 1, 3]];
        assert!(matches!(
            Object4D::new(1, "x", bad_index, Pose::default()),
            Err(RenderError::OutOfRange { .. })
        ));

        let mut few_colors = triangle_mesh();
        few_colors.colors.clear();
        assert!(matches!(
            Object4D::new(1, "x", few_colors, Pose::default()),
            Err(RenderError::InvalidArgument(_))
        ));

        let empty = Mesh::default();
        assert!(Object4D::new(1, "x", empty, Pose::default()).is_err());
    }

    #[test]
    fn test_model_to_world_coords() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 10.0));
        obj.model_to_world_this(TransCoord::LocalToTrans);
        assert_eq!(obj.vertices_trans()[1], Vec4::point(1.0, 0.0, 10.0));
        assert_eq!(obj.vertices_local()[1], Vec4::point(1.0, 0.0, 0.0));

        obj.model_to_world_this(TransCoord::TransOnly);
        assert_eq!(obj.vertices_trans()[1], Vec4::point(1.0, 0.0, 20.0));

        obj.model_to_world_this(TransCoord::LocalOnly);
        assert_eq!(obj.vertices_local()[1], Vec4::point(1.0, 0.0, 10.0));
    }

    #[test]
    fn test_model_to_world_matrix_matches_direct() {
        let mut direct = triangle_at(Vec3::new(1.0, 2.0, 3.0));
        let mut by_matrix = direct.clone();
        direct.model_to_world_this(TransCoord::LocalToTrans);
        let m = by_matrix.build_model_to_world_matrix();
        by_matrix.transform_this(&m, TransCoord::LocalToTrans, false);
        assert_eq!(direct.vertices_trans(), by_matrix.vertices_trans());
    }

    #[test]
    fn test_transform_rotates_basis() {
        let mut obj = triangle_at(Vec3::ZERO);
        obj.transform_this(&Mat4::rotation_z(FRAC_PI_2), TransCoord::LocalOnly, true);
        let [ux, uy, _] = obj.basis();
        assert!(approx_eq(ux.y, 1.0));
        assert!(approx_eq(uy.x, -1.0));
        assert!(approx_eq(obj.vertices_local()[1].y, 1.0));
    }

    #[test]
    fn test_cull_far_object() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 1000.0));
        assert!(approx_eq(obj.max_radius(), 1.0));

        let cam = camera(CameraSettings { far_clip_z: 500.0, ..Default::default() });
        assert!(obj.cull_this(&cam, CullPlanes::Z));
        assert!(obj.is_culled());

        obj.reset_this();
        let cam = camera(CameraSettings { far_clip_z: 2000.0, ..Default::default() });
        assert!(!obj.cull_this(&cam, CullPlanes::Z));
        assert!(!obj.is_culled());
    }

    #[test]
    fn test_cull_behind_near_plane() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, -10.0));
        let cam = camera(CameraSettings::default());
        assert!(obj.cull_this(&cam, CullPlanes::Z));
    }

    #[test]
    fn test_cull_x_and_y() {
        let cam = camera(CameraSettings {
            viewport_width: 100,
            viewport_height: 100,
            ..Default::default()
        });
        // 90 degree fov: half-width at depth 10 is 10
        let mut right = triangle_at(Vec3::new(12.0, 0.0, 10.0));
        assert!(!right.cull_this(&cam, CullPlanes::Z));
        assert!(right.cull_this(&cam, CullPlanes::X));

        let mut edge = triangle_at(Vec3::new(10.5, 0.0, 10.0));
        assert!(!edge.cull_this(&cam, CullPlanes::X));

        let mut below = triangle_at(Vec3::new(0.0, -12.0, 10.0));
        assert!(!below.cull_this(&cam, CullPlanes::X));
        assert!(below.cull_this(&cam, CullPlanes::ALL));
    }

    #[test]
    fn test_culled_object_skips_stages() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 1000.0));
        obj.model_to_world_this(TransCoord::LocalToTrans);
        let cam = camera(CameraSettings { far_clip_z: 500.0, ..Default::default() });
        obj.cull_this(&cam, CullPlanes::Z);
        let before = obj.vertices_trans().to_vec();

        assert_eq!(obj.remove_back_faces_this(&cam).unwrap(), 0);
        obj.world_to_camera_this(&cam).unwrap();
        obj.camera_to_perspective_this(&cam).unwrap();
        obj.perspective_to_screen_this(&cam).unwrap();
        assert_eq!(obj.vertices_trans(), &before[..]);

        let mut screen = Screen::new(10, 10, NullSink).unwrap();
        assert_eq!(obj.draw_wire(&mut screen, BufferSelect::Secondary).unwrap(), 0);
    }

    #[test]
    fn test_culled_object_still_takes_local_pose_edits() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 1000.0));
        let cam = camera(CameraSettings { far_clip_z: 500.0, ..Default::default() });
        assert!(obj.cull_this(&cam, CullPlanes::Z));
        let trans = obj.vertices_trans().to_vec();
        let spin = Mat4::rotation_z(FRAC_PI_2);

        obj.transform_this(&spin, TransCoord::LocalOnly, true);
        assert!(obj.vertices_local()[1].y > 0.99);
        assert!(obj.basis()[0].y > 0.99);

        // The transformed list is still frozen for the frame
        obj.transform_this(&spin, TransCoord::TransOnly, false);
        assert_eq!(obj.vertices_trans(), &trans[..]);
    }

    #[test]
    fn test_bad_vertex_index_is_a_state_violation() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 4.0));
        obj.model_to_world_this(TransCoord::LocalToTrans);
        obj.polys_mut()[0].vert = [0, 1, 7];
        let cam = camera(CameraSettings::default());
        let before = obj.vertices_trans().to_vec();

        let violation =
            |r: Result<(), RenderError>| matches!(r, Err(RenderError::StateViolation(_)));
        assert!(matches!(
            obj.remove_back_faces_this(&cam),
            Err(RenderError::StateViolation(_))
        ));
        assert!(violation(obj.world_to_camera_this(&cam)));
        assert!(matches!(obj.clip_this(&cam), Err(RenderError::StateViolation(_))));
        assert!(violation(obj.camera_to_perspective_this(&cam)));
        assert!(violation(obj.convert_from_homogeneous_this()));
        assert!(violation(obj.perspective_to_screen_this(&cam)));
        assert!(violation(obj.camera_to_screen_this(&cam)));
        assert_eq!(obj.vertices_trans(), &before[..]);

        let mut screen = Screen::new(10, 10, NullSink).unwrap();
        assert!(matches!(
            obj.draw_wire(&mut screen, BufferSelect::Secondary),
            Err(RenderError::StateViolation(_))
        ));
    }

    #[test]
    fn test_back_faces() {
        let mut obj = triangle_at(Vec3::ZERO);
        obj.model_to_world_this(TransCoord::LocalToTrans);

        let front = camera(CameraSettings { position: Vec3::new(0.0, 0.0, 5.0), ..Default::default() });
        assert_eq!(obj.remove_back_faces_this(&front).unwrap(), 0);
        assert!(obj.polys()[0].is_eligible());

        let back = camera(CameraSettings { position: Vec3::new(0.0, 0.0, -5.0), ..Default::default() });
        assert_eq!(obj.remove_back_faces_this(&back).unwrap(), 1);
        assert!(obj.polys()[0].state.contains(PolyState::BACKFACE));

        obj.reset_this();
        assert!(obj.polys()[0].is_eligible());
    }

    #[test]
    fn test_two_sided_object_keeps_faces() {
        let mut mesh = triangle_mesh();
        mesh.attributes = PolyAttributes::TWO_SIDED;
        let mut obj = Object4D::new(2, "two", mesh, Pose::default()).unwrap();
        obj.model_to_world_this(TransCoord::LocalToTrans);
        let back = camera(CameraSettings { position: Vec3::new(0.0, 0.0, -5.0), ..Default::default() });
        assert_eq!(obj.remove_back_faces_this(&back).unwrap(), 0);
    }

    #[test]
    fn test_perspective_rejects_vertex_at_eye_plane() {
        let mut obj = triangle_at(Vec3::ZERO);
        obj.model_to_world_this(TransCoord::LocalToTrans);
        let cam = camera(CameraSettings::default());
        obj.world_to_camera_this(&cam).unwrap();
        let before = obj.vertices_trans().to_vec();
        assert!(matches!(
            obj.camera_to_perspective_this(&cam),
            Err(RenderError::StateViolation(_))
        ));
        // No partial mutation
        assert_eq!(obj.vertices_trans(), &before[..]);
    }

    #[test]
    fn test_ineligible_vertices_are_not_projected() {
        let mut obj = triangle_at(Vec3::ZERO);
        obj.model_to_world_this(TransCoord::LocalToTrans);
        obj.polys_mut()[0].state.insert(PolyState::CLIPPED);
        let cam = camera(CameraSettings::default());
        // z = 0 everywhere, but nothing is eligible
        obj.camera_to_perspective_this(&cam).unwrap();
        assert_eq!(obj.vertices_trans()[1], Vec4::point(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_clip_this_marks_near_polys() {
        let mut obj = triangle_at(Vec3::new(0.0, 0.0, 0.5));
        obj.model_to_world_this(TransCoord::LocalToTrans);
        let cam = camera(CameraSettings::default());
        obj.world_to_camera_this(&cam).unwrap();
        assert_eq!(obj.clip_this(&cam).unwrap(), 1);
        assert!(obj.polys()[0].state.contains(PolyState::CLIPPED));
        // Clipped polygons make the projection a no-op
        obj.camera_to_perspective_this(&cam).unwrap();
    }

    #[test]
    fn test_direct_and_matrix_paths_agree() {
        let mut cam = camera(CameraSettings {
            position: Vec3::new(0.5, -0.25, -4.0),
            viewport_width: 120,
            viewport_height: 90,
            fov: 70.0,
            ..Default::default()
        });
        cam.build_projection_matrices();

        let mut direct = triangle_at(Vec3::new(0.0, 0.0, 3.0));
        direct.model_to_world_this(TransCoord::LocalToTrans);
        direct.world_to_camera_this(&cam).unwrap();
        let mut by_matrix = direct.clone();
        let mut combined = direct.clone();

        direct.camera_to_perspective_this(&cam).unwrap();
        direct.perspective_to_screen_this(&cam).unwrap();

        by_matrix.transform_this(&cam.mper, TransCoord::TransOnly, false);
        by_matrix.convert_from_homogeneous_this().unwrap();
        by_matrix.transform_this(&cam.mscr, TransCoord::TransOnly, false);

        combined.camera_to_screen_this(&cam).unwrap();

        for ((a, b), c) in direct
            .vertices_trans()
            .iter()
            .zip(by_matrix.vertices_trans())
            .zip(combined.vertices_trans())
        {
            assert!(approx_eq(a.x, b.x) && approx_eq(a.y, b.y), "{:?} vs {:?}", a, b);
            assert!(approx_eq(a.x, c.x) && approx_eq(a.y, c.y), "{:?} vs {:?}", a, c);
        }
    }
}
