//! Camera with Euler or UVN orientation
//!
//! The camera owns the projection state (clip distances, field of view,
//! viewport, view plane) and the three pipeline matrices:
//!
//! - `mcam`: world to camera, rebuilt by [`Camera4D::build_world_to_camera`]
//! - `mper`: camera to perspective (homogeneous)
//! - `mscr`: perspective to screen (Cartesian input)
//!
//! Nothing is rebuilt implicitly; call the build methods after moving the
//! camera, at most once per frame.

use wire4d_math::{degree_to_radian, Mat4, Plane3D, RotationOrder, Vec2, Vec3, Vec4};

use crate::pipeline;
use crate::RenderError;

/// How the world-to-camera rotation is derived
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CameraModel {
    /// Inverse Euler rotation by `direction`, composed in `rotation_order`
    #[default]
    Euler,
    /// Orthonormal U/V/N basis aimed at a target
    Uvn,
}

/// How a UVN camera finds its target
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UvnMode {
    /// Use `target` as given
    #[default]
    Simple,
    /// Derive the target from `direction.x` (elevation from +y) and
    /// `direction.y` (heading)
    Spherical,
}

/// Construction parameters for [`Camera4D`]
#[derive(Clone, Debug, PartialEq)]
pub struct CameraSettings {
    pub model: CameraModel,
    pub position: Vec3,
    /// Euler angles (radians) about x, y, z
    pub direction: Vec3,
    pub target: Vec3,
    pub near_clip_z: f64,
    pub far_clip_z: f64,
    /// Horizontal field of view in degrees
    pub fov: f64,
    pub viewport_width: usize,
    pub viewport_height: usize,
    pub rotation_order: RotationOrder,
    pub uvn_mode: UvnMode,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            model: CameraModel::Euler,
            position: Vec3::ZERO,
            direction: Vec3::ZERO,
            target: Vec3::ZERO,
            near_clip_z: 1.0,
            far_clip_z: 1000.0,
            fov: 90.0,
            viewport_width: 640,
            viewport_height: 480,
            rotation_order: RotationOrder::Xyz,
            uvn_mode: UvnMode::Simple,
        }
    }
}

/// Side clip planes in camera space, all through the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClipPlanes {
    pub right: Plane3D,
    pub left: Plane3D,
    pub top: Plane3D,
    pub bottom: Plane3D,
}

/// Camera for the wireframe pipeline
#[derive(Clone, Debug)]
pub struct Camera4D {
    pub model: CameraModel,
    pub rotation_order: RotationOrder,
    pub uvn_mode: UvnMode,
    /// World position (w = 1)
    pub position: Vec4,
    /// Euler angles, or elevation/heading in spherical UVN mode
    pub direction: Vec3,
    /// Look-at target for UVN cameras (w = 1)
    pub target: Vec4,
    /// Camera basis, valid after a UVN build
    pub u: Vec4,
    pub v: Vec4,
    pub n: Vec4,

    pub near_clip_z: f64,
    pub far_clip_z: f64,
    pub fov: f64,
    pub viewport_width: usize,
    pub viewport_height: usize,
    pub viewport_center: Vec2,
    pub aspect_ratio: f64,
    pub view_plane_width: f64,
    pub view_plane_height: f64,
    pub view_dist: f64,
    pub clip_planes: ClipPlanes,

    pub mcam: Mat4,
    pub mper: Mat4,
    pub mscr: Mat4,
}

impl Camera4D {
    /// Create a camera, deriving the view plane, view distance and clip
    /// planes. Matrices start as identity.
    pub fn new(settings: CameraSettings) -> Result<Self, RenderError> {
        let CameraSettings {
            model,
            position,
            direction,
            target,
            near_clip_z,
            far_clip_z,
            fov,
            viewport_width,
            viewport_height,
            rotation_order,
            uvn_mode,
        } = settings;

        if viewport_width == 0 || viewport_height == 0 {
            return Err(RenderError::InvalidArgument(format!(
                "viewport must be non-empty, got {}x{}",
                viewport_width, viewport_height
            )));
        }
        if !(fov > 0.0 && fov < 180.0) {
            return Err(RenderError::OutOfRange {
                what: "field of view",
                value: fov,
                min: 0.0,
                max: 180.0,
            });
        }
        if !(near_clip_z > 0.0) {
            return Err(RenderError::OutOfRange {
                what: "near clip distance",
                value: near_clip_z,
                min: 0.0,
                max: f64::INFINITY,
            });
        }
        if !(far_clip_z > near_clip_z) {
            return Err(RenderError::OutOfRange {
                what: "far clip distance",
                value: far_clip_z,
                min: near_clip_z,
                max: f64::INFINITY,
            });
        }

        let aspect_ratio = viewport_width as f64 / viewport_height as f64;
        let view_plane_width = 2.0;
        let view_plane_height = 2.0 / aspect_ratio;
        let view_dist = 0.5 * view_plane_width / degree_to_radian(fov / 2.0).tan();
        let clip_planes = Self::derive_clip_planes(fov, view_dist, view_plane_width)?;

        log::debug!(
            "Camera {:?} at {:?}: fov {} view_dist {:.4} viewport {}x{}",
            model,
            position,
            fov,
            view_dist,
            viewport_width,
            viewport_height
        );

        Ok(Self {
            model,
            rotation_order,
            uvn_mode,
            position: Vec4::from(position),
            direction,
            target: Vec4::from(target),
            u: Vec4::direction(1.0, 0.0, 0.0),
            v: Vec4::direction(0.0, 1.0, 0.0),
            n: Vec4::direction(0.0, 0.0, 1.0),
            near_clip_z,
            far_clip_z,
            fov,
            viewport_width,
            viewport_height,
            viewport_center: Vec2::new(
                (viewport_width as f64 - 1.0) / 2.0,
                (viewport_height as f64 - 1.0) / 2.0,
            ),
            aspect_ratio,
            view_plane_width,
            view_plane_height,
            view_dist,
            clip_planes,
            mcam: Mat4::IDENTITY,
            mper: Mat4::IDENTITY,
            mscr: Mat4::IDENTITY,
        })
    }

    fn derive_clip_planes(
        fov: f64,
        view_dist: f64,
        view_plane_width: f64,
    ) -> Result<ClipPlanes, RenderError> {
        let plane = |x: f64, y: f64, z: f64| Plane3D::new(Vec3::ZERO, Vec3::new(x, y, z), true);
        let planes = if fov == 90.0 {
            ClipPlanes {
                right: plane(1.0, 0.0, -1.0)?,
                left: plane(-1.0, 0.0, -1.0)?,
                top: plane(0.0, 1.0, -1.0)?,
                bottom: plane(0.0, -1.0, -1.0)?,
            }
        } else {
            let half = view_plane_width / 2.0;
            ClipPlanes {
                right: plane(view_dist, 0.0, -half)?,
                left: plane(-view_dist, 0.0, -half)?,
                top: plane(0.0, view_dist, -half)?,
                bottom: plane(0.0, -view_dist, -half)?,
            }
        };
        Ok(planes)
    }

    /// Inverse translation by the camera position
    fn inverse_translation(&self) -> Mat4 {
        Mat4::translation(-self.position.xyz())
    }

    /// World-to-camera from Euler angles: inverse translation followed by
    /// the per-axis rotations with negated angles, composed in `order`.
    pub fn build_world_to_camera_euler(&mut self, order: RotationOrder) {
        let inverse_rotation = Mat4::rotation(-self.direction, order);
        self.mcam = self.inverse_translation() * inverse_rotation;
    }

    /// World-to-camera from a U/V/N basis aimed at the target.
    ///
    /// `N` points from the camera to the target, `U = up × N` and `V = N × U`
    /// with world up `+y`. Fails with `DegenerateVector` if the camera sits on
    /// its target or looks straight up or down.
    pub fn build_world_to_camera_uvn(&mut self, mode: UvnMode) -> Result<(), RenderError> {
        if mode == UvnMode::Spherical {
            let (sin_phi, cos_phi) = self.direction.x.sin_cos();
            let (sin_theta, cos_theta) = self.direction.y.sin_cos();
            let dir = Vec4::point(-sin_phi * sin_theta, cos_phi, sin_phi * cos_theta);
            self.target = self.position + dir;
        }

        let n = Vec4::between(self.position, self.target).normalized()?;
        let up = Vec4::point(0.0, 1.0, 0.0);
        let u = up.cross(n).normalized()?;
        let v = n.cross(u);

        let muvn = Mat4::new([
            [u.x, v.x, n.x, 0.0],
            [u.y, v.y, n.y, 0.0],
            [u.z, v.z, n.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        self.u = Vec4::direction(u.x, u.y, u.z);
        self.v = Vec4::direction(v.x, v.y, v.z);
        self.n = Vec4::direction(n.x, n.y, n.z);
        self.mcam = self.inverse_translation() * muvn;
        Ok(())
    }

    /// Rebuild `mcam` using the camera's own model, order and UVN mode
    pub fn build_world_to_camera(&mut self) -> Result<(), RenderError> {
        match self.model {
            CameraModel::Euler => {
                self.build_world_to_camera_euler(self.rotation_order);
                Ok(())
            }
            CameraModel::Uvn => self.build_world_to_camera_uvn(self.uvn_mode),
        }
    }

    pub fn build_camera_to_perspective_matrix(&self) -> Mat4 {
        pipeline::build_camera_to_perspective_matrix(self.view_dist, self.aspect_ratio)
    }

    pub fn build_perspective_to_screen_4d_matrix(&self) -> Mat4 {
        pipeline::build_perspective_to_screen_4d_matrix(self.viewport_width, self.viewport_height)
    }

    pub fn build_perspective_to_screen_matrix(&self) -> Mat4 {
        pipeline::build_perspective_to_screen_matrix(self.viewport_width, self.viewport_height)
    }

    /// Store `mper` and `mscr` on the camera
    pub fn build_projection_matrices(&mut self) {
        self.mper = self.build_camera_to_perspective_matrix();
        self.mscr = self.build_perspective_to_screen_matrix();
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = Vec4::from(position);
    }

    pub fn set_direction(&mut self, direction: Vec3) {
        self.direction = direction;
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = Vec4::from(target);
    }

    /// Transform a world point into camera space with the current `mcam`
    #[inline]
    pub fn world_to_camera(&self, p: Vec4) -> Vec4 {
        p * self.mcam
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    fn camera(settings: CameraSettings) -> Camera4D {
        Camera4D::new(settings).unwrap()
    }

    #[test]
    fn test_derived_view_parameters() {
        let cam = camera(CameraSettings {
            viewport_width: 100,
            viewport_height: 50,
            ..Default::default()
        });
        assert!(approx_eq(cam.aspect_ratio, 2.0));
        assert!(approx_eq(cam.view_plane_width, 2.0));
        assert!(approx_eq(cam.view_plane_height, 1.0));
        assert!(approx_eq(cam.view_dist, 1.0));
        assert_eq!(cam.viewport_center, Vec2::new(49.5, 24.5));
    }

    #[test]
    fn test_view_dist_for_60_degrees() {
        let cam = camera(CameraSettings { fov: 60.0, ..Default::default() });
        assert!(approx_eq(cam.view_dist, 1.0 / (30.0_f64).to_radians().tan()));
    }

    #[test]
    fn test_clip_planes_90_degrees() {
        let cam = camera(CameraSettings::default());
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!(approx_eq(cam.clip_planes.right.normal.x, h));
        assert!(approx_eq(cam.clip_planes.right.normal.z, -h));
        assert!(approx_eq(cam.clip_planes.bottom.normal.y, -h));
        // A point on the right edge of the frustum lies on the right plane
        let edge = Vec3::new(3.0, 0.0, 3.0);
        assert!(approx_eq(cam.clip_planes.right.signed_distance(edge), 0.0));
    }

    #[test]
    fn test_clip_planes_general_match_90_degree_case() {
        // Just below 90 degrees the general formula must approach the special case
        let near = camera(CameraSettings { fov: 89.9999999, ..Default::default() });
        let exact = camera(CameraSettings::default());
        let a = near.clip_planes.left.normal;
        let b = exact.clip_planes.left.normal;
        assert!((a.x - b.x).abs() < 1e-6 && (a.z - b.z).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(Camera4D::new(CameraSettings { fov: 0.0, ..Default::default() }).is_err());
        assert!(Camera4D::new(CameraSettings { fov: 180.0, ..Default::default() }).is_err());
        assert!(Camera4D::new(CameraSettings { near_clip_z: 0.0, ..Default::default() }).is_err());
        assert!(Camera4D::new(CameraSettings { far_clip_z: 0.5, ..Default::default() }).is_err());
        assert!(matches!(
            Camera4D::new(CameraSettings { viewport_width: 0, ..Default::default() }),
            Err(RenderError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_euler_identity_at_origin() {
        let mut cam = camera(CameraSettings::default());
        cam.build_world_to_camera_euler(RotationOrder::Xyz);
        assert_eq!(cam.mcam, Mat4::IDENTITY);
    }

    #[test]
    fn test_euler_translation() {
        let mut cam = camera(CameraSettings {
            position: Vec3::new(0.0, 0.0, -5.0),
            ..Default::default()
        });
        cam.build_world_to_camera_euler(RotationOrder::Xyz);
        let p = cam.world_to_camera(Vec4::point(0.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_euler_rotation_is_inverse() {
        // Camera turned a quarter turn about y: the world turns the other way
        let mut cam = camera(CameraSettings {
            direction: Vec3::new(0.0, FRAC_PI_2, 0.0),
            ..Default::default()
        });
        cam.build_world_to_camera_euler(RotationOrder::Xyz);
        let p = cam.world_to_camera(Vec4::point(1.0, 0.0, 0.0));
        let expected = Vec4::point(1.0, 0.0, 0.0) * Mat4::rotation_y(-FRAC_PI_2);
        assert!(vec_approx_eq(p, expected));
        assert!(vec_approx_eq(p, Vec4::point(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_uvn_looks_down_positive_z() {
        let mut cam = camera(CameraSettings {
            model: CameraModel::Uvn,
            position: Vec3::new(0.0, 0.0, -5.0),
            target: Vec3::ZERO,
            ..Default::default()
        });
        cam.build_world_to_camera().unwrap();
        assert!(vec_approx_eq(cam.u, Vec4::direction(1.0, 0.0, 0.0)));
        assert!(vec_approx_eq(cam.v, Vec4::direction(0.0, 1.0, 0.0)));
        assert!(vec_approx_eq(cam.n, Vec4::direction(0.0, 0.0, 1.0)));
        let p = cam.world_to_camera(Vec4::point(1.0, 2.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(1.0, 2.0, 5.0)));
    }

    #[test]
    fn test_uvn_target_to_the_side() {
        let mut cam = camera(CameraSettings {
            model: CameraModel::Uvn,
            target: Vec3::new(10.0, 0.0, 0.0),
            ..Default::default()
        });
        cam.build_world_to_camera().unwrap();
        let p = cam.world_to_camera(Vec4::point(10.0, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec4::point(0.0, 0.0, 10.0)));
    }

    #[test]
    fn test_uvn_degenerate() {
        let mut cam = camera(CameraSettings {
            model: CameraModel::Uvn,
            target: Vec3::new(0.0, 5.0, 0.0),
            ..Default::default()
        });
        assert!(matches!(cam.build_world_to_camera(), Err(RenderError::Math(_))));

        let mut on_target = camera(CameraSettings { model: CameraModel::Uvn, ..Default::default() });
        assert!(on_target.build_world_to_camera().is_err());
    }

    #[test]
    fn test_uvn_spherical_target() {
        // Elevation 90 degrees, heading 0: looking along +z
        let mut cam = camera(CameraSettings {
            model: CameraModel::Uvn,
            uvn_mode: UvnMode::Spherical,
            position: Vec3::new(1.0, 2.0, 3.0),
            direction: Vec3::new(FRAC_PI_2, 0.0, 0.0),
            ..Default::default()
        });
        cam.build_world_to_camera().unwrap();
        assert!(vec_approx_eq(cam.target, Vec4::point(1.0, 2.0, 4.0)));
        assert!(vec_approx_eq(cam.n, Vec4::direction(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_projection_matrices() {
        let mut cam = camera(CameraSettings {
            viewport_width: 100,
            viewport_height: 100,
            ..Default::default()
        });
        cam.build_projection_matrices();
        let p = (Vec4::point(1.0, 1.0, 2.0) * cam.mper).to_cartesian().unwrap();
        assert!(approx_eq(p.x, 0.5));
        assert!(approx_eq(p.y, 0.5));
        let s = p * cam.mscr;
        assert!(approx_eq(s.x, 74.25));
        assert!(approx_eq(s.y, 24.75));
    }
}
