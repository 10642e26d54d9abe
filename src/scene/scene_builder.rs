//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for populating a [`Scene`] with wireframe meshes.

use wire4d_math::Vec3;
use wire4d_render::{Mesh, Object4D, PolyAttributes, Pose, RenderError, Scene};
use wire4d_screen::Color;

/// Axis-aligned cube centred on the origin with edge length `size`.
///
/// Triangles wind counter-clockwise when seen from outside.
pub fn cube_mesh(size: f64, color: Color) -> Mesh {
    let h = 0.5 * size;
    let v = |x: f64, y: f64, z: f64| Vec3::new(x * h, y * h, z * h);
    Mesh {
        vertices: vec![
            v(-1.0, -1.0, -1.0),
            v(1.0, -1.0, -1.0),
            v(1.0, 1.0, -1.0),
            v(-1.0, 1.0, -1.0),
            v(-1.0, -1.0, 1.0),
            v(1.0, -1.0, 1.0),
            v(1.0, 1.0, 1.0),
            v(-1.0, 1.0, 1.0),
        ],
        polys: vec![
            [0, 2, 1], [0, 3, 2], // -z
            [4, 5, 6], [4, 6, 7], // +z
            [0, 1, 5], [0, 5, 4], // -y
            [3, 7, 6], [3, 6, 2], // +y
            [0, 4, 7], [0, 7, 3], // -x
            [1, 2, 6], [1, 6, 5], // +x
        ],
        colors: vec![color; 12],
        attributes: PolyAttributes::empty(),
    }
}

/// Square pyramid with its base centred `height / 2` below the origin
pub fn pyramid_mesh(base: f64, height: f64, color: Color) -> Mesh {
    let s = 0.5 * base;
    let h = 0.5 * height;
    Mesh {
        vertices: vec![
            Vec3::new(-s, -h, -s),
            Vec3::new(s, -h, -s),
            Vec3::new(s, -h, s),
            Vec3::new(-s, -h, s),
            Vec3::new(0.0, h, 0.0),
        ],
        polys: vec![
            [0, 1, 2], [0, 2, 3], // base
            [0, 4, 1],
            [1, 4, 2],
            [2, 4, 3],
            [3, 4, 0],
        ],
        colors: vec![color; 6],
        attributes: PolyAttributes::empty(),
    }
}

/// Builder for wireframe scenes
///
/// # Example
/// ```ignore
/// let scene = SceneBuilder::new()
///     .add_cube("cube", 2.0, Vec3::new(-2.0, 0.0, 0.0), Color::GREEN)?
///     .add_pyramid("pyramid", 2.0, 2.5, Vec3::new(2.0, 0.0, 0.0), Color::RED)?
///     .build();
/// ```
pub struct SceneBuilder {
    scene: Scene,
    next_id: u32,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            next_id: 1,
        }
    }

    /// Add an arbitrary mesh. Ids are handed out in insertion order from 1.
    pub fn add_mesh(
        mut self,
        name: &str,
        mesh: Mesh,
        pose: Pose,
    ) -> Result<Self, RenderError> {
        let object = Object4D::new(self.next_id, name, mesh, pose)?;
        self.next_id += 1;
        self.scene.add(object);
        Ok(self)
    }

    pub fn add_cube(
        self,
        name: &str,
        size: f64,
        position: Vec3,
        color: Color,
    ) -> Result<Self, RenderError> {
        self.add_mesh(name, cube_mesh(size, color), Pose { position, ..Default::default() })
    }

    pub fn add_pyramid(
        self,
        name: &str,
        base: f64,
        height: f64,
        position: Vec3,
        color: Color,
    ) -> Result<Self, RenderError> {
        self.add_mesh(
            name,
            pyramid_mesh(base, height, color),
            Pose { position, ..Default::default() },
        )
    }

    /// Number of objects added so far
    pub fn object_count(&self) -> usize {
        self.scene.len()
    }

    /// Build the final scene
    pub fn build(self) -> Scene {
        log::info!(
            "Built scene with {} objects, {} polygons",
            self.scene.len(),
            self.scene.poly_count()
        );
        self.scene
    }

    /// The demo scene: a cube and a pyramid side by side at the origin
    pub fn demo() -> Result<Scene, RenderError> {
        Ok(Self::new()
            .add_cube("cube", 2.0, Vec3::new(-1.8, 0.0, 0.0), Color::GREEN)?
            .add_pyramid("pyramid", 2.0, 2.5, Vec3::new(1.8, 0.0, 0.0), Color::RED)?
            .build())
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
