//! Scene construction utilities
//!
//! This module provides a declarative API for building wireframe scenes
//! and the stock meshes the demo uses.

mod scene_builder;

pub use scene_builder::{cube_mesh, pyramid_mesh, SceneBuilder};
