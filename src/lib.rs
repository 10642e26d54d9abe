//! wire4d - software wireframe renderer
//!
//! Application layer over the `wire4d_*` crates: layered configuration, the
//! demo scene and the frame loop that drives it.

pub mod config;
pub mod scene;
pub mod systems;
