//! Application systems

mod render;

pub use render::RenderSystem;
