//! Software wireframe pipeline
//!
//! Objects move through local, world, camera, perspective and screen space
//! and their edges are drawn into a [`wire4d_screen::Screen`].
//!
//! ## Key Components
//!
//! - [`Camera4D`] - projection state and the world/perspective/screen matrices
//! - [`Object4D`] - a mesh with local and transformed vertex lists
//! - [`RenderList4D`] - reusable polygon buffer for batching many objects
//! - [`Scene`] - object container keyed by [`ObjectKey`]
//! - [`FramePipeline`] - runs every stage for a scene and flips the screen
//!
//! Polygon visibility is tracked with [`PolyState`]: a polygon takes part in
//! a stage only while it is ACTIVE and neither CLIPPED nor BACKFACE.

pub mod camera4d;
pub mod error;
pub mod frame;
pub mod object;
pub mod pipeline;
pub mod poly;
pub mod render_list;
pub mod scene;

pub use camera4d::{Camera4D, CameraModel, CameraSettings, ClipPlanes, UvnMode};
pub use error::RenderError;
pub use frame::{FramePipeline, FrameStats, PipelineMode};
pub use object::{CullPlanes, Mesh, Object4D, ObjectState, Pose};
pub use pipeline::{Projection, TransCoord};
pub use poly::{Poly4D, PolyAttributes, PolyState, RenderPoly};
pub use render_list::RenderList4D;
pub use scene::{ObjectKey, Scene};

// Re-export the lower layers for convenience
pub use wire4d_math::{Mat4, RotationOrder, Vec3, Vec4};
pub use wire4d_screen::{BufferSelect, Color, PresentationSink, Screen};
