//! Tiled double-buffered framebuffer for the wire4d pipeline
//!
//! A [`Screen`] owns two tile grids (primary and secondary) made of
//! [`Region`]s. Each region tracks whether it changed since it was last
//! presented, so flipping only re-presents the tiles that differ. Presenting a
//! tile means handing its pixels to a [`PresentationSink`].

mod color;
mod error;
mod region;
mod screen;
mod sink;

pub use color::Color;
pub use error::ScreenError;
pub use region::{PixelGrid, Region, TileId};
pub use screen::{BufferSelect, Screen, REGION_HEIGHT, REGION_WIDTH};
pub use sink::{CanvasSink, NullSink, PresentationSink};
