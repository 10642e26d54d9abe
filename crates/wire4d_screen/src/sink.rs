//! Presentation sinks
//!
//! The screen never encodes images itself. Each redrawn tile is handed to a
//! [`PresentationSink`], which makes it visible however it likes.

use crate::{Color, PixelGrid, TileId};

/// Receives redrawn tiles
pub trait PresentationSink {
    /// Make `pixels` visible at the location identified by `tile`.
    ///
    /// `palette` is only supplied for indexed-color output and may be ignored.
    fn render(&mut self, tile: TileId, pixels: PixelGrid<'_>, palette: Option<&[Color]>);
}

impl<S: PresentationSink + ?Sized> PresentationSink for Box<S> {
    fn render(&mut self, tile: TileId, pixels: PixelGrid<'_>, palette: Option<&[Color]>) {
        (**self).render(tile, pixels, palette)
    }
}

/// Discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl PresentationSink for NullSink {
    fn render(&mut self, _tile: TileId, _pixels: PixelGrid<'_>, _palette: Option<&[Color]>) {}
}

/// Composites tiles into a full-frame image in memory
#[derive(Clone, Debug)]
pub struct CanvasSink {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    renders: usize,
    last_tile: Option<TileId>,
}

impl CanvasSink {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width * height],
            renders: 0,
            last_tile: None,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total tiles rendered since construction
    #[inline]
    pub fn renders(&self) -> usize {
        self.renders
    }

    #[inline]
    pub fn last_tile(&self) -> Option<TileId> {
        self.last_tile
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// One character per pixel: `.` for `background`, `#` for anything else
    pub fn to_ascii(&self, background: Color) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.pixels.chunks(self.width.max(1)) {
            out.extend(row.iter().map(|&c| if c == background { '.' } else { '#' }));
            out.push('\n');
        }
        out
    }
}

impl PresentationSink for CanvasSink {
    fn render(&mut self, tile: TileId, grid: PixelGrid<'_>, _palette: Option<&[Color]>) {
        let (ox, oy) = grid.origin;
        for (dy, row) in grid.rows().enumerate() {
            let y = oy + dy;
            // Tiles past the canvas edge are counted but not copied
            if y >= self.height || ox >= self.width {
                break;
            }
            let start = y * self.width + ox;
            let n = row.len().min(self.width.saturating_sub(ox));
            self.pixels[start..start + n].copy_from_slice(&row[..n]);
        }
        self.renders += 1;
        self.last_tile = Some(tile);
    }
}
