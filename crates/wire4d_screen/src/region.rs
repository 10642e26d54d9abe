//! Framebuffer tiles with dirty tracking

use std::fmt;

use crate::{Color, PresentationSink};

/// Position of a tile in the region grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tile({}, {})", self.row, self.col)
    }
}

/// Borrowed view of one tile's pixels, handed to a [`PresentationSink`]
#[derive(Clone, Copy, Debug)]
pub struct PixelGrid<'a> {
    /// Screen coordinates of the tile's top-left pixel
    pub origin: (usize, usize),
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries
    pub pixels: &'a [Color],
}

impl<'a> PixelGrid<'a> {
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    pub fn row(&self, y: usize) -> Option<&'a [Color]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.pixels[start..start + self.width])
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [Color]> {
        self.pixels.chunks(self.width)
    }

    /// Packed RGB bytes, three per pixel
    pub fn as_bytes(&self) -> &'a [u8] {
        bytemuck::cast_slice(self.pixels)
    }
}

/// One rectangular tile of a buffer.
///
/// Dimensions are fixed at construction; edge tiles may be narrower or
/// shorter than the configured region size.
#[derive(Clone, Debug)]
pub struct Region {
    id: TileId,
    origin: (usize, usize),
    width: usize,
    height: usize,
    pixels: Vec<Color>,
    dirty: bool,
}

impl Region {
    pub(crate) fn new(
        id: TileId,
        origin: (usize, usize),
        width: usize,
        height: usize,
        fill: Color,
    ) -> Self {
        Self {
            id,
            origin,
            width,
            height,
            pixels: vec![fill; width * height],
            dirty: true,
        }
    }

    #[inline]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Screen coordinates of the top-left pixel
    #[inline]
    pub fn origin(&self) -> (usize, usize) {
        self.origin
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Pixel at tile-local coordinates
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Write a pixel at tile-local coordinates; dirties the tile only if the
    /// color changes. Returns whether it changed.
    pub(crate) fn set(&mut self, x: usize, y: usize, color: Color) -> bool {
        let slot = &mut self.pixels[y * self.width + x];
        if *slot == color {
            return false;
        }
        *slot = color;
        self.dirty = true;
        true
    }

    /// Set every pixel; always dirties
    pub(crate) fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
        self.dirty = true;
    }

    /// Copy pixels that differ from `other`. Dirties the tile if any changed.
    pub(crate) fn copy_from(&mut self, other: &Region) -> bool {
        let mut changed = false;
        for (dst, src) in self.pixels.iter_mut().zip(&other.pixels) {
            if dst != src {
                *dst = *src;
                changed = true;
            }
        }
        self.dirty |= changed;
        changed
    }

    pub fn grid(&self) -> PixelGrid<'_> {
        PixelGrid {
            origin: self.origin,
            width: self.width,
            height: self.height,
            pixels: &self.pixels,
        }
    }

    /// Hand the tile to `sink` if dirty and mark it clean.
    ///
    /// Returns true if the tile was rendered.
    pub fn redraw<S: PresentationSink + ?Sized>(&mut self, sink: &mut S) -> bool {
        if !self.dirty {
            return false;
        }
        sink.render(self.id, self.grid(), None);
        self.dirty = false;
        true
    }
}
