//! Tiled double-buffered framebuffer
//!
//! The screen holds two full tile grids. Drawing normally targets the
//! secondary buffer; [`Screen::flip_display`] copies changed pixels into the
//! primary buffer and re-presents only the tiles that actually changed.

use std::fmt;

use crate::{Color, PresentationSink, Region, ScreenError, TileId};

/// Default tile width in pixels
pub const REGION_WIDTH: usize = 10;
/// Default tile height in pixels
pub const REGION_HEIGHT: usize = 10;

/// Which of the two buffers an operation targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferSelect {
    /// What is currently on screen
    Primary,
    /// The buffer being composed
    Secondary,
}

impl fmt::Display for BufferSelect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferSelect::Primary => f.write_str("primary"),
            BufferSelect::Secondary => f.write_str("secondary"),
        }
    }
}

/// `width × height` RGB framebuffer split into tiles, presented through `S`
pub struct Screen<S: PresentationSink> {
    width: usize,
    height: usize,
    region_width: usize,
    region_height: usize,
    region_rows: usize,
    region_cols: usize,
    primary: Vec<Region>,
    secondary: Vec<Region>,
    primary_locked: bool,
    secondary_locked: bool,
    sink: S,
}

impl<S: PresentationSink> Screen<S> {
    /// Screen with the default 10x10 tiles
    pub fn new(width: usize, height: usize, sink: S) -> Result<Self, ScreenError> {
        Self::with_region_size(width, height, REGION_WIDTH, REGION_HEIGHT, sink)
    }

    /// Screen with custom tile dimensions.
    ///
    /// Both buffers start black and the primary buffer is presented once.
    pub fn with_region_size(
        width: usize,
        height: usize,
        region_width: usize,
        region_height: usize,
        sink: S,
    ) -> Result<Self, ScreenError> {
        if width == 0 || height == 0 {
            return Err(ScreenError::InvalidArgument(format!(
                "screen dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if region_width == 0 || region_height == 0 {
            return Err(ScreenError::InvalidArgument(format!(
                "region dimensions must be non-zero, got {}x{}",
                region_width, region_height
            )));
        }

        let region_rows = height.div_ceil(region_height);
        let region_cols = width.div_ceil(region_width);
        let build = || {
            let mut regions = Vec::with_capacity(region_rows * region_cols);
            for row in 0..region_rows {
                for col in 0..region_cols {
                    let x0 = col * region_width;
                    let y0 = row * region_height;
                    let w = region_width.min(width - x0);
                    let h = region_height.min(height - y0);
                    regions.push(Region::new(TileId { row, col }, (x0, y0), w, h, Color::BLACK));
                }
            }
            regions
        };

        let mut screen = Self {
            width,
            height,
            region_width,
            region_height,
            region_rows,
            region_cols,
            primary: build(),
            secondary: build(),
            primary_locked: false,
            secondary_locked: false,
            sink,
        };
        let shown = screen.present();
        log::debug!(
            "Screen {}x{} with {}x{} tiles ({} tiles presented)",
            width,
            height,
            region_cols,
            region_rows,
            shown
        );
        Ok(screen)
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
    pub fn region_size(&self) -> (usize, usize) {
        (self.region_width, self.region_height)
    }

    #[inline]
    pub fn region_rows(&self) -> usize {
        self.region_rows
    }

    #[inline]
    pub fn region_cols(&self) -> usize {
        self.region_cols
    }

    /// Tiles of one buffer, row-major
    pub fn regions(&self, buffer: BufferSelect) -> &[Region] {
        match buffer {
            BufferSelect::Primary => &self.primary,
            BufferSelect::Secondary => &self.secondary,
        }
    }

    pub fn region(&self, buffer: BufferSelect, tile: TileId) -> Option<&Region> {
        if tile.row >= self.region_rows || tile.col >= self.region_cols {
            return None;
        }
        self.regions(buffer).get(tile.row * self.region_cols + tile.col)
    }

    /// Number of dirty tiles in a buffer
    pub fn dirty_count(&self, buffer: BufferSelect) -> usize {
        self.regions(buffer).iter().filter(|r| r.is_dirty()).count()
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    #[inline]
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn is_locked(&self, buffer: BufferSelect) -> bool {
        match buffer {
            BufferSelect::Primary => self.primary_locked,
            BufferSelect::Secondary => self.secondary_locked,
        }
    }

    fn set_lock(&mut self, buffer: BufferSelect, locked: bool) -> bool {
        let flag = match buffer {
            BufferSelect::Primary => &mut self.primary_locked,
            BufferSelect::Secondary => &mut self.secondary_locked,
        };
        let changed = *flag != locked;
        *flag = locked;
        changed
    }

    /// Returns true if the lock state changed
    pub fn lock_primary(&mut self) -> bool {
        self.set_lock(BufferSelect::Primary, true)
    }

    pub fn unlock_primary(&mut self) -> bool {
        self.set_lock(BufferSelect::Primary, false)
    }

    pub fn lock_secondary(&mut self) -> bool {
        self.set_lock(BufferSelect::Secondary, true)
    }

    pub fn unlock_secondary(&mut self) -> bool {
        self.set_lock(BufferSelect::Secondary, false)
    }

    fn ensure_unlocked(&self, buffer: BufferSelect) -> Result<(), ScreenError> {
        if self.is_locked(buffer) {
            return Err(ScreenError::BufferLocked(buffer));
        }
        Ok(())
    }

    fn regions_mut(&mut self, buffer: BufferSelect) -> &mut [Region] {
        match buffer {
            BufferSelect::Primary => &mut self.primary,
            BufferSelect::Secondary => &mut self.secondary,
        }
    }

    /// Map in-bounds screen coordinates to (tile index, local x, local y)
    fn locate(&self, x: i64, y: i64) -> Option<(usize, usize, usize)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        let (col, row) = (x / self.region_width, y / self.region_height);
        Some((
            row * self.region_cols + col,
            x - col * self.region_width,
            y - row * self.region_height,
        ))
    }

    /// Unchecked-lock write used by the drawing routines
    fn put(&mut self, buffer: BufferSelect, x: i64, y: i64, color: Color) {
        if let Some((index, lx, ly)) = self.locate(x, y) {
            self.regions_mut(buffer)[index].set(lx, ly, color);
        }
    }

    /// Write one pixel.
    ///
    /// Coordinates outside the screen are ignored. Writing the color a pixel
    /// already has leaves its tile clean. Fails only if `buffer` is locked.
    pub fn set_pixel(
        &mut self,
        buffer: BufferSelect,
        x: i64,
        y: i64,
        color: Color,
    ) -> Result<(), ScreenError> {
        self.ensure_unlocked(buffer)?;
        self.put(buffer, x, y, color);
        Ok(())
    }

    /// Plot a point given in (possibly fractional) screen coordinates
    pub fn draw_point(
        &mut self,
        x: f64,
        y: f64,
        color: Color,
        buffer: BufferSelect,
    ) -> Result<(), ScreenError> {
        self.ensure_unlocked(buffer)?;
        if x.is_finite() && y.is_finite() {
            self.put(buffer, x as i64, y as i64, color);
        }
        Ok(())
    }

    pub fn get_pixel(&self, buffer: BufferSelect, x: i64, y: i64) -> Option<Color> {
        let (index, lx, ly) = self.locate(x, y)?;
        self.regions(buffer)[index].get(lx, ly)
    }

    /// Draw a line between two screen points.
    ///
    /// Endpoints are truncated toward zero. The loop runs along the major
    /// axis, clamped to the screen, and the minor coordinate is computed from
    /// the slope and truncated. Vertical lines are filled directly. Pixels
    /// that fall off screen are skipped. Non-finite endpoints draw nothing.
    pub fn draw_line(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Color,
        buffer: BufferSelect,
    ) -> Result<(), ScreenError> {
        self.ensure_unlocked(buffer)?;
        if !(x0.is_finite() && y0.is_finite() && x1.is_finite() && y1.is_finite()) {
            return Ok(());
        }

        // Slope math stays in f64 so endpoints far off screen cannot overflow
        let (x1, y1, x2, y2) = (x0.trunc(), y0.trunc(), x1.trunc(), y1.trunc());
        let (w, h) = (self.width as f64, self.height as f64);
        let on_x = |x: f64| (0.0..w).contains(&x);
        let on_y = |y: f64| (0.0..h).contains(&y);
        let y_lo = y1.min(y2).max(0.0) as i64;
        let y_hi = y1.max(y2).min(h - 1.0) as i64;

        if x1 == x2 {
            if on_x(x1) {
                for y in y_lo..=y_hi {
                    self.put(buffer, x1 as i64, y, color);
                }
            }
            return Ok(());
        }

        let slope = (y2 - y1) / (x2 - x1);
        if (y2 - y1).abs() > (x2 - x1).abs() {
            for y in y_lo..=y_hi {
                let x = ((y as f64 - y1) / slope + x1).trunc();
                if on_x(x) {
                    self.put(buffer, x as i64, y, color);
                }
            }
        } else {
            let x_lo = x1.min(x2).max(0.0) as i64;
            let x_hi = x1.max(x2).min(w - 1.0) as i64;
            for x in x_lo..=x_hi {
                let y = (slope * (x as f64 - x1)).trunc() + y1;
                if on_y(y) {
                    self.put(buffer, x, y as i64, color);
                }
            }
        }
        Ok(())
    }

    fn fill(&mut self, buffer: BufferSelect, color: Color) -> Result<(), ScreenError> {
        self.ensure_unlocked(buffer)?;
        for region in self.regions_mut(buffer) {
            region.fill(color);
        }
        Ok(())
    }

    /// Fill the primary buffer; every tile becomes dirty
    pub fn fill_primary(&mut self, color: Color) -> Result<(), ScreenError> {
        self.fill(BufferSelect::Primary, color)
    }

    /// Fill the secondary buffer; every tile becomes dirty
    pub fn fill_secondary(&mut self, color: Color) -> Result<(), ScreenError> {
        self.fill(BufferSelect::Secondary, color)
    }

    /// Redraw every dirty primary tile. Returns how many were rendered.
    pub fn present(&mut self) -> usize {
        let mut drawn = 0;
        for region in &mut self.primary {
            if region.redraw(&mut self.sink) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Copy the secondary buffer onto the primary one and present the tiles
    /// that changed.
    ///
    /// Fails if either buffer is locked. Returns the number of tiles redrawn.
    pub fn flip_display(&mut self) -> Result<usize, ScreenError> {
        self.ensure_unlocked(BufferSelect::Primary)?;
        self.ensure_unlocked(BufferSelect::Secondary)?;

        let changed = self
            .primary
            .iter_mut()
            .zip(&self.secondary)
            .map(|(dst, src)| dst.copy_from(src))
            .filter(|&changed| changed)
            .count();
        let drawn = self.present();
        log::trace!("flip: {} tiles changed, {} redrawn", changed, drawn);
        Ok(drawn)
    }
}

impl<S: PresentationSink> fmt::Debug for Screen<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screen")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("region_width", &self.region_width)
            .field("region_height", &self.region_height)
            .field("primary_locked", &self.primary_locked)
            .field("secondary_locked", &self.secondary_locked)
            .finish_non_exhaustive()
    }
}
