//! Frame driver: runs every pipeline stage over a scene in order
//!
//! One call to [`FramePipeline::render_frame`] clears the secondary buffer,
//! pushes each object through reset, model-to-world, culling and back-face
//! removal, then either finishes each object on its own or gathers the
//! survivors into a shared [`RenderList4D`], draws the wireframes and flips
//! the screen.

use std::fmt;

use wire4d_screen::{BufferSelect, Color, PresentationSink, Screen};

use crate::pipeline::TransCoord;
use crate::{Camera4D, CullPlanes, RenderError, RenderList4D, Scene};

/// Whether objects are finished individually or batched
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PipelineMode {
    PerObject,
    #[default]
    RenderList,
}

/// Per-frame counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub objects_culled: usize,
    pub polys_backfaced: usize,
    pub polys_clipped: usize,
    pub polys_drawn: usize,
    pub tiles_redrawn: usize,
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "culled {} objects, {} back faces, {} clipped, drew {} polys, redrew {} tiles",
            self.objects_culled,
            self.polys_backfaced,
            self.polys_clipped,
            self.polys_drawn,
            self.tiles_redrawn
        )
    }
}

/// Reusable frame driver
#[derive(Clone, Debug)]
pub struct FramePipeline {
    pub mode: PipelineMode,
    pub remove_back_faces: bool,
    pub cull_planes: CullPlanes,
    pub background: Color,
    render_list: RenderList4D,
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self {
            mode: PipelineMode::default(),
            remove_back_faces: true,
            cull_planes: CullPlanes::ALL,
            background: Color::BLACK,
            render_list: RenderList4D::new(),
        }
    }
}

impl FramePipeline {
    pub fn new(mode: PipelineMode) -> Self {
        Self { mode, ..Default::default() }
    }

    /// The shared list as left by the last render-list frame
    pub fn render_list(&self) -> &RenderList4D {
        &self.render_list
    }

    /// Render one frame of `scene` as seen by `cam` and flip it to screen.
    ///
    /// The camera's `mcam` must already be built for this frame.
    pub fn render_frame<S: PresentationSink>(
        &mut self,
        scene: &mut Scene,
        cam: &Camera4D,
        screen: &mut Screen<S>,
    ) -> Result<FrameStats, RenderError> {
        let mut stats = FrameStats::default();
        screen.fill_secondary(self.background)?;
        let buffer = BufferSelect::Secondary;

        if self.mode == PipelineMode::RenderList {
            self.render_list.reset_this();
        }

        for (_key, obj) in scene.iter_mut() {
            obj.reset_this();
            obj.model_to_world_this(TransCoord::LocalToTrans);
            if !self.cull_planes.is_empty() && obj.cull_this(cam, self.cull_planes) {
                stats.objects_culled += 1;
                continue;
            }
            if self.remove_back_faces {
                stats.polys_backfaced += obj.remove_back_faces_this(cam)?;
            }

            match self.mode {
                PipelineMode::PerObject => {
                    obj.world_to_camera_this(cam)?;
                    stats.polys_clipped += obj.clip_this(cam)?;
                    obj.camera_to_screen_this(cam)?;
                    stats.polys_drawn += obj.draw_wire(screen, buffer)?;
                }
                PipelineMode::RenderList => {
                    self.render_list.insert_object(obj, false)?;
                }
            }
        }

        if self.mode == PipelineMode::RenderList {
            let list = &mut self.render_list;
            list.world_to_camera_this(cam);
            stats.polys_clipped += list.clip_this(cam);
            list.camera_to_screen_this(cam)?;
            stats.polys_drawn += list.draw_wire(screen, buffer)?;
        }

        stats.tiles_redrawn = screen.flip_display()?;
        log::debug!("frame: {}", stats);
        Ok(stats)
    }
}
