//! Frame loop system
//!
//! Spins every object in the scene a little each frame and pushes the scene
//! through the [`FramePipeline`].

use wire4d_math::{Mat4, RotationOrder};
use wire4d_render::{
    Camera4D, FramePipeline, FrameStats, RenderError, Scene, TransCoord,
};
use wire4d_screen::{Color, PresentationSink, Screen};

use crate::config::{ConfigError, DemoConfig};

/// Drives the demo animation
pub struct RenderSystem {
    pipeline: FramePipeline,
    spin: Mat4,
    frames_rendered: u64,
    totals: FrameStats,
}

impl RenderSystem {
    /// Create render system from the demo config
    pub fn new(demo: &DemoConfig, background: Color) -> Result<Self, ConfigError> {
        let mut pipeline = FramePipeline::new(demo.pipeline_mode());
        pipeline.remove_back_faces = demo.remove_back_faces;
        pipeline.cull_planes = demo.cull_planes()?;
        pipeline.background = background;

        Ok(Self {
            pipeline,
            spin: Mat4::rotation(demo.spin_radians(), RotationOrder::Xyz),
            frames_rendered: 0,
            totals: FrameStats::default(),
        })
    }

    /// Render one frame, then advance every object's spin
    pub fn render<S: PresentationSink>(
        &mut self,
        scene: &mut Scene,
        camera: &Camera4D,
        screen: &mut Screen<S>,
    ) -> Result<FrameStats, RenderError> {
        let stats = self.pipeline.render_frame(scene, camera, screen)?;
        self.frames_rendered += 1;
        self.accumulate(&stats);
        log::debug!("frame {}: {}", self.frames_rendered, stats);

        for (_key, obj) in scene.iter_mut() {
            obj.transform_this(&self.spin, TransCoord::LocalOnly, true);
        }
        Ok(stats)
    }

    /// Render `frames` frames back to back
    pub fn run<S: PresentationSink>(
        &mut self,
        frames: u32,
        scene: &mut Scene,
        camera: &Camera4D,
        screen: &mut Screen<S>,
    ) -> Result<(), RenderError> {
        for _ in 0..frames {
            self.render(scene, camera, screen)?;
        }
        log::info!("Rendered {} frames: {}", self.frames_rendered, self.totals);
        Ok(())
    }

    fn accumulate(&mut self, stats: &FrameStats) {
        let t = &mut self.totals;
        t.objects_culled += stats.objects_culled;
        t.polys_backfaced += stats.polys_backfaced;
        t.polys_clipped += stats.polys_clipped;
        t.polys_drawn += stats.polys_drawn;
        t.tiles_redrawn += stats.tiles_redrawn;
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Sum of every frame's statistics so far
    pub fn totals(&self) -> FrameStats {
        self.totals
    }

    pub fn pipeline(&self) -> &FramePipeline {
        &self.pipeline
    }
}
