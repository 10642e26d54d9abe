//! wire4d - software wireframe renderer
//!
//! Renders a spinning cube and pyramid into a tiled, double-buffered
//! framebuffer and optionally prints the last frame as ASCII art.

use wire4d::config::{AppConfig, ConfigError};
use wire4d::scene::SceneBuilder;
use wire4d::systems::RenderSystem;
use wire4d_screen::{CanvasSink, Screen};

fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let screen_config = &config.screen;
    let mut screen = Screen::with_region_size(
        screen_config.width,
        screen_config.height,
        screen_config.region_width,
        screen_config.region_height,
        CanvasSink::new(screen_config.width, screen_config.height),
    )?;
    log::info!(
        "Screen {}x{} in {}x{} tiles",
        screen.width(),
        screen.height(),
        screen.region_cols(),
        screen.region_rows()
    );

    let camera = config.build_camera()?;
    let mut scene = SceneBuilder::demo()?;
    let mut system = RenderSystem::new(&config.demo, screen_config.background_color())?;

    system.run(config.demo.frames, &mut scene, &camera, &mut screen)?;

    if config.debug.ascii_dump {
        print!("{}", screen.sink().to_ascii(screen_config.background_color()));
    }
    Ok(())
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e: ConfigError| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting wire4d");

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
