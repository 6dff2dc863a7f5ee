//! Voxel Battles: a first-person walk among coloured cubes.

mod geometry;
mod scenes;
mod settings;

use anyhow::{Context, Result};
use voxel_engine::config::{remember_window_size, EngineConfig};
use voxel_engine::core::FrameLoop;
use voxel_engine::device::GpuInit;
use voxel_engine::logging::{init_logging, LoggingConfig};
use voxel_engine::preferences::Preferences;
use voxel_engine::window::WindowSurface;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut prefs = Preferences::open(settings::PREFERENCES_FILE, settings::default_preferences())
        .context("failed to load preferences")?;

    let config = EngineConfig::from_preferences(&prefs)
        .with_context(|| format!("invalid preferences in {}", prefs.path().display()))?
        .with_title(settings::WINDOW_TITLE)
        .with_clear_color(settings::SKY);

    log::info!(
        "{} starting at {}x{}, {} fps",
        config.title,
        config.window_size.0,
        config.window_size.1,
        config.target_fps
    );

    let mut surface = WindowSurface::open(config.window_config(), GpuInit::default())
        .context("failed to open the game window")?;

    let mut frame_loop = FrameLoop::new(config.interval()?, scenes::registry());
    frame_loop.switch_scene(scenes::CUBE_FIELD)?;

    let outcome = frame_loop.run(&mut surface);

    // Remember the window size even when the loop failed.
    if let Some(size) = surface.window_size() {
        remember_window_size(&mut prefs, size)?;
    }
    if prefs.is_dirty() {
        prefs.persist().context("failed to save preferences")?;
    }

    let stats = outcome.context("game loop failed")?;
    log::info!("{} frames, {} over budget", stats.frames, stats.overruns);
    Ok(())
}
