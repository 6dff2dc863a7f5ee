use crate::core::{RuntimeCtx, UpdateCtx};
use crate::error::{EngineError, Result};
use crate::surface::Surface;
use crate::time::FrameTime;

use super::Scene;

/// Observable lifecycle state of the host.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SceneState {
    /// No scene assigned.
    Empty,
    /// Scene assigned; setup runs on the next frame.
    AwaitingSetup,
    /// Setup done; every frame runs update then draw.
    Running,
}

#[derive(Default)]
enum Slot {
    #[default]
    Empty,
    AwaitingSetup(Box<dyn Scene>),
    Running(Box<dyn Scene>),
}

/// Owns the active scene and drives its lifecycle.
///
/// The surface is lent per call instead of stored, so it always outlives
/// the borrow.
///
/// A running scene that gets replaced is kept as *retired* until the next
/// `run_frame` (or `shutdown`), where its teardown runs with the surface in
/// hand. A scene replaced before its first frame never ran setup and is
/// dropped without teardown.
#[derive(Default)]
pub struct SceneHost {
    slot: Slot,
    retired: Option<Box<dyn Scene>>,
}

impl SceneHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SceneState {
        match self.slot {
            Slot::Empty => SceneState::Empty,
            Slot::AwaitingSetup(_) => SceneState::AwaitingSetup,
            Slot::Running(_) => SceneState::Running,
        }
    }

    pub fn active_scene_name(&self) -> Option<&str> {
        match &self.slot {
            Slot::Empty => None,
            Slot::AwaitingSetup(scene) | Slot::Running(scene) => Some(scene.name()),
        }
    }

    /// True while a replaced scene still waits for its teardown.
    pub fn has_retired_scene(&self) -> bool {
        self.retired.is_some()
    }

    pub fn set_current_scene<S: Scene + 'static>(&mut self, scene: S) {
        self.set_current_scene_boxed(Box::new(scene));
    }

    /// Makes `scene` active; it is set up on the next frame.
    pub fn set_current_scene_boxed(&mut self, scene: Box<dyn Scene>) {
        log::info!("active scene: {}", scene.name());

        match std::mem::replace(&mut self.slot, Slot::AwaitingSetup(scene)) {
            Slot::Empty => {}
            Slot::AwaitingSetup(prev) => {
                log::debug!("scene `{}` replaced before setup; dropped", prev.name());
            }
            Slot::Running(prev) => {
                if let Some(older) = self.retired.replace(prev) {
                    log::warn!("scene `{}` dropped without teardown", older.name());
                }
            }
        }
    }

    /// Runs one frame of the active scene: setup if pending, then update and draw.
    pub fn run_frame(
        &mut self,
        surface: &mut dyn Surface,
        time: FrameTime,
        runtime: &mut RuntimeCtx,
    ) -> Result<()> {
        self.teardown_retired(surface);

        self.slot = match std::mem::take(&mut self.slot) {
            Slot::Empty => return Err(EngineError::NoActiveScene),
            Slot::AwaitingSetup(mut scene) => {
                log::debug!("setting up scene `{}`", scene.name());
                if let Err(source) = scene.setup(surface) {
                    let name = scene.name().to_string();
                    self.slot = Slot::AwaitingSetup(scene);
                    return Err(EngineError::SceneSetup { scene: name, source });
                }
                Slot::Running(scene)
            }
            running => running,
        };

        let Slot::Running(scene) = &mut self.slot else {
            return Err(EngineError::NoActiveScene);
        };

        let mut ctx = UpdateCtx::new(&mut *surface, time, runtime);
        scene.update(&mut ctx).map_err(|source| EngineError::SceneFrame {
            scene: scene.name().to_string(),
            source,
        })?;

        let mut frame = surface.frame();
        scene.draw(&mut frame).map_err(|source| EngineError::SceneFrame {
            scene: scene.name().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Tears down every scene that ran setup and leaves the host empty.
    pub fn shutdown(&mut self, surface: &mut dyn Surface) {
        self.teardown_retired(surface);

        match std::mem::take(&mut self.slot) {
            Slot::Running(mut scene) => {
                log::debug!("tearing down scene `{}`", scene.name());
                scene.teardown(surface);
            }
            Slot::AwaitingSetup(_) | Slot::Empty => {}
        }
    }

    fn teardown_retired(&mut self, surface: &mut dyn Surface) {
        if let Some(mut scene) = self.retired.take() {
            log::debug!("tearing down scene `{}`", scene.name());
            scene.teardown(surface);
        }
    }
}
