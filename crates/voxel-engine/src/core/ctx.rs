use crate::surface::Surface;
use crate::time::FrameTime;

/// Requests a scene can make of the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum RuntimeCommand {
    /// Replace the active scene with a fresh instance of a registered scene.
    SwitchScene(String),
    /// Re-pace the loop; validated when applied.
    SetTargetFps(f64),
    Exit,
}

/// Buffered runtime commands.
///
/// Commands are applied after the frame is presented, never mid-frame.
#[derive(Debug, Default)]
pub struct RuntimeCtx {
    commands: Vec<RuntimeCommand>,
}

impl RuntimeCtx {
    pub fn switch_scene(&mut self, name: impl Into<String>) {
        self.commands.push(RuntimeCommand::SwitchScene(name.into()));
    }

    pub fn set_target_fps(&mut self, fps: f64) {
        self.commands.push(RuntimeCommand::SetTargetFps(fps));
    }

    pub fn exit(&mut self) {
        self.commands.push(RuntimeCommand::Exit);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[RuntimeCommand] {
        &self.commands
    }

    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, RuntimeCommand> {
        self.commands.drain(..)
    }
}

/// Per-frame context passed to `Scene::update`.
pub struct UpdateCtx<'a> {
    pub surface: &'a mut dyn Surface,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a> UpdateCtx<'a> {
    pub fn new(surface: &'a mut dyn Surface, time: FrameTime, runtime: &'a mut RuntimeCtx) -> Self {
        Self { surface, time, runtime }
    }

    /// Seconds since the previous frame.
    #[inline]
    pub fn dt(&self) -> f32 {
        self.time.dt
    }
}
