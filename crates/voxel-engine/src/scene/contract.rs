use crate::core::UpdateCtx;
use crate::draw::Frame;
use crate::surface::Surface;

/// A unit of per-frame behaviour.
///
/// Lifecycle, enforced by `SceneHost`:
/// 1. `setup` exactly once, on the first frame the scene is active
/// 2. `update` then `draw`, every frame, starting with that same frame
/// 3. `teardown` once, if the scene is replaced or the loop shuts down after
///    a successful setup
///
/// Errors from any hook end the frame loop.
pub trait Scene {
    /// Name used in logs and errors.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// One-time initialization against a realized surface.
    fn setup(&mut self, surface: &mut dyn Surface) -> anyhow::Result<()>;

    /// Advances scene state by one frame.
    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()>;

    /// Records the current state into the frame. Must not change state.
    fn draw(&self, frame: &mut Frame<'_>) -> anyhow::Result<()>;

    /// Releases anything `setup` acquired on the surface.
    fn teardown(&mut self, surface: &mut dyn Surface) {
        let _ = surface;
    }
}
