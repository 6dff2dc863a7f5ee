//! Rendering target contract.
//!
//! The frame loop and scenes only see `dyn Surface`; the winit/wgpu window
//! lives in `crate::window` and the in-memory double in `HeadlessSurface`.

mod headless;

pub use headless::HeadlessSurface;

use crate::coords::Viewport;
use crate::draw::Frame;
use crate::error::Result;
use crate::input::{InputFrame, InputState, Key};

/// A render target plus the input source attached to it.
pub trait Surface {
    /// Drains pending platform events into the input state.
    ///
    /// Per-frame transitions (`input_frame`) reset on every call.
    fn poll_events(&mut self) -> Result<()>;

    /// Renders the frame's draw list, presents it, and clears the list.
    fn present_frame(&mut self) -> Result<()>;

    /// True once the user (or platform) asked the surface to close.
    fn requested_close(&self) -> bool;

    /// Drawable size in logical pixels.
    fn dimensions(&self) -> Viewport;

    fn input(&self) -> &InputState;

    fn input_frame(&self) -> &InputFrame;

    /// Moves the pointer, in logical pixels.
    fn set_cursor_position(&mut self, x: f32, y: f32);

    /// Hides and confines the pointer (mouse-look), or releases it.
    fn set_cursor_captured(&mut self, captured: bool);

    fn set_title(&mut self, title: &str);

    /// The frame scenes draw into before `present_frame`.
    fn frame(&mut self) -> Frame<'_>;

    #[inline]
    fn key_down(&self, key: Key) -> bool {
        self.input().key_down(key)
    }

    #[inline]
    fn cursor_position(&self) -> Option<(f32, f32)> {
        self.input().pointer_pos
    }
}
