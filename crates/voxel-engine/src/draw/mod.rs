//! Per-frame draw stream.
//!
//! Scenes record renderer-agnostic commands into a `DrawList`; the surface
//! renders and clears it on present. Paint order is z-index first, then
//! insertion order, so painter's-algorithm callers push far-to-near.

mod cmd;
mod list;

pub use cmd::{DrawCmd, Quad, Triangle};
pub use list::{DrawItem, DrawList, Frame, ZIndex};
