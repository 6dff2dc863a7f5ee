//! Screen-space coordinate types.
//!
//! Canonical CPU space for draw commands:
//! - logical pixels (DPI-aware)
//! - origin top-left, +X right, +Y down
//!
//! The renderer converts to NDC in the vertex shader using the viewport.

mod vec2;
mod viewport;

pub use vec2::Vec2;
pub use viewport::Viewport;
