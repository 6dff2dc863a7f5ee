//! Native window surface.
//!
//! Owns the `winit` event loop and window and wires them to the GPU layer.
//! The event loop is pumped from `Surface::poll_events`, so the frame loop
//! stays in charge of timing.

mod config;
mod runtime;

pub use config::WindowConfig;
pub use runtime::WindowSurface;
