//! Colour model shared by scenes and the renderer.
//!
//! Colours are linear with premultiplied alpha; the renderer blends with
//! `One, OneMinusSrcAlpha`.

mod color;

pub use color::Color;
