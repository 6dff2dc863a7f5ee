//! Voxel engine crate.
//!
//! Frame loop, scene lifecycle and the platform + GPU pieces the scenes draw
//! through.

pub mod config;
pub mod core;
pub mod device;
pub mod draw;
pub mod error;
pub mod input;
pub mod logging;
pub mod preferences;
pub mod render;
pub mod scene;
pub mod surface;
pub mod time;
pub mod window;

pub mod coords;
pub mod paint;

pub use error::{EngineError, Result};
