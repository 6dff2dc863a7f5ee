//! Scene lifecycle.
//!
//! A scene is set up once, then updated and drawn every frame. `SceneHost`
//! owns the active scene and enforces that order; `SceneRegistry` builds
//! scenes by name for runtime switching.

mod contract;
mod host;
mod registry;

pub use contract::Scene;
pub use host::{SceneHost, SceneState};
pub use registry::SceneRegistry;
