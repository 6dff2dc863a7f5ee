//! Input subsystem.
//!
//! Public types do not expose winit. The window runtime translates platform
//! events into `InputEvent`s; the headless surface synthesizes them.

mod frame;
pub(crate) mod platform;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{ButtonState, InputEvent, Key, MouseButton};
