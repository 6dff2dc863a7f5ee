//! Frame timing and pacing.
//!
//! Intended usage, once per loop iteration:
//! - `begin_frame()` at the top, hand the returned `FrameTime` to the scene
//! - `end_frame(interval)` at the bottom, sleep for the returned duration

mod frame_clock;
mod interval;

pub use frame_clock::{FrameClock, FrameTime};
pub use interval::{budget_usage, sleep_duration, FrameInterval};
