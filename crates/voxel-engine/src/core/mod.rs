//! Frame driver and the contexts it hands to scenes.

mod ctx;
mod frame_loop;

pub use ctx::{RuntimeCommand, RuntimeCtx, UpdateCtx};
pub use frame_loop::{FrameLoop, LoopStats};
