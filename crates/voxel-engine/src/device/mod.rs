//! GPU device + swapchain management.
//!
//! Creates the wgpu device for a window, configures the swapchain, hands out
//! per-frame encoders and maps swapchain errors to an action.

mod gpu;
mod init;
mod surface;

pub use gpu::{Gpu, GpuFrame};
pub use init::GpuInit;
pub use surface::SurfaceErrorAction;
