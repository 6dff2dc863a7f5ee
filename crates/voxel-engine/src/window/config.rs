use winit::dpi::LogicalSize;

use crate::paint::Color;

/// Window creation parameters.
#[derive(Debug, Clone)]
pub struct WindowConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
    /// Background the frame is cleared to before scenes draw.
    pub clear_color: Color,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "voxel".to_string(),
            initial_size: LogicalSize::new(500.0, 500.0),
            resizable: true,
            clear_color: Color::BLACK,
        }
    }
}
