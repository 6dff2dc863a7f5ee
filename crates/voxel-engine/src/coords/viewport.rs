use super::Vec2;

/// Drawable area in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Width over height. A collapsed side counts as one pixel, so the result
    /// is always positive and finite for finite input.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width.max(1.0) / self.height.max(1.0)
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Maps normalized device coordinates (`[-1, 1]`, +Y up) to logical pixels.
    #[inline]
    pub fn ndc_to_screen(self, x: f32, y: f32) -> Vec2 {
        Vec2::new((x + 1.0) * 0.5 * self.width, (1.0 - y) * 0.5 * self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_guards_collapsed_sides() {
        assert_eq!(Viewport::new(800.0, 0.0).aspect(), 800.0);
        assert_eq!(Viewport::new(0.0, 800.0).aspect(), 1.0 / 800.0);
        assert_eq!(Viewport::new(0.0, 0.0).aspect(), 1.0);
        assert_eq!(Viewport::new(1000.0, 800.0).aspect(), 1.25);
    }

    #[test]
    fn ndc_corners_map_to_screen_corners() {
        let vp = Viewport::new(200.0, 100.0);
        assert_eq!(vp.ndc_to_screen(-1.0, 1.0), Vec2::new(0.0, 0.0));
        assert_eq!(vp.ndc_to_screen(1.0, -1.0), Vec2::new(200.0, 100.0));
        assert_eq!(vp.ndc_to_screen(0.0, 0.0), vp.center());
    }

    #[test]
    fn zero_size_is_invalid() {
        assert!(!Viewport::new(0.0, 10.0).is_valid());
        assert!(!Viewport::default().is_valid());
        assert!(Viewport::new(1.0, 1.0).is_valid());
    }
}
