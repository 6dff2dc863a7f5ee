use anyhow::Result;
use nalgebra::{Matrix4, Point3, Vector3};
use voxel_engine::core::UpdateCtx;
use voxel_engine::draw::Frame;
use voxel_engine::paint::Color;
use voxel_engine::scene::Scene;
use voxel_engine::surface::Surface;

use crate::geometry::{paint_faces, perspective, Cube, FlyCamera};
use crate::settings::WINDOW_TITLE;

use super::{handle_menu_keys, SPINNING_CUBE};

/// Degrees per second around the vertical axis.
const SPIN_SPEED: f32 = 45.0;
/// Fixed tilt so the top face stays visible.
const TILT_DEG: f32 = 25.0;

/// One cube turning in front of a fixed camera.
pub struct SpinningCube {
    cube: Cube,
    camera: FlyCamera,
    angle: f32,
}

impl SpinningCube {
    pub fn new() -> Self {
        Self {
            // Centred on the origin.
            cube: Cube::new(-0.5, -0.5, -0.5, Color::from_srgb_u8(230, 160, 40, 255)),
            camera: FlyCamera::at_eye(Point3::new(0.0, 0.0, 3.5)),
            angle: 0.0,
        }
    }

    /// Current spin in degrees, `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    fn model_matrix(&self) -> Matrix4<f32> {
        let tilt = Matrix4::from_axis_angle(&Vector3::x_axis(), TILT_DEG.to_radians());
        let spin = Matrix4::from_axis_angle(&Vector3::y_axis(), self.angle.to_radians());
        tilt * spin
    }
}

impl Default for SpinningCube {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for SpinningCube {
    fn name(&self) -> &str {
        SPINNING_CUBE
    }

    fn setup(&mut self, surface: &mut dyn Surface) -> Result<()> {
        surface.set_title(&format!("{WINDOW_TITLE} | spinning cube"));
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        handle_menu_keys(ctx, SPINNING_CUBE);
        self.angle = (self.angle + SPIN_SPEED * ctx.dt()).rem_euclid(360.0);
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) -> Result<()> {
        let Some(proj) = perspective(frame.viewport) else {
            return Ok(());
        };
        let mvp = proj * self.camera.view_matrix() * self.model_matrix();
        paint_faces(frame, &mvp, self.cube.faces());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use voxel_engine::coords::Viewport;
    use voxel_engine::core::RuntimeCtx;
    use voxel_engine::draw::DrawList;
    use voxel_engine::surface::HeadlessSurface;
    use voxel_engine::time::FrameTime;

    fn tick(scene: &mut SpinningCube, surface: &mut HeadlessSurface, dt: f32) {
        surface.poll_events().unwrap();
        let mut runtime = RuntimeCtx::default();
        let mut ctx = UpdateCtx::new(surface, FrameTime::fixed(dt, 0), &mut runtime);
        scene.update(&mut ctx).unwrap();
    }

    #[test]
    fn spin_follows_delta_time() {
        let mut scene = SpinningCube::new();
        let mut s = HeadlessSurface::new(Viewport::new(640.0, 480.0));
        scene.setup(&mut s).unwrap();
        assert_eq!(s.title(), "Voxel Battles v1.0 | spinning cube");

        tick(&mut scene, &mut s, 0.5);
        assert_relative_eq!(scene.angle(), 22.5);

        for _ in 0..8 {
            tick(&mut scene, &mut s, 1.0);
        }
        assert_relative_eq!(scene.angle(), 22.5, epsilon = 1e-3);
    }

    #[test]
    fn shows_two_or_three_faces_at_any_angle() {
        let mut scene = SpinningCube::new();
        for step in 0..36 {
            scene.angle = step as f32 * 10.0 + 5.0;

            let mut list = DrawList::new();
            let mut frame = Frame::new(Viewport::new(640.0, 480.0), &mut list);
            scene.draw(&mut frame).unwrap();

            assert!((2..=3).contains(&list.len()), "angle {} drew {}", scene.angle, list.len());
        }
    }

    #[test]
    fn minimized_viewport_draws_nothing() {
        let scene = SpinningCube::new();
        let mut list = DrawList::new();
        let mut frame = Frame::new(Viewport::new(0.0, 0.0), &mut list);
        scene.draw(&mut frame).unwrap();
        assert!(list.is_empty());
    }
}
