use anyhow::Result;
use nalgebra::Point3;
use voxel_engine::core::UpdateCtx;
use voxel_engine::draw::Frame;
use voxel_engine::input::Key;
use voxel_engine::paint::Color;
use voxel_engine::scene::Scene;
use voxel_engine::surface::Surface;

use crate::geometry::{paint_faces, perspective, Cube, FlyCamera, Movement};
use crate::settings::WINDOW_TITLE;

use super::{handle_menu_keys, CUBE_FIELD};

/// World units per second; 0.1 per frame at 60 fps.
const MOVE_SPEED: f32 = 6.0;

/// First-person walk around a handful of coloured cubes.
pub struct CubeField {
    camera: FlyCamera,
    cubes: Vec<Cube>,
}

impl CubeField {
    pub fn new() -> Self {
        Self {
            camera: FlyCamera::at_eye(Point3::new(0.5, 0.5, 6.0)),
            cubes: vec![
                Cube::new(0.0, 0.0, 0.0, Color::RED),
                Cube::new(1.0, 0.0, 0.0, Color::GREEN),
                Cube::new(0.0, 0.0, 1.0, Color::BLUE),
                Cube::new(1.0, 0.0, 1.0, Color::RED),
                Cube::new(2.0, 0.0, 2.0, Color::GREEN),
            ],
        }
    }

    pub fn camera(&self) -> &FlyCamera {
        &self.camera
    }

    fn movement(surface: &dyn Surface) -> Movement {
        let axis = |pos: Key, neg: Key| {
            f32::from(u8::from(surface.key_down(pos))) - f32::from(u8::from(surface.key_down(neg)))
        };
        Movement {
            forward: axis(Key::W, Key::S),
            strafe: axis(Key::A, Key::D),
            vertical: axis(Key::Space, Key::Shift),
        }
    }

    /// Turns by the pointer's offset from the centre, then re-centres it.
    fn mouse_look(&mut self, surface: &mut dyn Surface) {
        if !surface.input().focused {
            return;
        }
        let centre = surface.dimensions().center();
        if let Some((x, y)) = surface.cursor_position() {
            self.camera.look(x - centre.x, y - centre.y);
        }
        surface.set_cursor_position(centre.x, centre.y);
    }
}

impl Default for CubeField {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene for CubeField {
    fn name(&self) -> &str {
        CUBE_FIELD
    }

    fn setup(&mut self, surface: &mut dyn Surface) -> Result<()> {
        surface.set_title(&format!("{WINDOW_TITLE} | cube field"));
        surface.set_cursor_captured(true);

        let centre = surface.dimensions().center();
        surface.set_cursor_position(centre.x, centre.y);
        log::debug!("cube field ready with {} cubes", self.cubes.len());
        Ok(())
    }

    fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> Result<()> {
        handle_menu_keys(ctx, CUBE_FIELD);

        self.mouse_look(ctx.surface);

        let movement = Self::movement(ctx.surface);
        if !movement.is_idle() {
            self.camera.step(movement, MOVE_SPEED * ctx.dt());
        }
        Ok(())
    }

    fn draw(&self, frame: &mut Frame<'_>) -> Result<()> {
        let Some(proj) = perspective(frame.viewport) else {
            return Ok(());
        };
        let view_proj = proj * self.camera.view_matrix();
        paint_faces(frame, &view_proj, self.cubes.iter().flat_map(|cube| cube.faces()));
        Ok(())
    }

    fn teardown(&mut self, surface: &mut dyn Surface) {
        surface.set_cursor_captured(false);
    }
}
