//! Playable scenes and the keys shared between them.

mod cube_field;
mod spinning_cube;

pub use cube_field::CubeField;
pub use spinning_cube::SpinningCube;

use voxel_engine::core::UpdateCtx;
use voxel_engine::input::Key;
use voxel_engine::scene::SceneRegistry;

pub const CUBE_FIELD: &str = "cube-field";
pub const SPINNING_CUBE: &str = "spinning-cube";

pub fn registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry
        .register(CUBE_FIELD, CubeField::new)
        .register(SPINNING_CUBE, SpinningCube::new);
    registry
}

/// `1`/`2` switch scenes, `Escape` quits. Switching to the active scene is
/// ignored so it does not restart.
fn handle_menu_keys(ctx: &mut UpdateCtx<'_>, active: &str) {
    let input = ctx.surface.input_frame();
    let target = if input.key_pressed(Key::Digit1) {
        Some(CUBE_FIELD)
    } else if input.key_pressed(Key::Digit2) {
        Some(SPINNING_CUBE)
    } else {
        None
    };
    let exit = input.key_pressed(Key::Escape);

    if let Some(name) = target.filter(|name| *name != active) {
        ctx.runtime.switch_scene(name);
    }
    if exit {
        ctx.runtime.exit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxel_engine::core::{RuntimeCommand, RuntimeCtx};
    use voxel_engine::coords::Viewport;
    use voxel_engine::surface::{HeadlessSurface, Surface};
    use voxel_engine::core::FrameLoop;
    use voxel_engine::time::{FrameInterval, FrameTime};

    fn menu(keys: &[Key], active: &str) -> Vec<RuntimeCommand> {
        let mut surface = HeadlessSurface::new(Viewport::new(100.0, 100.0));
        for key in keys {
            surface.press(*key);
        }
        surface.poll_events().unwrap();

        let mut runtime = RuntimeCtx::default();
        let mut ctx = UpdateCtx::new(&mut surface, FrameTime::fixed(1.0 / 60.0, 0), &mut runtime);
        handle_menu_keys(&mut ctx, active);
        runtime.commands().to_vec()
    }

    #[test]
    fn both_scenes_are_registered() {
        let registry = registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec![CUBE_FIELD, SPINNING_CUBE]);
        assert_eq!(registry.create(CUBE_FIELD).unwrap().name(), CUBE_FIELD);
        assert_eq!(registry.create(SPINNING_CUBE).unwrap().name(), SPINNING_CUBE);
    }

    #[test]
    fn digits_switch_scenes() {
        assert_eq!(
            menu(&[Key::Digit2], CUBE_FIELD),
            vec![RuntimeCommand::SwitchScene(SPINNING_CUBE.to_string())]
        );
        assert_eq!(
            menu(&[Key::Digit1], SPINNING_CUBE),
            vec![RuntimeCommand::SwitchScene(CUBE_FIELD.to_string())]
        );
    }

    #[test]
    fn switching_to_the_active_scene_is_ignored() {
        assert!(menu(&[Key::Digit1], CUBE_FIELD).is_empty());
    }

    #[test]
    fn escape_exits() {
        assert_eq!(menu(&[Key::Escape], CUBE_FIELD), vec![RuntimeCommand::Exit]);
    }

    fn run_scene(name: &str, mut surface: HeadlessSurface) -> u64 {
        let mut frame_loop = FrameLoop::new(FrameInterval::from_fps(1000.0).unwrap(), registry());
        frame_loop.switch_scene(name).unwrap();
        frame_loop.run(&mut surface).unwrap().frames
    }

    #[test]
    fn scenes_survive_a_minimized_window() {
        for name in [CUBE_FIELD, SPINNING_CUBE] {
            let surface = HeadlessSurface::new(Viewport::new(0.0, 0.0)).close_after(3);
            assert_eq!(run_scene(name, surface), 3, "{name}");
        }
    }

    #[test]
    fn scenes_survive_minimizing_mid_run() {
        for name in [CUBE_FIELD, SPINNING_CUBE] {
            let surface = HeadlessSurface::new(Viewport::new(1000.0, 800.0))
                .resize_after(2, Viewport::new(0.0, 0.0))
                .close_after(5);
            assert_eq!(run_scene(name, surface), 5, "{name}");
        }
    }
}
