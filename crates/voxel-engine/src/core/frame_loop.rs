use std::time::{Duration, Instant};

use crate::error::Result;
use crate::scene::{Scene, SceneHost, SceneRegistry};
use crate::surface::Surface;
use crate::time::{budget_usage, FrameClock, FrameInterval};

use super::ctx::{RuntimeCommand, RuntimeCtx};

/// Counters reported when the loop exits.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct LoopStats {
    pub frames: u64,
    /// Frames that used more than their interval.
    pub overruns: u64,
}

/// What one iteration decided.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Flow {
    Continue { sleep: Duration },
    Exit,
}

/// Sequential, single-threaded frame driver.
///
/// Each iteration: begin frame, poll events, run the active scene, present,
/// apply queued runtime commands, then sleep out the rest of the interval.
/// The close request is checked once per iteration, before the frame starts.
pub struct FrameLoop {
    host: SceneHost,
    registry: SceneRegistry,
    clock: FrameClock,
    interval: FrameInterval,
    stats: LoopStats,
}

impl FrameLoop {
    pub fn new(interval: FrameInterval, registry: SceneRegistry) -> Self {
        Self {
            host: SceneHost::new(),
            registry,
            clock: FrameClock::new(),
            interval,
            stats: LoopStats::default(),
        }
    }

    pub fn host(&self) -> &SceneHost {
        &self.host
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn interval(&self) -> FrameInterval {
        self.interval
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn set_current_scene<S: Scene + 'static>(&mut self, scene: S) {
        self.host.set_current_scene(scene);
    }

    /// Activates a registered scene by name.
    pub fn switch_scene(&mut self, name: &str) -> Result<()> {
        let scene = self.registry.create(name)?;
        self.host.set_current_scene_boxed(scene);
        Ok(())
    }

    /// Runs until the surface asks to close or a scene requests exit.
    ///
    /// Scenes are torn down before returning, on success and on error.
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> Result<LoopStats> {
        let result = self.run_frames(&mut *surface);
        self.host.shutdown(surface);

        if let Ok(stats) = &result {
            log::info!("frame loop exited after {} frames ({} overran)", stats.frames, stats.overruns);
        }
        result
    }

    fn run_frames(&mut self, surface: &mut dyn Surface) -> Result<LoopStats> {
        while !surface.requested_close() {
            match self.step(surface)? {
                Flow::Continue { sleep } => {
                    if !sleep.is_zero() {
                        std::thread::sleep(sleep);
                    }
                }
                Flow::Exit => break,
            }
        }
        Ok(self.stats)
    }

    /// One frame, minus the sleep.
    fn step(&mut self, surface: &mut dyn Surface) -> Result<Flow> {
        let time = self.clock.begin_frame();

        surface.poll_events()?;

        let mut runtime = RuntimeCtx::default();
        self.host.run_frame(surface, time, &mut runtime)?;

        surface.present_frame()?;
        self.stats.frames += 1;

        let exit = self.apply_commands(&mut runtime)?;

        let now = Instant::now();
        let elapsed = self.clock.elapsed_at(now);
        let sleep = self.clock.end_frame_at(now, self.interval);

        log::trace!(
            "frame {} used {:.0}% of its budget",
            time.frame_index,
            budget_usage(elapsed, self.interval) * 100.0
        );
        if elapsed > self.interval.as_duration() {
            self.stats.overruns += 1;
            log::debug!(
                "frame {} overran: {:.2}ms > {:.2}ms",
                time.frame_index,
                elapsed.as_secs_f64() * 1e3,
                self.interval.as_secs_f64() * 1e3
            );
        }

        Ok(if exit { Flow::Exit } else { Flow::Continue { sleep } })
    }

    /// Applies buffered commands in order. Returns true on exit.
    fn apply_commands(&mut self, runtime: &mut RuntimeCtx) -> Result<bool> {
        let mut exit = false;
        for cmd in runtime.drain() {
            match cmd {
                RuntimeCommand::SwitchScene(name) => self.switch_scene(&name)?,
                RuntimeCommand::SetTargetFps(fps) => {
                    self.interval = FrameInterval::from_fps(fps)?;
                    log::info!("target frame rate set to {fps}");
                }
                RuntimeCommand::Exit => {
                    log::info!("exit requested by scene");
                    exit = true;
                }
            }
        }
        Ok(exit)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::coords::{Vec2, Viewport};
    use crate::core::UpdateCtx;
    use crate::draw::{Frame, Quad, ZIndex};
    use crate::error::EngineError;
    use crate::input::Key;
    use crate::paint::Color;
    use crate::scene::SceneState;
    use crate::surface::HeadlessSurface;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Draws one quad per frame and reacts to a few keys.
    struct Probe {
        name: &'static str,
        log: Log,
    }

    impl Scene for Probe {
        fn name(&self) -> &str {
            self.name
        }

        fn setup(&mut self, surface: &mut dyn Surface) -> anyhow::Result<()> {
            surface.set_title(self.name);
            self.log.borrow_mut().push(format!("{}:setup", self.name));
            Ok(())
        }

        fn update(&mut self, ctx: &mut UpdateCtx<'_>) -> anyhow::Result<()> {
            self.log.borrow_mut().push(format!("{}:update", self.name));
            if ctx.surface.input_frame().key_pressed(Key::Digit2) {
                ctx.runtime.switch_scene("second");
            }
            if ctx.surface.input_frame().key_pressed(Key::Escape) {
                ctx.runtime.exit();
            }
            if ctx.surface.input_frame().key_pressed(Key::F) {
                ctx.runtime.set_target_fps(0.0);
            }
            Ok(())
        }

        fn draw(&self, frame: &mut Frame<'_>) -> anyhow::Result<()> {
            let size = Vec2::new(frame.viewport.width, frame.viewport.height);
            frame.list.quad(ZIndex::WORLD, Quad::rect(Vec2::zero(), size, Color::BLUE));
            self.log.borrow_mut().push(format!("{}:draw", self.name));
            Ok(())
        }

        fn teardown(&mut self, _surface: &mut dyn Surface) {
            self.log.borrow_mut().push(format!("{}:teardown", self.name));
        }
    }

    fn registry(log: &Log) -> SceneRegistry {
        let mut reg = SceneRegistry::new();
        let first = log.clone();
        let second = log.clone();
        reg.register("first", move || Probe { name: "first", log: first.clone() })
            .register("second", move || Probe { name: "second", log: second.clone() });
        reg
    }

    fn fast_loop(log: &Log) -> FrameLoop {
        FrameLoop::new(FrameInterval::from_fps(1000.0).unwrap(), registry(log))
    }

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(Viewport::new(320.0, 240.0))
    }

    #[test]
    fn runs_until_the_surface_closes() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface().close_after(3);
        let stats = fl.run(&mut s).unwrap();

        assert_eq!(stats.frames, 3);
        assert_eq!(s.presented(), 3);
        assert_eq!(s.polls(), 3);
        assert_eq!(s.last_presented_len(), 1);
        assert_eq!(s.title(), "first");
        assert_eq!(
            *log.borrow(),
            vec![
                "first:setup",
                "first:update",
                "first:draw",
                "first:update",
                "first:draw",
                "first:update",
                "first:draw",
                "first:teardown",
            ]
        );
    }

    #[test]
    fn closed_surface_runs_no_frames() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface();
        s.request_close();
        let stats = fl.run(&mut s).unwrap();

        assert_eq!(stats.frames, 0);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn no_scene_is_a_fatal_error() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        let mut s = surface().close_after(3);

        assert!(matches!(fl.run(&mut s), Err(EngineError::NoActiveScene)));
        assert_eq!(s.presented(), 0);
    }

    #[test]
    fn switch_command_applies_between_frames() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface().close_after(2);
        s.press(Key::Digit2);
        fl.run(&mut s).unwrap();

        assert_eq!(
            *log.borrow(),
            vec![
                "first:setup",
                "first:update",
                "first:draw",
                "first:teardown",
                "second:setup",
                "second:update",
                "second:draw",
                "second:teardown",
            ]
        );
        assert_eq!(s.title(), "second");
    }

    #[test]
    fn exit_command_stops_the_loop() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface().close_after(100);
        s.press(Key::Escape);
        let stats = fl.run(&mut s).unwrap();

        assert_eq!(stats.frames, 1);
        assert_eq!(fl.host().state(), SceneState::Empty);
    }

    #[test]
    fn invalid_fps_command_is_fatal() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface().close_after(100);
        s.press(Key::F);

        assert!(matches!(fl.run(&mut s), Err(EngineError::InvalidFrameRate(_))));
        assert!(log.borrow().contains(&"first:teardown".to_string()));
    }

    #[test]
    fn unknown_scene_name_is_rejected() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        assert!(matches!(fl.switch_scene("nope"), Err(EngineError::UnknownScene(_))));
        assert_eq!(fl.host().state(), SceneState::Empty);
    }

    #[test]
    fn loop_is_paced_to_the_interval() {
        let log = Log::default();
        let mut fl = FrameLoop::new(FrameInterval::from_fps(200.0).unwrap(), registry(&log));
        fl.switch_scene("first").unwrap();

        let mut s = surface().close_after(4);
        let start = Instant::now();
        fl.run(&mut s).unwrap();

        // 4 frames at 5ms each; the sleeps make this a lower bound.
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn collapsing_surface_keeps_the_loop_running() {
        let log = Log::default();
        let mut fl = fast_loop(&log);
        fl.switch_scene("first").unwrap();

        let mut s = surface()
            .resize_after(1, Viewport::new(0.0, 0.0))
            .close_after(4);
        let stats = fl.run(&mut s).unwrap();

        assert_eq!(stats.frames, 4);
        assert_eq!(s.dimensions(), Viewport::new(0.0, 0.0));
        assert_eq!(log.borrow().iter().filter(|e| *e == "first:draw").count(), 4);
    }
}
