use std::time::{Duration, Instant};

use super::interval::{sleep_duration, FrameInterval};

/// Frame timing snapshot handed to scene updates.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous frame began, in seconds.
    pub dt: f32,

    /// Timestamp taken when the frame began.
    pub now: Instant,

    /// Monotonic frame counter, starting at zero.
    pub frame_index: u64,
}

impl FrameTime {
    /// A fixed-step snapshot, for driving scenes outside the real clock.
    pub fn fixed(dt: f32, frame_index: u64) -> Self {
        Self {
            dt,
            now: Instant::now(),
            frame_index,
        }
    }
}

/// Per-loop clock: delta time for scenes, sleep time for pacing.
///
/// Delta time is clamped so a debugger pause or a minimized window does not
/// hand scenes a multi-second step.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frame_start: Option<Instant>,
    last_start: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            frame_start: None,
            last_start: None,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Number of frames begun so far.
    pub fn frames_begun(&self) -> u64 {
        self.frame_index
    }

    /// Records the start of a frame.
    pub fn begin_frame(&mut self) -> FrameTime {
        self.begin_frame_at(Instant::now())
    }

    pub fn begin_frame_at(&mut self, now: Instant) -> FrameTime {
        // First frame has no predecessor; report the minimum step.
        let dt = match self.last_start {
            Some(prev) => now.saturating_duration_since(prev).clamp(self.dt_min, self.dt_max),
            None => self.dt_min,
        };

        self.frame_start = Some(now);
        self.last_start = Some(now);

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Returns how long to sleep to fill `interval`, zero on overrun.
    pub fn end_frame(&mut self, interval: FrameInterval) -> Duration {
        self.end_frame_at(Instant::now(), interval)
    }

    pub fn end_frame_at(&mut self, now: Instant, interval: FrameInterval) -> Duration {
        match self.frame_start.take() {
            Some(start) => sleep_duration(now.saturating_duration_since(start), interval),
            None => {
                log::debug!("end_frame without begin_frame; not sleeping");
                Duration::ZERO
            }
        }
    }

    /// Time spent in the current frame so far.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        self.frame_start
            .map_or(Duration::ZERO, |start| now.saturating_duration_since(start))
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn sleeps_for_the_rest_of_the_budget() {
        let interval = FrameInterval::from_fps(50.0).unwrap();
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        clock.begin_frame_at(t0);
        assert_eq!(clock.end_frame_at(t0 + ms(4), interval), ms(16));
    }

    #[test]
    fn overrun_frames_sleep_zero_without_debt() {
        let interval = FrameInterval::from_fps(50.0).unwrap();
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        clock.begin_frame_at(t0);
        assert_eq!(clock.end_frame_at(t0 + ms(45), interval), Duration::ZERO);

        // The next frame is paced on its own; the 25ms overrun is forgotten.
        let t1 = t0 + ms(45);
        clock.begin_frame_at(t1);
        assert_eq!(clock.end_frame_at(t1 + ms(5), interval), ms(15));
    }

    #[test]
    fn end_without_begin_does_not_sleep() {
        let interval = FrameInterval::from_fps(60.0).unwrap();
        let mut clock = FrameClock::new();
        assert_eq!(clock.end_frame(interval), Duration::ZERO);
    }

    #[test]
    fn end_consumes_the_frame_start() {
        let interval = FrameInterval::from_fps(60.0).unwrap();
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        clock.begin_frame_at(t0);
        clock.end_frame_at(t0, interval);
        assert_eq!(clock.end_frame_at(t0, interval), Duration::ZERO);
    }

    #[test]
    fn dt_measures_time_between_begins() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        let first = clock.begin_frame_at(t0);
        let second = clock.begin_frame_at(t0 + ms(20));

        assert_eq!(first.frame_index, 0);
        assert_eq!(second.frame_index, 1);
        assert_relative_eq!(second.dt, 0.020, epsilon = 1e-6);
        assert_eq!(clock.frames_begun(), 2);
    }

    #[test]
    fn dt_is_clamped_after_a_stall() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        clock.begin_frame_at(t0);
        let ft = clock.begin_frame_at(t0 + Duration::from_secs(3));
        assert_relative_eq!(ft.dt, 0.25, epsilon = 1e-6);
    }

    #[test]
    fn elapsed_tracks_current_frame() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert_eq!(clock.elapsed_at(t0), Duration::ZERO);

        clock.begin_frame_at(t0);
        assert_eq!(clock.elapsed_at(t0 + ms(7)), ms(7));
    }
}
