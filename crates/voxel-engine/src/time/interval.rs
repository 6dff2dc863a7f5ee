use std::time::Duration;

use crate::error::{EngineError, Result};

/// Minimum wall-clock duration a frame should occupy.
///
/// Always strictly positive; built from a target frame rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrameInterval(Duration);

impl FrameInterval {
    /// Builds the interval for `fps` frames per second.
    ///
    /// Zero, negative and non-finite rates are rejected rather than clamped.
    pub fn from_fps(fps: f64) -> Result<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(EngineError::InvalidFrameRate(fps));
        }

        let interval = Duration::try_from_secs_f64(1.0 / fps)
            .map_err(|_| EngineError::InvalidFrameRate(fps))?;

        // Rates high enough to round to a zero interval are unpaceable.
        if interval.is_zero() {
            return Err(EngineError::InvalidFrameRate(fps));
        }

        Ok(Self(interval))
    }

    #[inline]
    pub fn as_duration(self) -> Duration {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

/// Time left in the frame budget; zero once the frame overran.
///
/// There is no frame debt: an overrun does not shorten later sleeps.
#[inline]
pub fn sleep_duration(elapsed: Duration, interval: FrameInterval) -> Duration {
    interval.0.saturating_sub(elapsed)
}

/// Fraction of the frame budget consumed (`1.0` = exactly on budget).
#[inline]
pub fn budget_usage(elapsed: Duration, interval: FrameInterval) -> f64 {
    elapsed.as_secs_f64() / interval.as_secs_f64()
}
