//! Engine configuration derived from preferences.

use winit::dpi::LogicalSize;

use crate::error::{EngineError, Result};
use crate::paint::Color;
use crate::preferences::Preferences;
use crate::time::FrameInterval;
use crate::window::WindowConfig;

/// Preference key holding the initial window size as `[width, height]`.
pub const WINDOW_SIZE_KEY: &str = "base_window_size";

/// Preference key holding the target frame rate.
pub const FPS_KEY: &str = "fps";

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub title: String,
    /// Logical pixels.
    pub window_size: (u32, u32),
    pub target_fps: f64,
    pub clear_color: Color,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            title: "voxel".to_string(),
            window_size: (500, 500),
            target_fps: 60.0,
            clear_color: Color::BLACK,
        }
    }
}

impl EngineConfig {
    /// Reads window size and frame rate from `prefs`.
    ///
    /// Both keys are required; the frame rate is validated here so a bad
    /// preferences file fails before any window opens.
    pub fn from_preferences(prefs: &Preferences) -> Result<Self> {
        let [width, height] = prefs.get_as::<[u32; 2]>(WINDOW_SIZE_KEY)?;
        if width == 0 || height == 0 {
            return Err(EngineError::Preference {
                key: WINDOW_SIZE_KEY.to_string(),
                reason: format!("window size must be non-zero, got {width}x{height}"),
            });
        }

        let target_fps = prefs.get_as::<f64>(FPS_KEY)?;
        FrameInterval::from_fps(target_fps)?;

        Ok(Self {
            window_size: (width, height),
            target_fps,
            ..Self::default()
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn interval(&self) -> Result<FrameInterval> {
        FrameInterval::from_fps(self.target_fps)
    }

    pub fn window_config(&self) -> WindowConfig {
        let (w, h) = self.window_size;
        WindowConfig {
            title: self.title.clone(),
            initial_size: LogicalSize::new(f64::from(w), f64::from(h)),
            clear_color: self.clear_color,
            ..WindowConfig::default()
        }
    }
}

/// Stores `size` under `WINDOW_SIZE_KEY` for the next launch.
///
/// A collapsed size (a window closed while minimized) is skipped, since it
/// would fail `EngineConfig::from_preferences` next time. Returns whether the
/// size was stored.
pub fn remember_window_size(prefs: &mut Preferences, size: (u32, u32)) -> Result<bool> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        log::debug!("not saving collapsed window size {width}x{height}");
        return Ok(false);
    }
    prefs.set(WINDOW_SIZE_KEY, [width, height])?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preferences::PreferenceMap;
    use approx::assert_relative_eq;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn prefs_with(dir: &TempDir, value: Value) -> Preferences {
        let Value::Object(map) = value else {
            panic!("test preferences must be an object");
        };
        Preferences::open(dir.path().join("prefs.json"), map).unwrap()
    }

    #[test]
    fn reads_size_and_fps() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "base_window_size": [1000, 800], "fps": 60 }));

        let cfg = EngineConfig::from_preferences(&prefs)
            .unwrap()
            .with_title("Voxel Battles v1.0");

        assert_eq!(cfg.window_size, (1000, 800));
        assert_relative_eq!(cfg.target_fps, 60.0);
        assert_relative_eq!(cfg.interval().unwrap().as_secs_f64(), 1.0 / 60.0, epsilon = 1e-9);

        let window = cfg.window_config();
        assert_eq!(window.title, "Voxel Battles v1.0");
        assert_eq!(window.initial_size, LogicalSize::new(1000.0, 800.0));
    }

    #[test]
    fn fractional_fps_is_accepted() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "base_window_size": [640, 480], "fps": 29.97 }));
        let cfg = EngineConfig::from_preferences(&prefs).unwrap();
        assert_relative_eq!(cfg.target_fps, 29.97);
    }

    #[test]
    fn missing_key_names_the_key() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "fps": 60 }));

        match EngineConfig::from_preferences(&prefs) {
            Err(EngineError::Preference { key, .. }) => assert_eq!(key, WINDOW_SIZE_KEY),
            other => panic!("expected a preference error, got {other:?}"),
        }
    }

    #[test]
    fn mistyped_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "base_window_size": "big", "fps": 60 }));
        assert!(matches!(
            EngineConfig::from_preferences(&prefs),
            Err(EngineError::Preference { .. })
        ));
    }

    #[test]
    fn zero_size_is_rejected() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "base_window_size": [0, 600], "fps": 60 }));
        assert!(matches!(
            EngineConfig::from_preferences(&prefs),
            Err(EngineError::Preference { .. })
        ));
    }

    #[test]
    fn zero_fps_fails_fast() {
        let dir = TempDir::new().unwrap();
        let prefs = prefs_with(&dir, json!({ "base_window_size": [800, 600], "fps": 0 }));
        assert!(matches!(
            EngineConfig::from_preferences(&prefs),
            Err(EngineError::InvalidFrameRate(_))
        ));
    }

    #[test]
    fn empty_preferences_fail() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::open(dir.path().join("empty.json"), PreferenceMap::new()).unwrap();
        assert!(EngineConfig::from_preferences(&prefs).is_err());
    }

    #[test]
    fn remembered_size_round_trips_through_the_file() {
        let dir = TempDir::new().unwrap();
        let mut prefs = prefs_with(&dir, json!({ "base_window_size": [1000, 800], "fps": 60 }));

        assert!(remember_window_size(&mut prefs, (1280, 720)).unwrap());
        prefs.persist().unwrap();

        let reopened = Preferences::open(prefs.path(), PreferenceMap::new()).unwrap();
        assert_eq!(EngineConfig::from_preferences(&reopened).unwrap().window_size, (1280, 720));
    }

    #[test]
    fn collapsed_size_is_not_remembered() {
        let dir = TempDir::new().unwrap();
        let mut prefs = prefs_with(&dir, json!({ "base_window_size": [1000, 800], "fps": 60 }));

        for size in [(0, 0), (0, 720), (1280, 0)] {
            assert!(!remember_window_size(&mut prefs, size).unwrap());
        }
        assert!(!prefs.is_dirty());
        assert_eq!(EngineConfig::from_preferences(&prefs).unwrap().window_size, (1000, 800));
    }
}
