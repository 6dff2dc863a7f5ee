//! Game-wide constants.

use serde_json::json;
use voxel_engine::config::{FPS_KEY, WINDOW_SIZE_KEY};
use voxel_engine::paint::Color;
use voxel_engine::preferences::PreferenceMap;

pub const WINDOW_TITLE: &str = concat!("Voxel Battles v", env!("CARGO_PKG_VERSION_MAJOR"), ".", env!("CARGO_PKG_VERSION_MINOR"));

/// Read from, and created in, the working directory.
pub const PREFERENCES_FILE: &str = "preferences.json";

pub const SKY: Color = Color::from_premul(0.05, 0.06, 0.09, 1.0);

/// Written to `PREFERENCES_FILE` the first time the game runs.
pub fn default_preferences() -> PreferenceMap {
    let mut map = PreferenceMap::new();
    map.insert(WINDOW_SIZE_KEY.to_string(), json!([1000, 800]));
    map.insert(FPS_KEY.to_string(), json!(60));
    map
}
