//! Flat JSON key/value preferences.
//!
//! The file is read once at startup and written back only on `persist`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{EngineError, Result};

pub type PreferenceMap = Map<String, Value>;

/// Preferences backed by a JSON object on disk.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
    values: PreferenceMap,
    dirty: bool,
}

impl Preferences {
    /// Loads `path`, creating it from `defaults` when it does not exist.
    ///
    /// An existing file is used as-is; defaults are not merged into it.
    pub fn open(path: impl Into<PathBuf>, defaults: PreferenceMap) -> Result<Self> {
        let path = path.into();

        let values = match fs::read_to_string(&path) {
            Ok(text) => parse_object(&text)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("creating preferences at {}", path.display());
                write_map(&path, &defaults)?;
                defaults
            }
            Err(err) => return Err(err.into()),
        };

        log::debug!("loaded {} preference(s) from {}", values.len(), path.display());
        Ok(Self { path, values, dirty: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn as_map(&self) -> &PreferenceMap {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Reads `key` as `T`. Missing or mistyped values are errors.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let value = self.values.get(key).ok_or_else(|| EngineError::Preference {
            key: key.to_string(),
            reason: "missing".to_string(),
        })?;

        T::deserialize(value).map_err(|err| EngineError::Preference {
            key: key.to_string(),
            reason: err.to_string(),
        })
    }

    /// Sets `key` in memory. Call `persist` to write it out.
    pub fn set(&mut self, key: impl Into<String>, value: impl Serialize) -> Result<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|err| EngineError::Preference {
            key: key.clone(),
            reason: err.to_string(),
        })?;

        if self.values.get(&key) != Some(&value) {
            self.values.insert(key, value);
            self.dirty = true;
        }
        Ok(())
    }

    /// True when `set` changed something since the last load or persist.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn persist(&mut self) -> Result<()> {
        write_map(&self.path, &self.values)?;
        self.dirty = false;
        Ok(())
    }
}

fn parse_object(text: &str) -> Result<PreferenceMap> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(EngineError::Preference {
            key: "(root)".to_string(),
            reason: format!("expected a JSON object at the top level, found {}", kind_of(&other)),
        }),
    }
}

fn write_map(path: &Path, map: &PreferenceMap) -> Result<()> {
    let mut text = serde_json::to_string_pretty(map)?;
    text.push('\n');
    fs::write(path, text)?;
    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn defaults() -> PreferenceMap {
        match json!({ "base_window_size": [1000, 800], "fps": 60 }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");

        let prefs = Preferences::open(&path, defaults()).unwrap();
        assert!(path.exists());
        assert_eq!(prefs.as_map(), &defaults());

        let reopened = Preferences::open(&path, PreferenceMap::new()).unwrap();
        assert_eq!(reopened.as_map(), prefs.as_map());
    }

    #[test]
    fn existing_file_wins_over_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{ "fps": 30 }"#).unwrap();

        let prefs = Preferences::open(&path, defaults()).unwrap();
        assert_eq!(prefs.get("fps"), Some(&json!(30)));
        assert_eq!(prefs.get("base_window_size"), None);

        // Untouched on disk.
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{ "fps": 30 }"#);
    }

    #[test]
    fn typed_reads() {
        let dir = TempDir::new().unwrap();
        let prefs = Preferences::open(dir.path().join("p.json"), defaults()).unwrap();

        assert_eq!(prefs.get_as::<u32>("fps").unwrap(), 60);
        assert_eq!(prefs.get_as::<[u32; 2]>("base_window_size").unwrap(), [1000, 800]);

        match prefs.get_as::<String>("fps") {
            Err(EngineError::Preference { key, .. }) => assert_eq!(key, "fps"),
            other => panic!("expected a preference error, got {other:?}"),
        }
        match prefs.get_as::<u32>("volume") {
            Err(EngineError::Preference { key, reason }) => {
                assert_eq!(key, "volume");
                assert_eq!(reason, "missing");
            }
            other => panic!("expected a preference error, got {other:?}"),
        }
    }

    #[test]
    fn set_then_persist_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");

        let mut prefs = Preferences::open(&path, defaults()).unwrap();
        prefs.set("fps", 144).unwrap();
        prefs.set("player", "steve").unwrap();
        assert!(prefs.is_dirty());
        prefs.persist().unwrap();
        assert!(!prefs.is_dirty());

        let reopened = Preferences::open(&path, PreferenceMap::new()).unwrap();
        assert_eq!(reopened.get_as::<u32>("fps").unwrap(), 144);
        assert_eq!(reopened.get_as::<String>("player").unwrap(), "steve");
    }

    #[test]
    fn setting_an_equal_value_is_not_a_change() {
        let dir = TempDir::new().unwrap();
        let mut prefs = Preferences::open(dir.path().join("p.json"), defaults()).unwrap();
        prefs.set("fps", 60).unwrap();
        assert!(!prefs.is_dirty());
    }

    #[test]
    fn unsaved_changes_stay_in_memory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");

        let mut prefs = Preferences::open(&path, defaults()).unwrap();
        prefs.set("fps", 1).unwrap();

        let reopened = Preferences::open(&path, PreferenceMap::new()).unwrap();
        assert_eq!(reopened.get_as::<u32>("fps").unwrap(), 60);
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Preferences::open(&path, defaults()),
            Err(EngineError::PreferencesFormat(_))
        ));
    }

    #[test]
    fn non_object_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        match Preferences::open(&path, defaults()) {
            Err(EngineError::Preference { reason, .. }) => assert!(reason.contains("an array")),
            other => panic!("expected a preference error, got {other:?}"),
        }
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/p.json");
        assert!(matches!(
            Preferences::open(&path, defaults()),
            Err(EngineError::PreferencesIo(_))
        ));
    }
}
