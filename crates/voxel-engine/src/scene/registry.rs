use std::collections::BTreeMap;

use crate::error::{EngineError, Result};

use super::Scene;

type SceneFactory = Box<dyn Fn() -> Box<dyn Scene>>;

/// Named scene constructors.
///
/// Scenes are built fresh on every switch, so a scene re-entered by name
/// starts from its initial state and runs setup again.
#[derive(Default)]
pub struct SceneRegistry {
    factories: BTreeMap<String, SceneFactory>,
}

impl SceneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`, replacing any previous entry.
    pub fn register<S, F>(&mut self, name: impl Into<String>, factory: F) -> &mut Self
    where
        S: Scene + 'static,
        F: Fn() -> S + 'static,
    {
        let name = name.into();
        let factory: SceneFactory = Box::new(move || Box::new(factory()) as Box<dyn Scene>);
        if self.factories.insert(name.clone(), factory).is_some() {
            log::warn!("scene `{name}` registered twice; keeping the latest");
        }
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Scene>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| EngineError::UnknownScene(name.to_string()))?;
        Ok(factory())
    }
}
