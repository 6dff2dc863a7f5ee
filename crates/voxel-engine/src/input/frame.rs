use std::collections::HashSet;

use super::types::{InputEvent, Key, MouseButton};

/// Input transitions since the previous `poll_events`.
///
/// `InputState` answers "is it down"; `InputFrame` answers "did it change
/// this frame".
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Raw events in arrival order.
    pub events: Vec<InputEvent>,

    pub keys_pressed: HashSet<Key>,
    pub keys_released: HashSet<Key>,

    pub buttons_pressed: HashSet<MouseButton>,
    pub buttons_released: HashSet<MouseButton>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.events.clear();
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
    }

    #[inline]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[inline]
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }
}
