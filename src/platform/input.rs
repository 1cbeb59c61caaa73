//! Held-key input
//!
//! Key events arrive between ticks and are only read at the start of the
//! next one, so a plain set of held key names is enough.

use std::collections::HashSet;

use crate::sim::TickInput;

/// Key names as reported by `KeyboardEvent.key`
pub const KEY_LEFT: &str = "ArrowLeft";
pub const KEY_RIGHT: &str = "ArrowRight";
pub const KEY_FIRE: &str = " ";

/// Anything that can report the current movement and fire intent
pub trait InputSource {
    fn sample(&self) -> TickInput;
}

/// A fixed input, handy for scripted runs
impl InputSource for TickInput {
    fn sample(&self) -> TickInput {
        *self
    }
}

/// Currently held keys
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<String>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: &str) {
        self.held.insert(key.to_owned());
    }

    pub fn key_up(&mut self, key: &str) {
        self.held.remove(key);
    }

    /// Forget everything (focus loss, returning to menu)
    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.held.contains(key)
    }
}

impl InputSource for KeyState {
    fn sample(&self) -> TickInput {
        TickInput {
            left: self.is_held(KEY_LEFT),
            right: self.is_held(KEY_RIGHT),
            fire: self.is_held(KEY_FIRE),
        }
    }
}
