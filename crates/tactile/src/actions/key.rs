//! Chainable keyboard actions.

use super::input::KeyInput;
use std::time::Duration;

/// Fluent keyboard action composer bound to one [`KeyInput`]
#[derive(Debug, Clone)]
pub struct KeyActions {
    source: KeyInput,
}

impl KeyActions {
    /// Wrap a key source
    #[must_use]
    pub const fn new(source: KeyInput) -> Self {
        Self { source }
    }

    /// Underlying source
    #[must_use]
    pub const fn source(&self) -> &KeyInput {
        &self.source
    }

    pub(crate) fn source_mut(&mut self) -> &mut KeyInput {
        &mut self.source
    }

    /// Press and hold a key
    pub fn key_down(&mut self, key: char) -> &mut Self {
        self.source.create_key_down(key);
        self
    }

    /// Release a key
    pub fn key_up(&mut self, key: char) -> &mut Self {
        self.source.create_key_up(key);
        self
    }

    /// Press and release every character of `text` in order
    pub fn send_keys(&mut self, text: &str) -> &mut Self {
        for key in text.chars() {
            self.key_down(key).key_up(key);
        }
        self
    }

    /// Idle for one tick
    pub fn pause(&mut self, duration: Duration) -> &mut Self {
        self.source.create_pause(duration);
        self
    }
}
