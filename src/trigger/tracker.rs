//! Held-key tracking
//!
//! Mirrors which keys are physically down, fed one press/release at a
//! time by the listener thread. Only that thread touches it, so no lock.

use crate::keys::{ExitCombination, Key};
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct KeyStateTracker {
    held: HashSet<Key>,
    exit_combination: ExitCombination,
}

impl KeyStateTracker {
    pub fn new(exit_combination: ExitCombination) -> Self {
        Self {
            held: HashSet::new(),
            exit_combination,
        }
    }

    /// Record a key press (auto-repeat presses are no-ops)
    pub fn on_press(&mut self, key: Key) {
        if self.held.insert(key) {
            log::debug!("Key down: {}", key);
        }
    }

    /// Record a key release (no-op for keys we never saw go down)
    pub fn on_release(&mut self, key: Key) {
        if self.held.remove(&key) {
            log::debug!("Key up: {}", key);
        }
    }

    /// True when every key of the exit combination is held right now
    pub fn is_exit_combination_held(&self) -> bool {
        self.exit_combination.keys().is_subset(&self.held)
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.held.contains(key)
    }

    pub fn held(&self) -> &HashSet<Key> {
        &self.held
    }

    pub fn exit_combination(&self) -> &ExitCombination {
        &self.exit_combination
    }
}
