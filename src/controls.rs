//! Shared macro settings
//!
//! The panel thread edits settings while the listener thread reads them.
//! Trigger key and phrase pool sit behind one mutex; the all-chat flag is
//! a plain atomic.

use crate::error::{Error, Result};
use crate::keys::{parse_key, Key, DEFAULT_TRIGGER_KEY};
use crate::pool::PhrasePool;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug)]
struct MacroState {
    trigger: Key,
    pool: PhrasePool,
}

/// Cloneable handle to the live trigger key, phrase pool and all-chat flag
#[derive(Debug, Clone)]
pub struct Controls {
    state: Arc<Mutex<MacroState>>,
    broadcast: Arc<AtomicBool>,
}

impl Controls {
    pub fn new(trigger: Key, pool: PhrasePool, broadcast: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(MacroState { trigger, pool })),
            broadcast: Arc::new(AtomicBool::new(broadcast)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, MacroState>> {
        self.state.lock().map_err(|_| Error::StatePoisoned)
    }

    /// Change the trigger key by name
    ///
    /// # Returns
    /// The canonical name of the new trigger. On `InvalidKeyName` the old
    /// trigger stays in place.
    pub fn configure_trigger(&self, name: &str) -> Result<String> {
        let key = parse_key(name).inspect_err(|_| {
            log::warn!("Rejected trigger key {:?}", name);
        })?;
        self.lock()?.trigger = key;
        log::info!("Trigger key set to {}", key);
        Ok(key.name())
    }

    /// Replace the phrase pool from a comma-separated list
    pub fn configure_pastes(&self, raw_csv: &str) -> Result<()> {
        self.lock()?.pool.replace(raw_csv).inspect_err(|_| {
            log::warn!("Rejected empty phrase list");
        })
    }

    /// All phrases, sorted
    pub fn current_pastes(&self) -> Result<Vec<String>> {
        Ok(self.lock()?.pool.phrases())
    }

    pub fn trigger(&self) -> Result<Key> {
        Ok(self.lock()?.trigger)
    }

    pub fn current_trigger_display(&self) -> Result<String> {
        Ok(self.trigger()?.name())
    }

    /// Pick the next phrase (listener thread)
    pub fn select_phrase(&self) -> Result<String> {
        self.lock()?.pool.select()
    }

    /// Whether pastes go to all chat
    pub fn broadcast(&self) -> bool {
        self.broadcast.load(Ordering::Acquire)
    }

    pub fn set_broadcast(&self, enabled: bool) {
        self.broadcast.store(enabled, Ordering::Release);
        log::info!("All-chat paste {}", if enabled { "on" } else { "off" });
    }

    /// Flip the all-chat flag, returning the new value
    pub fn toggle_broadcast(&self) -> bool {
        let enabled = !self.broadcast.fetch_xor(true, Ordering::AcqRel);
        log::info!("All-chat paste {}", if enabled { "on" } else { "off" });
        enabled
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_KEY, PhrasePool::default(), false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdev::Key as RawKey;

    #[test]
    fn test_configure_trigger() {
        let controls = Controls::default();
        assert_eq!(controls.current_trigger_display().unwrap(), "f3");

        let display = controls.configure_trigger("f4").unwrap();
        assert!(display.contains("f4"));
        assert_eq!(controls.trigger().unwrap(), Key::new(RawKey::F4));
    }

    #[test]
    fn test_configure_trigger_invalid_keeps_previous() {
        let controls = Controls::default();
        controls.configure_trigger("shift_r").unwrap();

        let err = controls.configure_trigger("not_a_real_key").unwrap_err();
        assert_eq!(err, Error::InvalidKeyName("not_a_real_key".to_string()));
        assert_eq!(controls.trigger().unwrap(), Key::new(RawKey::ShiftRight));
    }

    #[test]
    fn test_configure_pastes() {
        let controls = Controls::default();
        controls.configure_pastes("b,a").unwrap();
        assert_eq!(controls.current_pastes().unwrap(), vec!["a", "b"]);

        assert_eq!(controls.configure_pastes("  "), Err(Error::EmptyInput));
        assert_eq!(controls.current_pastes().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_clones_share_state() {
        let controls = Controls::default();
        let panel = controls.clone();

        panel.configure_pastes("only").unwrap();
        assert_eq!(controls.select_phrase().unwrap(), "only");

        panel.set_broadcast(true);
        assert!(controls.broadcast());
        assert!(!panel.toggle_broadcast());
        assert!(!controls.broadcast());
        assert!(controls.toggle_broadcast());
    }

    #[test]
    fn test_concurrent_reconfigure() {
        let controls = Controls::default();
        let panel = controls.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..50 {
                panel.configure_pastes(&format!("p{i},q{i}")).unwrap();
            }
        });
        for _ in 0..50 {
            controls.select_phrase().unwrap();
        }
        handle.join().unwrap();

        assert_eq!(controls.current_pastes().unwrap(), vec!["p49", "q49"]);
    }
}
