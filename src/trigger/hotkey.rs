//! Global keyboard listener
//!
//! Uses `rdev` to hook every key press/release system-wide and forwards
//! them, in order, to the trigger engine over a channel.

use crate::error::{Error, Result};
use crate::trigger::KeyEvent;
use rdev::{listen, Event, EventType};
use std::sync::mpsc;
use std::thread::JoinHandle;

/// Map an `rdev` event to a key event (mouse/wheel events are dropped)
pub fn key_event(event: &Event) -> Option<KeyEvent> {
    match event.event_type {
        EventType::KeyPress(key) => Some(KeyEvent::Pressed(key.into())),
        EventType::KeyRelease(key) => Some(KeyEvent::Released(key.into())),
        _ => None,
    }
}

/// Background thread owning the OS keyboard hook
///
/// `rdev::listen` never returns while the hook is healthy, so the thread
/// lives until the process exits. Events sent after the engine has
/// stopped are discarded.
pub struct HotkeyListener {
    handle: JoinHandle<()>,
}

impl HotkeyListener {
    /// Start listening
    ///
    /// # Returns
    /// The listener and the receiving end of its event channel
    pub fn spawn() -> Result<(Self, mpsc::Receiver<KeyEvent>)> {
        let (tx, rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("key-listener".to_string())
            .spawn(move || {
                let result = listen(move |event: Event| {
                    if let Some(key_event) = key_event(&event) {
                        let _ = tx.send(key_event);
                    }
                });
                if let Err(e) = result {
                    log::error!("Keyboard listener stopped: {:?}", e);
                }
            })
            .map_err(|e| Error::Listener(format!("Failed to spawn listener thread: {}", e)))?;

        log::debug!("Keyboard listener started");
        Ok((Self { handle }, rx))
    }

    /// Whether the hook thread has exited (listener failure)
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
