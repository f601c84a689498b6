//! Trigger engine
//!
//! Consumes the global key-event stream one event at a time. Releasing
//! the trigger key pastes a phrase; holding the whole exit combination
//! shuts the macro down.
//!
//! Events arrive over a channel from [`hotkey::HotkeyListener`], so the
//! engine itself never touches the OS hook and can be driven directly in
//! tests.

use crate::controls::Controls;
use crate::dispatch::{KeySink, PasteDispatcher};
use crate::error::{Error, Result};
use crate::keys::{ExitCombination, Key};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::time::Duration;

pub mod hotkey;
pub mod tracker;

pub use tracker::KeyStateTracker;

// How often `run_until` looks at its stop flag while idle
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Raw key event from the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
}

/// Engine lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Running,
    /// Exit combination seen; terminal
    Terminating,
}

/// What the event loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Decides, per key event, whether to paste, exit, or do nothing
pub struct TriggerEngine<S: KeySink> {
    /// Keys currently held
    tracker: KeyStateTracker,
    /// Trigger key, phrase pool and all-chat flag shared with the panel
    controls: Controls,
    /// Where pastes go
    dispatcher: PasteDispatcher<S>,
    /// Running until the exit combination is seen
    state: EngineState,
}

impl<S: KeySink> TriggerEngine<S> {
    /// Create an engine
    ///
    /// # Arguments
    /// * `exit_combination` - Keys that shut the macro down when held together
    /// * `controls` - Shared settings; clone it for the UI before passing it in
    /// * `dispatcher` - Paste output (OS keyboard or a recording sink)
    pub fn new(
        exit_combination: ExitCombination,
        controls: Controls,
        dispatcher: PasteDispatcher<S>,
    ) -> Self {
        Self {
            tracker: KeyStateTracker::new(exit_combination),
            controls,
            dispatcher,
            state: EngineState::Running,
        }
    }

    /// Handle one key event
    ///
    /// Once terminating, every event is ignored and `Flow::Exit` is
    /// returned again.
    ///
    /// # Errors
    /// `Error::EmptyPool` / `Error::StatePoisoned` when a phrase cannot be
    /// selected. Both are internal faults.
    pub fn handle(&mut self, event: KeyEvent) -> Result<Flow> {
        if self.state == EngineState::Terminating {
            return Ok(Flow::Exit);
        }

        match event {
            KeyEvent::Pressed(key) => {
                self.tracker.on_press(key);
                if self.tracker.is_exit_combination_held() {
                    log::info!("Exit combination {} held, exiting", self.tracker.exit_combination());
                    self.state = EngineState::Terminating;
                    return Ok(Flow::Exit);
                }
            }
            KeyEvent::Released(key) => {
                let fire = key == self.controls.trigger()?;
                self.tracker.on_release(key);
                if fire {
                    self.fire()?;
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Select a phrase and paste it
    ///
    /// The settings lock is released before dispatch, so the panel is
    /// never blocked by the settle delay.
    pub fn fire(&mut self) -> Result<()> {
        let phrase = self.controls.select_phrase()?;
        let broadcast = self.controls.broadcast();
        self.dispatcher.send(&phrase, broadcast);
        Ok(())
    }

    /// Process events until the exit combination is held
    ///
    /// A closed channel means the listener died.
    pub fn run(&mut self, events: mpsc::Receiver<KeyEvent>) -> Result<()> {
        self.run_until(events, &AtomicBool::new(false))
    }

    /// Like [`run`](Self::run), but also stops once `stop` is set
    ///
    /// `stop` is checked between events, so a paste in progress always
    /// finishes and never leaves a modifier held down.
    pub fn run_until(&mut self, events: mpsc::Receiver<KeyEvent>, stop: &AtomicBool) -> Result<()> {
        loop {
            if stop.load(Ordering::Acquire) {
                log::info!("Stop requested");
                self.terminate();
                return Ok(());
            }

            match events.recv_timeout(STOP_POLL_INTERVAL) {
                Ok(event) => {
                    if self.handle(event)? == Flow::Exit {
                        return Ok(());
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {}
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    log::error!("Key event channel closed");
                    return Err(Error::Listener("key event channel closed".to_string()));
                }
            }
        }
    }

    /// Force the engine into `Terminating` (e.g. quit from the panel)
    pub fn terminate(&mut self) {
        self.state = EngineState::Terminating;
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn tracker(&self) -> &KeyStateTracker {
        &self.tracker
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn dispatcher(&self) -> &PasteDispatcher<S> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut PasteDispatcher<S> {
        &mut self.dispatcher
    }
}
