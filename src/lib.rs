//! # chat-macro
//!
//! **Release a key, say something.**
//!
//! A global hotkey chat macro. Every time the trigger key is released a
//! phrase is drawn from the pool and typed into whatever window has
//! focus, optionally through the all-chat combo (`Shift+Enter`). Holding
//! the exit combination shuts it down.
//!
//! ## Quick Example
//!
//! ```no_run
//! use chat_macro::{Controls, EnigoSink, ExitCombination, HotkeyListener, PasteDispatcher, TriggerEngine};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let controls = Controls::default();
//! let (_listener, events) = HotkeyListener::spawn()?;
//! let mut engine = TriggerEngine::new(
//!     ExitCombination::default(),
//!     controls.clone(),
//!     PasteDispatcher::new(EnigoSink::new()),
//! );
//! controls.configure_pastes("gg,wp,glhf")?;
//! engine.run(events)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How it fits together
//!
//! - [`trigger::hotkey`] hooks the keyboard and sends [`KeyEvent`]s down a channel
//! - [`TriggerEngine`] tracks held keys, watches for the exit combination
//!   and fires on trigger release
//! - [`PhrasePool`] hands out phrases without repeats until every one was used
//! - [`PasteDispatcher`] opens chat, waits for it to settle, and types the phrase
//! - [`Controls`] is the handle a UI uses to change the trigger, the phrases
//!   and the all-chat flag while the engine runs
//!
//! ## Platform notes
//!
//! Global hooks need an X11 session on Linux and Accessibility permission
//! on macOS.

pub mod config;
pub mod controls;
pub mod dispatch;
pub mod error;
pub mod keys;
pub mod pool;
pub mod trigger;
pub mod uwu;

pub use config::{MacroConfig, ValidatedConfig};
pub use controls::Controls;
pub use dispatch::{EnigoSink, KeySink, OutputKey, PasteDispatcher, SETTLE_DELAY};
pub use error::{Error, Result};
pub use keys::{key_name, parse_key, ExitCombination, Key};
pub use pool::PhrasePool;
pub use trigger::hotkey::HotkeyListener;
pub use trigger::{EngineState, Flow, KeyEvent, TriggerEngine};
pub use uwu::uwu_speak;
