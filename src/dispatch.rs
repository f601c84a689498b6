//! Paste dispatch
//!
//! Types a phrase into whatever window has focus. The sequence is:
//!
//! 1. `Return` (or `Shift` down, `Return` down, `Shift` up for all-chat)
//! 2. wait [`SETTLE_DELAY`] so the chat box opens
//! 3. type the phrase plus `"\n"` to send it
//!
//! In the all-chat branch `Return` is never released explicitly; the
//! trailing newline of the typed text ends it.

use std::time::Duration;

/// Pause between opening the chat box and typing into it
pub const SETTLE_DELAY: Duration = Duration::from_millis(90);

/// Keys the dispatcher presses on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKey {
    /// Broadcast modifier (all-chat)
    Shift,
    /// Submit / open chat
    Return,
}

/// Where synthetic keyboard output goes
///
/// The OS implementation is [`EnigoSink`]; tests record into a `Vec`.
pub trait KeySink {
    fn key_down(&mut self, key: OutputKey);

    fn key_up(&mut self, key: OutputKey);

    /// Type literal text (not key combos)
    fn type_text(&mut self, text: &str);

    /// Block for `delay`
    fn settle(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

/// Sends phrases to the focused application through a [`KeySink`]
pub struct PasteDispatcher<S: KeySink> {
    sink: S,
    settle_delay: Duration,
}

impl<S: KeySink> PasteDispatcher<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            settle_delay: SETTLE_DELAY,
        }
    }

    /// Override the settle delay
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Open chat, wait, then type `phrase` and a newline
    pub fn send(&mut self, phrase: &str, use_broadcast_combo: bool) {
        if use_broadcast_combo {
            self.sink.key_down(OutputKey::Shift);
            self.sink.key_down(OutputKey::Return);
            self.sink.key_up(OutputKey::Shift);
        } else {
            self.sink.key_down(OutputKey::Return);
        }

        self.sink.settle(self.settle_delay);

        self.sink.type_text(&format!("{}\n", phrase));
        log::info!(
            "Pasted {:?}{}",
            phrase,
            if use_broadcast_combo { " (all chat)" } else { "" }
        );
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}

/// [`KeySink`] backed by the `enigo` keyboard controller
pub struct EnigoSink {
    enigo: enigo::Enigo,
}

impl EnigoSink {
    pub fn new() -> Self {
        Self {
            enigo: enigo::Enigo::new(),
        }
    }

    fn to_enigo(key: OutputKey) -> enigo::Key {
        match key {
            OutputKey::Shift => enigo::Key::Shift,
            OutputKey::Return => enigo::Key::Return,
        }
    }
}

impl Default for EnigoSink {
    fn default() -> Self {
        Self::new()
    }
}

impl KeySink for EnigoSink {
    fn key_down(&mut self, key: OutputKey) {
        use enigo::KeyboardControllable;
        self.enigo.key_down(Self::to_enigo(key));
    }

    fn key_up(&mut self, key: OutputKey) {
        use enigo::KeyboardControllable;
        self.enigo.key_up(Self::to_enigo(key));
    }

    fn type_text(&mut self, text: &str) {
        use enigo::KeyboardControllable;
        for piece in typed_pieces(text) {
            match piece {
                TypedPiece::Text(chunk) => self.enigo.key_sequence(chunk),
                TypedPiece::Newline => self.enigo.key_click(enigo::Key::Return),
            }
        }
    }
}

/// One step of typing literal text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedPiece<'a> {
    Text(&'a str),
    /// A real `Return` click, which also lifts a `Return` left held
    Newline,
}

/// Split text into runs of characters and `Return` clicks
///
/// Not every `enigo` backend turns `'\n'` inside `key_sequence` into a
/// Return key (Windows and macOS send it as a Unicode character), so
/// newlines are always clicked as keys.
pub fn typed_pieces(text: &str) -> Vec<TypedPiece<'_>> {
    let mut pieces = Vec::new();
    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            pieces.push(TypedPiece::Newline);
        }
        if !line.is_empty() {
            pieces.push(TypedPiece::Text(line));
        }
    }
    pieces
}

/// What a [`RecordingSink`] saw (testing utility)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Down(OutputKey),
    Up(OutputKey),
    Text(String),
    Settle(Duration),
}

/// [`KeySink`] that records instead of touching the OS
///
/// A testing utility: use it to check dispatch sequences without a
/// display server. `settle` is recorded but does not sleep.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<SinkEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain everything recorded so far
    pub fn take(&mut self) -> Vec<SinkEvent> {
        std::mem::take(&mut self.events)
    }
}

impl KeySink for RecordingSink {
    fn key_down(&mut self, key: OutputKey) {
        self.events.push(SinkEvent::Down(key));
    }

    fn key_up(&mut self, key: OutputKey) {
        self.events.push(SinkEvent::Up(key));
    }

    fn type_text(&mut self, text: &str) {
        self.events.push(SinkEvent::Text(text.to_string()));
    }

    fn settle(&mut self, delay: Duration) {
        self.events.push(SinkEvent::Settle(delay));
    }
}
