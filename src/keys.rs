//! Key identifiers and the key-name vocabulary
//!
//! Trigger and exit keys are configured by name (`f3`, `shift_r`, `alt_l`).
//! Names resolve through a static table; the first name listed for a key
//! is the one shown back to the user.

use crate::error::{Error, Result};
use rdev::Key as RawKey;
use std::collections::HashSet;
use std::fmt;

/// A physical keyboard key as reported by the global listener
///
/// Wraps `rdev::Key`; unknown keys are told apart by their raw code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(RawKey);

impl Key {
    pub const fn new(raw: RawKey) -> Self {
        Self(raw)
    }

    /// The underlying listener key
    pub fn raw(&self) -> RawKey {
        self.0
    }

    /// Canonical display name (e.g. `f3`)
    pub fn name(&self) -> String {
        key_name(*self)
    }
}

impl From<RawKey> for Key {
    fn from(raw: RawKey) -> Self {
        Self(raw)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Default trigger key
pub const DEFAULT_TRIGGER_KEY: Key = Key(RawKey::F3);

/// Default exit combination, written the way `--exit-combo` takes it
pub const DEFAULT_EXIT_COMBO: &str = "alt_l+right";

// Canonical name first; aliases after it.
const KEY_NAMES: &[(&str, RawKey)] = &[
    ("f1", RawKey::F1),
    ("f2", RawKey::F2),
    ("f3", RawKey::F3),
    ("f4", RawKey::F4),
    ("f5", RawKey::F5),
    ("f6", RawKey::F6),
    ("f7", RawKey::F7),
    ("f8", RawKey::F8),
    ("f9", RawKey::F9),
    ("f10", RawKey::F10),
    ("f11", RawKey::F11),
    ("f12", RawKey::F12),
    ("fn", RawKey::Function),
    ("function", RawKey::Function),
    ("alt_l", RawKey::Alt),
    ("alt", RawKey::Alt),
    ("altleft", RawKey::Alt),
    ("alt_gr", RawKey::AltGr),
    ("alt_r", RawKey::AltGr),
    ("altright", RawKey::AltGr),
    ("ctrl_l", RawKey::ControlLeft),
    ("ctrl", RawKey::ControlLeft),
    ("controlleft", RawKey::ControlLeft),
    ("ctrl_r", RawKey::ControlRight),
    ("controlright", RawKey::ControlRight),
    ("shift_l", RawKey::ShiftLeft),
    ("shift", RawKey::ShiftLeft),
    ("shiftleft", RawKey::ShiftLeft),
    ("shift_r", RawKey::ShiftRight),
    ("shiftright", RawKey::ShiftRight),
    ("cmd_l", RawKey::MetaLeft),
    ("cmd", RawKey::MetaLeft),
    ("command", RawKey::MetaLeft),
    ("metaleft", RawKey::MetaLeft),
    ("cmd_r", RawKey::MetaRight),
    ("metaright", RawKey::MetaRight),
    ("enter", RawKey::Return),
    ("return", RawKey::Return),
    ("esc", RawKey::Escape),
    ("escape", RawKey::Escape),
    ("space", RawKey::Space),
    ("tab", RawKey::Tab),
    ("backspace", RawKey::Backspace),
    ("delete", RawKey::Delete),
    ("insert", RawKey::Insert),
    ("caps_lock", RawKey::CapsLock),
    ("capslock", RawKey::CapsLock),
    ("home", RawKey::Home),
    ("end", RawKey::End),
    ("page_up", RawKey::PageUp),
    ("pageup", RawKey::PageUp),
    ("page_down", RawKey::PageDown),
    ("pagedown", RawKey::PageDown),
    ("up", RawKey::UpArrow),
    ("down", RawKey::DownArrow),
    ("left", RawKey::LeftArrow),
    ("right", RawKey::RightArrow),
    ("print_screen", RawKey::PrintScreen),
    ("printscreen", RawKey::PrintScreen),
    ("scroll_lock", RawKey::ScrollLock),
    ("scrolllock", RawKey::ScrollLock),
    ("pause", RawKey::Pause),
    ("num_lock", RawKey::NumLock),
    ("numlock", RawKey::NumLock),
    ("a", RawKey::KeyA),
    ("b", RawKey::KeyB),
    ("c", RawKey::KeyC),
    ("d", RawKey::KeyD),
    ("e", RawKey::KeyE),
    ("f", RawKey::KeyF),
    ("g", RawKey::KeyG),
    ("h", RawKey::KeyH),
    ("i", RawKey::KeyI),
    ("j", RawKey::KeyJ),
    ("k", RawKey::KeyK),
    ("l", RawKey::KeyL),
    ("m", RawKey::KeyM),
    ("n", RawKey::KeyN),
    ("o", RawKey::KeyO),
    ("p", RawKey::KeyP),
    ("q", RawKey::KeyQ),
    ("r", RawKey::KeyR),
    ("s", RawKey::KeyS),
    ("t", RawKey::KeyT),
    ("u", RawKey::KeyU),
    ("v", RawKey::KeyV),
    ("w", RawKey::KeyW),
    ("x", RawKey::KeyX),
    ("y", RawKey::KeyY),
    ("z", RawKey::KeyZ),
    ("0", RawKey::Num0),
    ("1", RawKey::Num1),
    ("2", RawKey::Num2),
    ("3", RawKey::Num3),
    ("4", RawKey::Num4),
    ("5", RawKey::Num5),
    ("6", RawKey::Num6),
    ("7", RawKey::Num7),
    ("8", RawKey::Num8),
    ("9", RawKey::Num9),
];

/// Resolve a key name (case-insensitive)
///
/// # Returns
/// `Error::InvalidKeyName` when the name is not in the vocabulary
pub fn parse_key(name: &str) -> Result<Key> {
    let wanted = name.trim().to_lowercase();
    KEY_NAMES
        .iter()
        .find(|(candidate, _)| *candidate == wanted)
        .map(|(_, raw)| Key(*raw))
        .ok_or_else(|| Error::InvalidKeyName(name.to_string()))
}

/// Canonical name for a key, or its debug form when it has none
pub fn key_name(key: Key) -> String {
    KEY_NAMES
        .iter()
        .find(|(_, raw)| Key(*raw) == key)
        .map(|(name, _)| (*name).to_string())
        .unwrap_or_else(|| format!("{:?}", key.0))
}

/// Keys that, held together, shut the macro down
///
/// Fixed at construction and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitCombination {
    keys: HashSet<Key>,
}

impl ExitCombination {
    pub fn new<I: IntoIterator<Item = Key>>(keys: I) -> Result<Self> {
        let keys: HashSet<Key> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(Error::EmptyExitCombination);
        }
        Ok(Self { keys })
    }

    /// Parse a `+`-separated list of key names, e.g. `alt_l+right`
    pub fn parse(combo: &str) -> Result<Self> {
        let keys = combo
            .split('+')
            .filter(|part| !part.trim().is_empty())
            .map(parse_key)
            .collect::<Result<Vec<_>>>()?;
        Self::new(keys)
    }

    pub fn keys(&self) -> &HashSet<Key> {
        &self.keys
    }

    pub fn contains(&self, key: &Key) -> bool {
        self.keys.contains(key)
    }
}

impl Default for ExitCombination {
    fn default() -> Self {
        Self {
            keys: [Key(RawKey::Alt), Key(RawKey::RightArrow)].into_iter().collect(),
        }
    }
}

impl fmt::Display for ExitCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self.keys.iter().map(Key::name).collect();
        names.sort();
        write!(f, "{}", names.join("+"))
    }
}
