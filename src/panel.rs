//! Terminal control panel
//!
//! Line commands on stdin edit the live settings through `Controls`.
//! With `--json` every redraw and notice is a single `STATE:`/`NOTICE:`
//! line so a front-end process can drive the macro instead of a human.

use anyhow::Result;
use chat_macro::{uwu_speak, Controls, Error};
use serde_json::json;
use std::io::{BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};

const HELP: &str = "\
Commands:
  pastes <a,b,c>      replace the chat pastes
  trigger <key>       change the trigger key (e.g. f4, shift_r)
  broadcast [on|off]  toggle sending into ALL chat
  uwu                 convert the panel to UwU
  show                redraw the panel
  quit                exit";

/// One panel command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the phrase pool (raw comma-separated text)
    Pastes(String),
    /// Change the trigger key by name
    Trigger(String),
    /// Set the all-chat flag, or toggle it when `None`
    Broadcast(Option<bool>),
    /// Convert the labels to UwU speak
    Uwu,
    Show,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line
    ///
    /// # Arguments
    /// * `line` - Raw line read from stdin
    ///
    /// # Returns
    /// `None` for unknown verbs or a bad `broadcast` argument
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim_start();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest),
            None => (line.trim_end(), ""),
        };

        match verb.to_lowercase().as_str() {
            // phrases keep their spacing; only the newline goes
            "pastes" | "p" => Some(Self::Pastes(rest.trim_end_matches(['\r', '\n']).to_string())),
            "trigger" | "t" => Some(Self::Trigger(rest.trim().to_string())),
            "broadcast" | "b" => match rest.trim().to_lowercase().as_str() {
                "" => Some(Self::Broadcast(None)),
                "on" | "true" | "1" => Some(Self::Broadcast(Some(true))),
                "off" | "false" | "0" => Some(Self::Broadcast(Some(false))),
                _ => None,
            },
            "uwu" => Some(Self::Uwu),
            "show" | "" => Some(Self::Show),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Labels {
    current_pastes: String,
    paste_prompt: String,
    update_pastes: String,
    current_trigger: String,
    trigger_prompt: String,
    update_trigger: String,
    uwu_button: String,
    broadcast_toggle: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            current_pastes: "Current chat pastes:".to_string(),
            paste_prompt: "Enter new pastes (comma-separated):".to_string(),
            update_pastes: "Update Pastes".to_string(),
            current_trigger: "Current macro_trigger:".to_string(),
            trigger_prompt: "Enter trigger key (e.g., shift_r):".to_string(),
            update_trigger: "Update Trigger".to_string(),
            uwu_button: "Convert to UwU".to_string(),
            broadcast_toggle: "Send paste into ALL chat".to_string(),
        }
    }
}

impl Labels {
    // The checkbox keeps its text, like a real toggle widget would.
    fn uwu(&mut self) {
        for label in [
            &mut self.current_pastes,
            &mut self.paste_prompt,
            &mut self.update_pastes,
            &mut self.current_trigger,
            &mut self.trigger_prompt,
            &mut self.update_trigger,
            &mut self.uwu_button,
        ] {
            *label = uwu_speak(label);
        }
    }
}

/// Terminal rendition of the settings window
pub struct Panel {
    /// Live settings shared with the trigger engine
    controls: Controls,
    /// Label texts (rewritten by `uwu`)
    labels: Labels,
    /// Emit `STATE:`/`NOTICE:` JSON lines instead of text
    json: bool,
}

impl Panel {
    /// Create a panel
    ///
    /// # Arguments
    /// * `controls` - Handle to the running macro's settings
    /// * `json` - Machine-readable output for a front-end process
    pub fn new(controls: Controls, json: bool) -> Self {
        Self {
            controls,
            labels: Labels::default(),
            json,
        }
    }

    /// Apply one command
    ///
    /// # Returns
    /// `Ok(false)` when the panel should close (`quit`)
    ///
    /// # Errors
    /// Write failures, or a poisoned settings lock
    pub fn apply<W: Write>(&mut self, command: Command, out: &mut W) -> Result<bool> {
        match command {
            Command::Pastes(raw) => match self.controls.configure_pastes(&raw) {
                Ok(()) => self.render(out)?,
                Err(Error::EmptyInput) => {
                    self.notice(out, "Empty Field", "Please enter new pastes.")?
                }
                Err(e) => return Err(e.into()),
            },
            Command::Trigger(name) => match self.controls.configure_trigger(&name) {
                Ok(_) => self.render(out)?,
                Err(Error::InvalidKeyName(name)) => {
                    self.notice(out, "Invalid Key", &format!("Invalid key name: {}", name))?
                }
                Err(e) => return Err(e.into()),
            },
            Command::Broadcast(Some(enabled)) => {
                self.controls.set_broadcast(enabled);
                self.render(out)?;
            }
            Command::Broadcast(None) => {
                self.controls.toggle_broadcast();
                self.render(out)?;
            }
            Command::Uwu => {
                self.labels.uwu();
                self.render(out)?;
            }
            Command::Show => self.render(out)?,
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    pub fn render<W: Write>(&self, out: &mut W) -> Result<()> {
        let pastes = self.controls.current_pastes()?;
        let trigger = self.controls.current_trigger_display()?;
        let broadcast = self.controls.broadcast();

        if self.json {
            let state = json!({
                "pastes": pastes,
                "trigger": trigger,
                "broadcast": broadcast,
                "labels": {
                    "currentPastes": self.labels.current_pastes,
                    "pastePrompt": self.labels.paste_prompt,
                    "updatePastes": self.labels.update_pastes,
                    "currentTrigger": self.labels.current_trigger,
                    "triggerPrompt": self.labels.trigger_prompt,
                    "updateTrigger": self.labels.update_trigger,
                    "uwuButton": self.labels.uwu_button,
                    "broadcastToggle": self.labels.broadcast_toggle,
                },
            });
            writeln!(out, "STATE:{}", state)?;
            return Ok(());
        }

        let labels = &self.labels;
        writeln!(out)?;
        writeln!(out, "{}", labels.current_pastes)?;
        writeln!(out, "  {}", pastes.join(", "))?;
        writeln!(out, "{}  -> pastes <a,b,c>  [{}]", labels.paste_prompt, labels.update_pastes)?;
        writeln!(out, "{}", labels.current_trigger)?;
        writeln!(out, "  ({})", trigger)?;
        writeln!(out, "{}  -> trigger <key>  [{}]", labels.trigger_prompt, labels.update_trigger)?;
        writeln!(out, "[{}]  -> uwu", labels.uwu_button)?;
        writeln!(
            out,
            "[{}] {}  -> broadcast",
            if broadcast { "x" } else { " " },
            labels.broadcast_toggle
        )?;
        Ok(())
    }

    fn notice<W: Write>(&self, out: &mut W, title: &str, message: &str) -> Result<()> {
        if self.json {
            writeln!(out, "NOTICE:{}", json!({ "title": title, "message": message }))?;
        } else {
            writeln!(out, "{}: {}", title, message)?;
        }
        Ok(())
    }

    /// Read commands until `quit`, end of input, or `stop` is set elsewhere
    ///
    /// `quit` sets `stop` so the engine winds down too.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W, stop: &AtomicBool) -> Result<()> {
        self.render(out)?;
        for line in input.lines() {
            if stop.load(Ordering::Acquire) {
                break;
            }
            let line = line?;
            match Command::parse(&line) {
                Some(command) => {
                    if !self.apply(command, out)? {
                        stop.store(true, Ordering::Release);
                        break;
                    }
                }
                None => self.notice(out, "Unknown Command", line.trim())?,
            }
            out.flush()?;
        }
        Ok(())
    }
}
