//! chat-macro binary - standalone chat macro with a terminal panel
//!
//! Release the trigger key to type a random phrase into the focused
//! window. Hold the exit combination (default Alt+Right) to quit.

use anyhow::{Context, Result};
use chat_macro::{EnigoSink, HotkeyListener, MacroConfig, PasteDispatcher, TriggerEngine};
use clap::Parser;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

mod panel;

#[derive(Debug, Parser)]
#[command(name = "chat-macro", version, about = "Release a key, paste a random chat phrase")]
struct Cli {
    /// Trigger key name (e.g. f3, shift_r, ctrl_r)
    #[arg(long, default_value = "f3")]
    hotkey: String,

    /// Keys that quit when held together, joined with '+'
    #[arg(long, default_value = chat_macro::keys::DEFAULT_EXIT_COMBO)]
    exit_combo: String,

    /// Comma-separated phrases (defaults to the built-in set)
    #[arg(long)]
    pastes: Option<String>,

    /// Start with "Send paste into ALL chat" enabled
    #[arg(long)]
    broadcast: bool,

    /// Emit panel state as STATE:/NOTICE: JSON lines for a front-end
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn macro_config(&self) -> MacroConfig {
        MacroConfig {
            hotkey: self.hotkey.clone(),
            exit_combo: self.exit_combo.clone(),
            pastes: self.pastes.clone(),
            broadcast: self.broadcast,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli
        .macro_config()
        .validate()
        .context("Invalid startup configuration")?;
    let controls = config.controls();

    log::info!(
        "Trigger: {} | Exit: {} | {} phrases",
        config.trigger,
        config.exit_combination,
        config.pool.len()
    );

    let (listener, events) = HotkeyListener::spawn().context("Failed to start keyboard listener")?;
    let stop = Arc::new(AtomicBool::new(false));

    let panel_controls = controls.clone();
    let panel_stop = stop.clone();
    let json = cli.json;
    std::thread::Builder::new()
        .name("panel".to_string())
        .spawn(move || {
            let mut panel = panel::Panel::new(panel_controls, json);
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            if let Err(e) = panel.run(stdin.lock(), &mut stdout, &panel_stop) {
                log::error!("Panel stopped: {:#}", e);
            }
        })
        .context("Failed to start panel thread")?;

    // Enigo is not Send on every platform; it stays on this thread with the engine.
    let mut engine = TriggerEngine::new(
        config.exit_combination,
        controls,
        PasteDispatcher::new(EnigoSink::new()),
    );
    if let Err(e) = engine.run_until(events, &stop) {
        if listener.is_finished() {
            log::error!("Keyboard hook exited; global hooks need X11 on Linux and Accessibility permission on macOS");
        }
        return Err(e).context("Trigger engine stopped");
    }

    println!("Exiting!");
    Ok(())
}
