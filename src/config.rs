//! Startup configuration
//!
//! Raw, string-typed settings as they come from the command line, and
//! their validation into the types the engine runs on.

use crate::controls::Controls;
use crate::error::Result;
use crate::keys::{parse_key, ExitCombination, Key, DEFAULT_EXIT_COMBO};
use crate::pool::PhrasePool;

/// Unvalidated macro settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroConfig {
    /// Trigger key name
    pub hotkey: String,
    /// `+`-separated exit key names
    pub exit_combo: String,
    /// Comma-separated phrases; `None` uses the built-in set
    pub pastes: Option<String>,
    /// Start with all-chat pasting enabled
    pub broadcast: bool,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            hotkey: "f3".to_string(),
            exit_combo: DEFAULT_EXIT_COMBO.to_string(),
            pastes: None,
            broadcast: false,
        }
    }
}

/// Settings after name resolution and phrase parsing
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub trigger: Key,
    pub exit_combination: ExitCombination,
    pub pool: PhrasePool,
    pub broadcast: bool,
}

impl MacroConfig {
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let trigger = parse_key(&self.hotkey)?;
        let exit_combination = ExitCombination::parse(&self.exit_combo)?;
        let pool = match &self.pastes {
            Some(raw) => PhrasePool::from_csv(raw)?,
            None => PhrasePool::default(),
        };

        if exit_combination.contains(&trigger) {
            log::warn!(
                "Trigger {} is part of the exit combination {}",
                trigger,
                exit_combination
            );
        }

        Ok(ValidatedConfig {
            trigger,
            exit_combination,
            pool,
            broadcast: self.broadcast,
        })
    }
}

impl ValidatedConfig {
    /// Shared handle seeded with these settings
    pub fn controls(&self) -> Controls {
        Controls::new(self.trigger, self.pool.clone(), self.broadcast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::keys::DEFAULT_TRIGGER_KEY;
    use crate::pool::DEFAULT_PHRASES;

    #[test]
    fn test_default_config_validates() {
        let validated = MacroConfig::default().validate().unwrap();
        assert_eq!(validated.trigger, DEFAULT_TRIGGER_KEY);
        assert_eq!(validated.exit_combination, ExitCombination::default());
        assert_eq!(validated.pool.len(), DEFAULT_PHRASES.len());
        assert!(!validated.broadcast);
    }

    #[test]
    fn test_custom_config() {
        let config = MacroConfig {
            hotkey: "shift_r".to_string(),
            exit_combo: "ctrl+esc".to_string(),
            pastes: Some("gg,wp".to_string()),
            broadcast: true,
        };
        let validated = config.validate().unwrap();
        assert_eq!(validated.trigger.name(), "shift_r");
        assert_eq!(validated.exit_combination.keys().len(), 2);

        let controls = validated.controls();
        assert_eq!(controls.current_pastes().unwrap(), vec!["gg", "wp"]);
        assert_eq!(controls.current_trigger_display().unwrap(), "shift_r");
        assert!(controls.broadcast());
    }

    #[test]
    fn test_invalid_config() {
        let config = MacroConfig {
            hotkey: "hyper".to_string(),
            ..MacroConfig::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            Error::InvalidKeyName("hyper".to_string())
        );

        let config = MacroConfig {
            pastes: Some(" ".to_string()),
            ..MacroConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), Error::EmptyInput);

        let config = MacroConfig {
            exit_combo: "+".to_string(),
            ..MacroConfig::default()
        };
        assert_eq!(config.validate().unwrap_err(), Error::EmptyExitCombination);
    }
}
