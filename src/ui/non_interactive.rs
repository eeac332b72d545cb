//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::Result;

use super::theme::SyncprepTheme;
use super::{parse_answer, OutputMode, Prompt, Severity, UserInterface};

/// Prefix of environment variables that answer prompts ahead of time.
pub const PROMPT_ENV_PREFIX: &str = "SYNCPREP_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Confirmations are never asked. A `SYNCPREP_PROMPT_<KEY>` environment
/// variable answers the prompt with that key; every other prompt gets the
/// default answer, "no".
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SyncprepTheme,
    env_overrides: HashMap<String, String>,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(mode, env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(mode: OutputMode, overrides: HashMap<String, String>) -> Self {
        Self {
            mode,
            theme: SyncprepTheme::plain(),
            env_overrides: overrides,
        }
    }

    fn override_key(prompt: &Prompt) -> String {
        let key: String = prompt
            .key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("{}{}", PROMPT_ENV_PREFIX, key.to_uppercase())
    }
}

impl UserInterface for NonInteractiveUI {
    fn announce(&mut self, msg: &str, severity: Severity) {
        if !self.mode.shows(severity) {
            return;
        }
        let line = self.theme.format_status(severity, msg);
        if severity.is_problem() {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        let answer = self
            .env_overrides
            .get(&Self::override_key(prompt))
            .map(|value| parse_answer(value))
            .unwrap_or(false);

        tracing::debug!(
            "Answered '{}' non-interactively with {}",
            prompt.key,
            if answer { "yes" } else { "no" }
        );

        println!(
            "{} {}",
            prompt.question,
            if answer { "(y/N) y" } else { "(y/N) n" }
        );

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_defaults_to_no() {
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, HashMap::new());
        let prompt = Prompt::new("install_unison", "Install unison?");
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn confirm_uses_env_override() {
        let mut overrides = HashMap::new();
        overrides.insert("SYNCPREP_PROMPT_INSTALL_UNISON".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);

        let prompt = Prompt::new("install_unison", "Install unison?");
        assert!(ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn override_key_replaces_punctuation() {
        let prompt = Prompt::new("install_unison-fsmonitor", "?");
        assert_eq!(
            NonInteractiveUI::override_key(&prompt),
            "SYNCPREP_PROMPT_INSTALL_UNISON_FSMONITOR"
        );
    }

    #[test]
    fn unrecognised_override_is_no() {
        let mut overrides = HashMap::new();
        overrides.insert("SYNCPREP_PROMPT_INSTALL_RSYNC".to_string(), "sure".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Quiet, overrides);

        let prompt = Prompt::new("install_rsync", "Install rsync?");
        assert!(!ui.confirm(&prompt).unwrap());
    }

    #[test]
    fn override_answers_only_its_own_key() {
        let mut overrides = HashMap::new();
        overrides.insert("SYNCPREP_PROMPT_INSTALL_RSYNC".to_string(), "yes".to_string());
        let mut ui = NonInteractiveUI::with_overrides(OutputMode::Normal, overrides);

        assert!(ui.confirm(&Prompt::new("install_rsync", "Install rsync?")).unwrap());
        assert!(!ui.confirm(&Prompt::new("install_fswatch", "Install fswatch?")).unwrap());
    }
}
