//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use syncprep::ui::{MockUI, Prompt, Severity, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("install_unison", "yes");
//!
//! ui.announce("Could not find unison", Severity::Warning);
//! let answer = ui.confirm(&Prompt::new("install_unison", "Install?")).unwrap();
//!
//! assert!(answer);
//! assert!(ui.has_warning("unison"));
//! assert_eq!(ui.prompts_shown(), ["install_unison"]);
//! ```

use std::collections::HashMap;

use crate::error::Result;

use super::{parse_answer, Prompt, Severity, UserInterface};

/// Mock UI implementation for testing.
///
/// Captures every announcement with its severity and every prompt key.
/// Unconfigured prompts are answered "no", like an empty answer.
#[derive(Debug, Default)]
pub struct MockUI {
    announcements: Vec<(Severity, String)>,
    prompt_responses: HashMap<String, String>,
    prompts_shown: Vec<String>,
    /// Fallback response for any prompt key not otherwise configured.
    default_prompt_response: Option<String>,
}

impl MockUI {
    /// Create a new MockUI with no configured responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Set a default response for any prompt key not explicitly configured.
    pub fn set_default_prompt_response(&mut self, response: &str) {
        self.default_prompt_response = Some(response.to_string());
    }

    /// Get all captured announcements in order.
    pub fn announcements(&self) -> &[(Severity, String)] {
        &self.announcements
    }

    /// Get captured messages of one severity.
    pub fn messages_at(&self, severity: Severity) -> Vec<&str> {
        self.announcements
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, m)| m.as_str())
            .collect()
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    fn has_at(&self, severity: Severity, msg: &str) -> bool {
        self.announcements
            .iter()
            .any(|(s, m)| *s == severity && m.contains(msg))
    }

    /// Check if an info line containing `msg` was shown.
    pub fn has_info(&self, msg: &str) -> bool {
        self.has_at(Severity::Info, msg)
    }

    /// Check if a warning containing `msg` was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.has_at(Severity::Warning, msg)
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.has_at(Severity::Error, msg)
    }

    /// Check if a command containing `msg` was proposed.
    pub fn has_command(&self, msg: &str) -> bool {
        self.has_at(Severity::Command, msg)
    }
}

impl UserInterface for MockUI {
    fn announce(&mut self, msg: &str, severity: Severity) {
        self.announcements.push((severity, msg.to_string()));
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        self.prompts_shown.push(prompt.key.clone());

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(parse_answer(response));
        }

        if let Some(response) = &self.default_prompt_response {
            return Ok(parse_answer(response));
        }

        Ok(false)
    }
}
