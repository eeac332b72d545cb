//! User-facing status output and confirmation prompts.
//!
//! This module provides:
//! - [`UserInterface`] trait, the only way checks talk to the user
//! - [`TerminalUI`] for interactive terminal usage
//! - [`NonInteractiveUI`] for CI/headless environments
//! - [`MockUI`] for tests
//!
//! A single `&mut dyn UserInterface` is created in `main` and passed down
//! through every component; nothing reaches for a global.
//!
//! # Example
//!
//! ```
//! use syncprep::ui::{create_ui, OutputMode, Severity};
//!
//! // Use non-interactive mode for testability
//! let mut ui = create_ui(false, OutputMode::Quiet);
//! ui.announce("Checking docker", Severity::Info);
//! ```

pub mod mock;
pub mod non_interactive;
pub mod output;
pub mod prompts;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use non_interactive::NonInteractiveUI;
pub use output::OutputMode;
pub use prompts::prompt_confirm;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, SyncprepTheme};

use crate::error::Result;

/// Severity of an announced status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,
    /// Something went well.
    Ok,
    /// A gap that will be offered a fix.
    Warning,
    /// A problem the user has to act on.
    Error,
    /// A shell command that is about to be proposed or run.
    Command,
}

impl Severity {
    /// Short label shown in front of the message.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Command => "command",
        }
    }

    /// Whether the line should still be shown in quiet modes.
    pub fn is_problem(&self) -> bool {
        matches!(self, Self::Warning | Self::Error)
    }
}

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Show a one-line status message.
    fn announce(&mut self, msg: &str, severity: Severity);

    /// Ask a yes/no question. An empty answer means "no".
    fn confirm(&mut self, prompt: &Prompt) -> Result<bool>;
}

/// A yes/no question to show to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Unique key for the prompt (used for env overrides and test lookup).
    pub key: String,
    /// The question to display.
    pub question: String,
}

impl Prompt {
    /// Create a new confirmation prompt.
    pub fn new(key: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            question: question.into(),
        }
    }
}

/// Parse a textual yes/no answer. Anything unrecognised is "no".
pub fn parse_answer(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "1"
    )
}
