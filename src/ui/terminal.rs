//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::{
    prompt_confirm, should_use_colors, NonInteractiveUI, OutputMode, Prompt, Severity,
    SyncprepTheme, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: SyncprepTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        let theme = if should_use_colors() {
            SyncprepTheme::new()
        } else {
            SyncprepTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn announce(&mut self, msg: &str, severity: Severity) {
        if self.mode.shows(severity) {
            writeln!(self.term, "{}", self.theme.format_status(severity, msg)).ok();
        }
    }

    fn confirm(&mut self, prompt: &Prompt) -> Result<bool> {
        prompt_confirm(prompt, &self.term)
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_ui_non_interactive_answers_no() {
        let mut ui = create_ui(false, OutputMode::Quiet);
        let prompt = Prompt::new("install_terminal_test_tool", "Install it?");
        assert!(!ui.confirm(&prompt).unwrap());
    }
}
