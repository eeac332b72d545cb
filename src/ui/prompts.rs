//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;

use crate::error::{PreflightError, Result};

use super::Prompt;

/// Convert dialoguer errors to PreflightError.
fn map_dialoguer_err(e: dialoguer::Error) -> PreflightError {
    PreflightError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Ask a yes/no question on the terminal. Pressing enter answers "no".
pub fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<bool> {
    Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(false)
        .interact_on(term)
        .map_err(map_dialoguer_err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialoguer_errors_map_to_io() {
        let err = dialoguer::Error::IO(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "closed",
        ));
        assert!(matches!(map_dialoguer_err(err), PreflightError::Io(_)));
    }
}
