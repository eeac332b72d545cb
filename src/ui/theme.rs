//! Visual theme and styling.

use console::Style;

use super::Severity;

/// Width of the right-aligned status label column.
const LABEL_WIDTH: usize = 8;

/// Visual theme for status lines.
#[derive(Debug, Clone)]
pub struct SyncprepTheme {
    /// Style for informational labels.
    pub info: Style,
    /// Style for success labels (green).
    pub ok: Style,
    /// Style for warning labels (orange).
    pub warning: Style,
    /// Style for error labels (red bold).
    pub error: Style,
    /// Style for command labels (white bold).
    pub command: Style,
    /// Style for the command text itself (dim italic).
    pub command_text: Style,
}

impl Default for SyncprepTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncprepTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            info: Style::new().white(),
            ok: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            command: Style::new().white().bold(),
            command_text: Style::new().dim().italic(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            info: Style::new(),
            ok: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            command: Style::new(),
            command_text: Style::new(),
        }
    }

    fn label_style(&self, severity: Severity) -> &Style {
        match severity {
            Severity::Info => &self.info,
            Severity::Ok => &self.ok,
            Severity::Warning => &self.warning,
            Severity::Error => &self.error,
            Severity::Command => &self.command,
        }
    }

    /// Format a status line: right-aligned label followed by the message.
    pub fn format_status(&self, severity: Severity, msg: &str) -> String {
        let label = format!("{:>width$}", severity.label(), width = LABEL_WIDTH);
        let body = if severity == Severity::Command {
            self.command_text.apply_to(msg).to_string()
        } else {
            msg.to_string()
        };
        format!("{}  {}", self.label_style(severity).apply_to(label), body)
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
