//! Output verbosity mode.

use super::Severity;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show status lines.
    #[default]
    Normal,
    /// Show only warnings, errors and the commands being proposed.
    Quiet,
}

impl OutputMode {
    /// Check if a line of the given severity is shown in this mode.
    pub fn shows(&self, severity: Severity) -> bool {
        match self {
            Self::Normal => true,
            Self::Quiet => severity.is_problem() || severity == Severity::Command,
        }
    }
}
