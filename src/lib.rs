//! Syncprep - host precondition checks for docker-sync.
//!
//! Before files can be synchronised into containers the host needs a
//! container runtime, a running daemon, and the sync backend tools the
//! configured strategies use. Syncprep checks for each in order and
//! offers to install whatever is missing through Homebrew, asking before
//! every command it runs.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Sync configuration loading
//! - [`error`] - Error types and result aliases
//! - [`preconditions`] - Probes, the check catalog, and remediation
//! - [`shell`] - Shell command execution and path lookup
//! - [`ui`] - Status output and confirmation prompts
//!
//! # Example
//!
//! ```
//! use syncprep::config::SyncModeRequirements;
//! use syncprep::preconditions::{FakeHost, PreconditionEngine};
//! use syncprep::ui::MockUI;
//!
//! // Without Homebrew nothing is checked.
//! let host = FakeHost::new();
//! let mut ui = MockUI::new();
//! let requirements = SyncModeRequirements::none().with_forced(true, true);
//! PreconditionEngine::new(&host).check_all(&requirements, &mut ui).unwrap();
//! assert!(ui.has_info("Not running any precondition checks"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod preconditions;
pub mod shell;
pub mod ui;

pub use error::{PreflightError, Result};
