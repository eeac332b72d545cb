//! Shell command execution and executable lookup.

pub mod command;
pub mod path;
pub mod platform;

pub use command::{execute, CommandOptions, CommandResult};
pub use path::{is_executable, parse_system_path, resolve_tool_path};
pub use platform::is_ci;
