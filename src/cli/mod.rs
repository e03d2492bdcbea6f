//! Interactive and script-mode shell over the books.

pub mod core;
pub mod output;
pub mod shell;

pub use self::core::{CliError, CliMode};
pub use shell::run_cli;
