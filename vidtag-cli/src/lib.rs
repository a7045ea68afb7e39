// vidtag-cli/src/lib.rs
//
// Library portion of the vidtag CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::rename::{build_config, run_rename};
pub use error::CliResult;
