//! Command implementations for the CLI.

/// Module containing the implementation of the rename run.
/// Previews or applies duration/resolution tags for a folder.
pub mod rename;
