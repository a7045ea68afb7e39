// ============================================================================
// vidtag-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Result alias and exit codes
//
// The CLI reports vidtag-core's errors as they are. Only invocation problems
// reach this layer; per-file failures live in the run report.

use vidtag_core::{CoreError, CoreResult};

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for a completed run, including runs with per-file failures.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for invocation errors (bad folder, invalid configuration).
/// Argument parsing errors exit through clap with code 2.
pub const EXIT_FAILURE: i32 = 1;

/// Exit code for a finished run or an error.
pub fn exit_code(result: &CliResult<()>) -> i32 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

/// One-line user-facing message for a run-level error.
pub fn describe(error: &CoreError) -> String {
    match error {
        CoreError::InvalidRoot { .. } | CoreError::Config(_) => error.to_string(),
        other => format!("vidtag failed: {other}"),
    }
}
