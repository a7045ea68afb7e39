// ============================================================================
// vidtag-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Interactions with ffprobe and the File System
//
// This module encapsulates the two side-effecting seams of a run: probing
// video metadata with ffprobe, and renaming files on disk. Both are traits so
// the planner and executor can be driven by test doubles.
//
// KEY COMPONENTS:
// - FfprobeExecutor / CrateFfprobeExecutor: metadata probe with a deadline
// - FileSystem / StdFileSystem: existence checks and renames
// - check_dependency: preflight check that a tool can be started
// - mocks: scripted probe results for tests

// ---- Internal crate imports ----
use crate::error::{CoreError, CoreResult};

// ---- Standard library imports ----
use std::io;
use std::path::Path;
use std::process::{Command, Stdio};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Runs external tools with a deadline
mod command;

/// Contains the ffprobe trait and its production implementation
pub mod ffprobe_executor;

pub use ffprobe_executor::{CrateFfprobeExecutor, DEFAULT_PROBE_TIMEOUT, FfprobeExecutor};

/// Test doubles for driving runs without ffprobe
pub mod mocks;

// ============================================================================
// DEPENDENCY CHECKING
// ============================================================================

/// Checks that an external command can be started.
///
/// Runs `cmd_name -version` with output discarded. Only failure to start
/// counts; the exit status is ignored.
///
/// # Returns
///
/// * `Ok(())` - If the command could be started
/// * `Err(CoreError::DependencyNotFound)` - If the command is not on PATH
/// * `Err(CoreError::CommandStart)` - If the command exists but fails to start
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {}", cmd_name);
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{}' not found.", cmd_name);
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{}': {}", cmd_name, e);
            Err(CoreError::CommandStart(cmd_name.to_string(), e))
        }
    }
}

/// Checks that `ffprobe` is available.
pub fn check_ffprobe() -> CoreResult<()> {
    check_dependency("ffprobe")
}

// ============================================================================
// FILE SYSTEM ACCESS
// ============================================================================

/// Abstraction over the file system operations the rename executor needs.
///
/// # Examples
///
/// ```rust
/// use vidtag_core::external::FileSystem;
/// use std::io;
/// use std::path::Path;
///
/// struct ReadOnlyFs;
///
/// impl FileSystem for ReadOnlyFs {
///     fn exists(&self, _path: &Path) -> bool {
///         false
///     }
///
///     fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
///         Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
///     }
/// }
///
/// assert!(ReadOnlyFs.rename(Path::new("a.mp4"), Path::new("b.mp4")).is_err());
/// ```
pub trait FileSystem {
    /// Whether anything (file, directory or dangling symlink) occupies `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Renames `from` to `to`.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`FileSystem`] backed by `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata also sees dangling links, which rename would replace
        std::fs::symlink_metadata(path).is_ok()
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        std::fs::rename(from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_dependency_missing_command() {
        let result = check_dependency("vidtag-surely-not-a-real-command-42");
        assert!(matches!(result, Err(CoreError::DependencyNotFound(_))));
    }

    #[test]
    fn test_std_file_system_rename() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let from = dir.path().join("a.mp4");
        let to = dir.path().join("b.mp4");
        std::fs::write(&from, b"x")?;

        let fs = StdFileSystem;
        assert!(fs.exists(&from));
        assert!(!fs.exists(&to));
        fs.rename(&from, &to)?;
        assert!(!fs.exists(&from));
        assert!(fs.exists(&to));
        Ok(())
    }
}
