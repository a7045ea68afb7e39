// ============================================================================
// vidtag-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structures and Constants
//
// This module defines the configuration used by a vidtag run: which folder to
// scan, which extensions count as video, whether renames are applied, how many
// probe workers to use and how strictly legacy duration labels are compared.
//
// USAGE:
// Instances of CoreConfig are created by consumers of the library (like
// vidtag-cli), adjusted field by field, validated, and passed to `process_folder`.

use crate::error::{CoreError, CoreResult};
use crate::naming::ClassifyPolicy;

use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Video extensions scanned when the caller does not override them.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "mp4", "mkv", "avi", "mov", "wmv", "flv", "webm", "ts", "m4v",
];

/// Number of probe workers; 0 lets rayon pick one per logical CPU.
pub const DEFAULT_JOBS: usize = 0;

/// Seconds a single ffprobe call may run before it is killed.
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 30;

/// Allowed difference, in minutes, between a legacy duration label and the
/// probed duration before the file is considered stale.
pub const DEFAULT_DURATION_TOLERANCE_MIN: u32 = 0;

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Main configuration structure for a vidtag run.
///
/// # Examples
///
/// ```rust
/// use vidtag_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let mut config = CoreConfig::new(PathBuf::from("/videos"));
/// config.apply = true;
/// config.set_extensions(["MKV", ".mp4"]);
/// assert_eq!(config.extensions, vec!["mkv", "mp4"]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Folder scanned recursively for video files
    pub root: PathBuf,

    /// Lowercase extensions without leading dots
    pub extensions: Vec<String>,

    /// Perform renames instead of only previewing them
    pub apply: bool,

    /// Probe worker count (0 = rayon default)
    pub jobs: usize,

    /// Tolerance for legacy duration labels, in minutes
    pub duration_tolerance_min: u32,

    /// Per-file ffprobe deadline, in seconds
    pub probe_timeout_secs: u64,
}

impl CoreConfig {
    /// Creates a preview-mode configuration for `root` with default settings.
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect(),
            apply: false,
            jobs: DEFAULT_JOBS,
            duration_tolerance_min: DEFAULT_DURATION_TOLERANCE_MIN,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
        }
    }

    /// Replaces the extension set, normalising case and leading dots.
    pub fn set_extensions<I, S>(&mut self, extensions: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = normalize_extension(ext.as_ref());
            if !normalized.contains(&ext) {
                normalized.push(ext);
            }
        }
        self.extensions = normalized;
    }

    /// Checks the configuration for values that would make a run meaningless.
    ///
    /// The root folder itself is checked by discovery, which reports
    /// [`CoreError::InvalidRoot`].
    pub fn validate(&self) -> CoreResult<()> {
        if self.extensions.is_empty() {
            return Err(CoreError::Config(
                "at least one video extension is required".to_string(),
            ));
        }

        if self.probe_timeout_secs == 0 {
            return Err(CoreError::Config(
                "probe timeout must be at least one second".to_string(),
            ));
        }

        for ext in &self.extensions {
            if ext.is_empty() {
                return Err(CoreError::Config("empty video extension".to_string()));
            }
            if ext.contains(['/', '\\', '*', '?']) {
                return Err(CoreError::Config(format!(
                    "invalid video extension '{ext}'"
                )));
            }
        }

        Ok(())
    }

    /// Per-file ffprobe deadline.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Classification policy derived from this configuration.
    pub fn classify_policy(&self) -> ClassifyPolicy {
        ClassifyPolicy {
            duration_tolerance_min: self.duration_tolerance_min,
        }
    }
}

/// Lowercases an extension and strips any leading dots (".MP4" -> "mp4").
pub fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_ascii_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoreConfig::new(PathBuf::from("videos"));
        assert!(!config.apply);
        assert_eq!(config.extensions.len(), 9);
        assert!(config.extensions.iter().any(|e| e == "m4v"));
        assert_eq!(config.classify_policy().duration_tolerance_min, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_set_extensions_normalizes_and_dedupes() {
        let mut config = CoreConfig::new(PathBuf::from("videos"));
        config.set_extensions([".MKV", "mkv", "Ts"]);
        assert_eq!(config.extensions, vec!["mkv", "ts"]);
    }

    #[test]
    fn test_validate_rejects_bad_extensions() {
        let mut config = CoreConfig::new(PathBuf::from("videos"));
        config.set_extensions(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.set_extensions(["."]);
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        config.set_extensions(["mp4/x"]);
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_probe_timeout() {
        let mut config = CoreConfig::new(PathBuf::from("videos"));
        assert_eq!(config.probe_timeout(), Duration::from_secs(30));

        config.probe_timeout_secs = 0;
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));
    }
}
