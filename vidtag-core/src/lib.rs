//! Core library for tagging video filenames with duration and resolution.
//!
//! This crate discovers video files under a folder, probes them with ffprobe,
//! classifies each filename as canonically tagged, legacy tagged or untagged,
//! and builds (and optionally applies) a collision-safe rename plan.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidtag_core::{CoreConfig, CrateFfprobeExecutor, StdFileSystem, process_folder};
//! use vidtag_core::reporting::TerminalReporter;
//! use std::path::PathBuf;
//!
//! let mut config = CoreConfig::new(PathBuf::from("/path/to/videos"));
//! config.set_extensions(["mp4", "mkv"]);
//! config.apply = false;
//!
//! let report = process_folder(
//!     &config,
//!     &CrateFfprobeExecutor::new(),
//!     &StdFileSystem,
//!     &TerminalReporter::new(),
//! )
//! .unwrap();
//! println!("{} file(s) would be renamed", report.summary.to_rename);
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod media;
pub mod naming;
pub mod plan;
pub mod processing;
pub mod reporting;

// Re-exports for public API
pub use config::{CoreConfig, DEFAULT_EXTENSIONS};
pub use discovery::find_video_files;
pub use error::{CoreError, CoreResult};
pub use external::{
    CrateFfprobeExecutor, FfprobeExecutor, FileSystem, StdFileSystem, check_ffprobe,
};
pub use media::{ProbeFailure, ProbeResult, VideoFile, VideoMetadata};
pub use naming::{NameClassification, classify, classify_with_policy};
pub use plan::{ApplySummary, EntryStatus, PlanSummary, RenamePlan, apply_plan};
pub use processing::{classify_files, probe_all, process_folder};
pub use reporting::{NullReporter, ReportRow, Reporter, RunReport};
