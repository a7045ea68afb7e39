//! FFprobe integration for duration and resolution extraction
//!
//! This module provides the [`FfprobeExecutor`] trait used by the probe pool
//! and its production implementation, which runs the system `ffprobe` with a
//! deadline and reads its JSON through the `ffprobe` crate's data model.
use super::command::{RunError, run_with_timeout};
use crate::media::{ProbeFailure, ProbeResult, VideoMetadata};
use ffprobe::FfProbe;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

/// How long a single ffprobe call may run before it is killed.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Extracts duration and resolution from a video file.
///
/// Implementations must be shareable across probe workers and must report
/// zero or missing values as a [`ProbeFailure`], never as metadata.
pub trait FfprobeExecutor: Send + Sync {
    fn probe_metadata(&self, input_path: &Path) -> ProbeResult;
}

/// [`FfprobeExecutor`] that runs the system `ffprobe`.
#[derive(Debug, Clone)]
pub struct CrateFfprobeExecutor {
    program: PathBuf,
    timeout: Duration,
}

impl CrateFfprobeExecutor {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("ffprobe"),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// Per-file deadline; a probe still running after it is a failure.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Runs `program` instead of the `ffprobe` found on PATH.
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for CrateFfprobeExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl FfprobeExecutor for CrateFfprobeExecutor {
    fn probe_metadata(&self, input_path: &Path) -> ProbeResult {
        log::debug!(
            "Running ffprobe for duration and resolution on: {}",
            input_path.display()
        );
        let mut cmd = Command::new(&self.program);
        cmd.args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(input_path);

        let output = run_with_timeout(&mut cmd, self.timeout).map_err(|err| {
            log::debug!("ffprobe did not finish on {}: {:?}", input_path.display(), err);
            map_run_error(err)
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let first_line = stderr.lines().next().unwrap_or_default().trim();
            return Err(if first_line.is_empty() {
                ProbeFailure::ToolFailed(format!("exited with {}", output.status))
            } else {
                ProbeFailure::ToolFailed(first_line.to_string())
            });
        }

        let probe: FfProbe = serde_json::from_slice(&output.stdout)
            .map_err(|e| ProbeFailure::Unparseable(e.to_string()))?;
        metadata_from_probe(&probe)
    }
}

fn metadata_from_probe(probe: &FfProbe) -> ProbeResult {
    let duration_secs = probe
        .format
        .duration
        .as_deref()
        .ok_or_else(|| ProbeFailure::InvalidMetadata("missing duration".to_string()))?
        .trim()
        .parse::<f64>()
        .map_err(|e| ProbeFailure::Unparseable(format!("duration: {e}")))?;

    let video_stream = probe
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .ok_or(ProbeFailure::NoVideoStream)?;

    let width = video_stream
        .width
        .ok_or_else(|| ProbeFailure::InvalidMetadata("video stream missing width".to_string()))?;
    let height = video_stream
        .height
        .ok_or_else(|| ProbeFailure::InvalidMetadata("video stream missing height".to_string()))?;

    VideoMetadata::new(duration_secs, width, height)
}

fn map_run_error(err: RunError) -> ProbeFailure {
    match err {
        RunError::Spawn(e) if e.kind() == io::ErrorKind::NotFound => {
            ProbeFailure::ToolUnavailable("ffprobe not found".to_string())
        }
        RunError::Spawn(e) => ProbeFailure::ToolUnavailable(e.to_string()),
        RunError::Wait(e) => ProbeFailure::ToolFailed(e.to_string()),
        RunError::TimedOut(after) => ProbeFailure::TimedOut(after),
    }
}
