// ============================================================================
// vidtag-core/src/external/mocks.rs
// ============================================================================
//
// MOCKS: Test doubles for the probe seam
//
// MockFfprobeExecutor answers probes from a table of expectations keyed by
// file name, so tests can drive a whole run over a temporary folder of dummy
// files without ffprobe installed.

use super::FfprobeExecutor;
use crate::media::{ProbeFailure, ProbeResult, VideoMetadata};

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

/// Mock implementation of FfprobeExecutor.
#[derive(Default)]
pub struct MockFfprobeExecutor {
    /// File name -> probe result
    results: Mutex<HashMap<String, ProbeResult>>,
}

impl MockFfprobeExecutor {
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds the result returned for any file named `file_name`.
    pub fn expect(&self, file_name: &str, result: ProbeResult) {
        if let Ok(mut results) = self.results.lock() {
            results.insert(file_name.to_string(), result);
        }
    }

    /// Shorthand for a successful probe.
    pub fn expect_metadata(&self, file_name: &str, duration_secs: f64, width: i64, height: i64) {
        self.expect(file_name, VideoMetadata::new(duration_secs, width, height));
    }
}

impl FfprobeExecutor for MockFfprobeExecutor {
    fn probe_metadata(&self, input_path: &Path) -> ProbeResult {
        let name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        log::debug!("MockFfprobeExecutor::probe_metadata called for: {}", name);

        let results = self
            .results
            .lock()
            .map_err(|_| ProbeFailure::ToolFailed("mock lock poisoned".to_string()))?;
        match results.get(&name) {
            Some(result) => result.clone(),
            None => Err(ProbeFailure::ToolFailed(format!(
                "no expectation set for {name}"
            ))),
        }
    }
}
