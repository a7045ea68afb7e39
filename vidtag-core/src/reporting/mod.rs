//! Run reporting
//!
//! The pipeline never prints directly. A run reports its progress through
//! the [`Reporter`] trait, and the final [`RunReport`] exposes every field a
//! renderer needs (status label, old name, new name, counts, elapsed time)
//! as distinct values.

use crate::plan::{ApplySummary, PlanSummary, RenamePlan, RenamePlanEntry};

use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod json;
pub mod terminal;

pub use json::JsonReporter;
pub use terminal::TerminalReporter;

/// Placeholder shown in the new-name column when there is no new name.
pub const NO_NEW_NAME: &str = "-";

/// Run parameters announced before discovery.
#[derive(Clone, Debug)]
pub struct ScanStartInfo {
    pub root: PathBuf,
    pub extensions: Vec<String>,
    pub apply: bool,
}

/// One row of the plan table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub status: String,
    pub old_name: String,
    /// New file name, or [`NO_NEW_NAME`]
    pub new_name: String,
    pub detail: Option<String>,
}

impl ReportRow {
    pub fn from_entry(entry: &RenamePlanEntry) -> Self {
        Self {
            status: entry.status.label().to_string(),
            old_name: entry.old_name(),
            new_name: entry.new_name().unwrap_or_else(|| NO_NEW_NAME.to_string()),
            detail: entry.status.detail(),
        }
    }
}

/// Everything a finished run produced.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub apply: bool,
    pub plan: RenamePlan,
    /// Counts as planned, before any rename was attempted
    pub summary: PlanSummary,
    pub applied: Option<ApplySummary>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
}

impl RunReport {
    /// Table rows in discovery order.
    pub fn rows(&self) -> Vec<ReportRow> {
        self.plan.entries.iter().map(ReportRow::from_entry).collect()
    }
}

fn serialize_secs<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Reporter interface implemented by both human-readable and JSON reporters.
///
/// `file_probed` is called from probe workers concurrently; every other
/// method is called from the thread driving the run.
pub trait Reporter: Send + Sync {
    fn scan_started(&self, _info: &ScanStartInfo) {}
    fn discovery_complete(&self, _total_files: usize) {}
    fn probing_started(&self, _total_files: usize) {}
    fn file_probed(&self, _path: &Path) {}
    fn probing_complete(&self) {}
    fn plan_ready(&self, _plan: &RenamePlan, _summary: &PlanSummary) {}
    fn apply_started(&self) {}
    fn rename_applied(&self, _entry: &RenamePlanEntry) {}
    fn run_complete(&self, _report: &RunReport) {}
    fn warning(&self, _message: &str) {}
}

/// No-op reporter that discards all updates.
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Formats an elapsed time as "1m 05.2s" or "3.4s".
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs_f64();
    if secs >= 60.0 {
        let minutes = (secs / 60.0).floor();
        format!("{}m {:04.1}s", minutes as u64, secs - minutes * 60.0)
    } else {
        format!("{secs:.1}s")
    }
}
