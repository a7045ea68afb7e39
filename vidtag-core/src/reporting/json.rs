//! Machine-readable reporter: one JSON object per line.

use super::{ReportRow, Reporter, RunReport, ScanStartInfo};
use crate::plan::{PlanSummary, RenamePlan, RenamePlanEntry};

use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Emits run events as newline-delimited JSON.
///
/// Per-file probe completions are not emitted; the plan event carries every
/// file's outcome.
pub struct JsonReporter {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonReporter {
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    fn timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_value(&self, value: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", value);
            let _ = writer.flush();
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn scan_started(&self, info: &ScanStartInfo) {
        self.write_value(json!({
            "type": "scan_started",
            "root": info.root,
            "extensions": info.extensions,
            "apply": info.apply,
            "timestamp": Self::timestamp(),
        }));
    }

    fn discovery_complete(&self, total_files: usize) {
        self.write_value(json!({
            "type": "discovery_complete",
            "total_files": total_files,
            "timestamp": Self::timestamp(),
        }));
    }

    fn plan_ready(&self, plan: &RenamePlan, summary: &PlanSummary) {
        let rows: Vec<ReportRow> = plan.entries.iter().map(ReportRow::from_entry).collect();
        self.write_value(json!({
            "type": "plan",
            "rows": rows,
            "summary": summary,
            "timestamp": Self::timestamp(),
        }));
    }

    fn rename_applied(&self, entry: &RenamePlanEntry) {
        self.write_value(json!({
            "type": "rename",
            "from": entry.file.path,
            "to": entry.new_path,
            "status": entry.status.label(),
            "error": entry.status.detail(),
            "timestamp": Self::timestamp(),
        }));
    }

    fn run_complete(&self, report: &RunReport) {
        self.write_value(json!({
            "type": "run_complete",
            "root": report.root,
            "apply": report.apply,
            "summary": report.summary,
            "applied": report.applied,
            "elapsed_secs": report.elapsed.as_secs_f64(),
            "timestamp": Self::timestamp(),
        }));
    }

    fn warning(&self, message: &str) {
        self.write_value(json!({
            "type": "warning",
            "message": message,
            "timestamp": Self::timestamp(),
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn lines(buffer: &SharedBuffer) -> Vec<serde_json::Value> {
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn test_events_are_one_object_per_line() {
        let buffer = SharedBuffer::default();
        let reporter = JsonReporter::with_writer(Box::new(buffer.clone()));

        reporter.discovery_complete(3);
        reporter.warning("ffprobe not found");
        reporter.plan_ready(&RenamePlan::default(), &PlanSummary::default());

        let events = lines(&buffer);
        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["type"], "discovery_complete");
        assert_eq!(events[0]["total_files"], 3);
        assert_eq!(events[1]["message"], "ffprobe not found");
        assert_eq!(events[2]["summary"]["total"], 0);
        assert!(events[2]["rows"].as_array().unwrap().is_empty());
    }
}
