//! Human-friendly reporter: plan table, summary and a probe progress bar.

use super::{NO_NEW_NAME, ReportRow, Reporter, RunReport, ScanStartInfo, format_elapsed};
use crate::plan::{EntryStatus, PlanSummary, RenamePlan, RenamePlanEntry};

use console::{StyledObject, Term, style};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use unicode_width::UnicodeWidthStr;

const STATUS_WIDTH: usize = 26;
const OLD_NAME_WIDTH: usize = 50;
const RULE_WIDTH: usize = 130;

/// Prints the plan as an aligned table on stdout and progress on stderr.
pub struct TerminalReporter {
    progress: Mutex<Option<ProgressBar>>,
    show_progress: bool,
}

impl TerminalReporter {
    pub fn new() -> Self {
        Self {
            progress: Mutex::new(None),
            show_progress: Term::stderr().is_term(),
        }
    }

    fn finish_progress(&self) {
        if let Ok(mut guard) = self.progress.lock() {
            if let Some(pb) = guard.take() {
                pb.finish_and_clear();
            }
        }
    }

    fn print_row(row: &ReportRow, status: StyledObject<String>) {
        let mut line = format!(
            "{} {} {}",
            pad(&status.to_string(), &row.status, STATUS_WIDTH),
            pad(&row.old_name, &row.old_name, OLD_NAME_WIDTH),
            row.new_name
        );
        if let Some(detail) = &row.detail {
            line.push_str(&format!("  {}", style(format!("({detail})")).dim()));
        }
        println!("{}", line.trim_end());
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Pads `rendered` (which may contain color codes) to `width` terminal
/// columns, measuring the visible text `plain`.
fn pad(rendered: &str, plain: &str, width: usize) -> String {
    let visible = UnicodeWidthStr::width(plain);
    if visible >= width {
        rendered.to_string()
    } else {
        format!("{rendered}{}", " ".repeat(width - visible))
    }
}

fn styled_status(status: &EntryStatus) -> StyledObject<String> {
    let label = status.label().to_string();
    match status {
        EntryStatus::Rename | EntryStatus::Renamed => style(label).green().bold(),
        EntryStatus::ProbeFailed(_) | EntryStatus::RenameFailed(_) => style(label).red(),
        EntryStatus::Conflict(_) | EntryStatus::UnreadableName => style(label).yellow(),
        EntryStatus::AlreadyTagged | EntryStatus::TaggedDifferently => style(label).dim(),
    }
}

impl Reporter for TerminalReporter {
    fn scan_started(&self, info: &ScanStartInfo) {
        let mode = if info.apply { "apply" } else { "dry-run" };
        println!(
            "{} {} ({})",
            style("Scanning").bold().cyan(),
            info.root.display(),
            mode
        );
        println!("  {} {}", style("Extensions:").bold(), info.extensions.join(" "));
    }

    fn discovery_complete(&self, total_files: usize) {
        if total_files == 0 {
            println!("No video files found.");
        } else {
            println!(
                "Found {} video file(s). Probing duration and resolution...\n",
                style(total_files).bold()
            );
        }
    }

    fn probing_started(&self, total_files: usize) {
        self.finish_progress();
        if !self.show_progress || total_files == 0 {
            return;
        }
        let pb = ProgressBar::with_draw_target(Some(total_files as u64), ProgressDrawTarget::stderr());
        if let Ok(bar_style) =
            ProgressStyle::default_bar().template("Probing [{bar:40}] {pos}/{len} {wide_msg}")
        {
            pb.set_style(bar_style.progress_chars("=> "));
        }
        pb.enable_steady_tick(Duration::from_millis(120));
        if let Ok(mut guard) = self.progress.lock() {
            *guard = Some(pb);
        }
    }

    fn file_probed(&self, path: &Path) {
        if let Ok(guard) = self.progress.lock() {
            if let Some(pb) = guard.as_ref() {
                if let Some(name) = path.file_name() {
                    pb.set_message(name.to_string_lossy().into_owned());
                }
                pb.inc(1);
            }
        }
    }

    fn probing_complete(&self) {
        self.finish_progress();
    }

    fn plan_ready(&self, plan: &RenamePlan, summary: &PlanSummary) {
        if plan.is_empty() {
            return;
        }

        println!(
            "{} {} {}",
            pad(&style("STATUS").bold().to_string(), "STATUS", STATUS_WIDTH),
            pad(&style("OLD NAME").bold().to_string(), "OLD NAME", OLD_NAME_WIDTH),
            style("NEW NAME").bold()
        );
        println!("{}", "-".repeat(RULE_WIDTH));
        for entry in &plan.entries {
            Self::print_row(&ReportRow::from_entry(entry), styled_status(&entry.status));
        }
        println!("{}", "-".repeat(RULE_WIDTH));
        println!(
            "\nTotal: {} | To rename: {} | Skipped: {}",
            style(summary.total).bold(),
            style(summary.to_rename).green().bold(),
            style(summary.skipped).yellow()
        );
    }

    fn apply_started(&self) {
        println!("\n{}\n", style("Applying renames...").bold());
    }

    fn rename_applied(&self, entry: &RenamePlanEntry) {
        let new_name = entry.new_name().unwrap_or_else(|| NO_NEW_NAME.to_string());
        match &entry.status {
            EntryStatus::Renamed => println!(
                "  {}  {} -> {}",
                style("OK").green().bold(),
                entry.old_name(),
                new_name
            ),
            EntryStatus::RenameFailed(reason) => println!(
                "  {} {}: {}",
                style("FAIL").red().bold(),
                entry.old_name(),
                reason
            ),
            other => println!(
                "  {} {}: {}",
                style("SKIP").yellow(),
                entry.old_name(),
                other
            ),
        }
    }

    fn run_complete(&self, report: &RunReport) {
        match &report.applied {
            Some(applied) => {
                println!(
                    "\nDone. Renamed: {} | Failed: {}",
                    style(applied.renamed).green().bold(),
                    style(applied.failed).red()
                );
                if applied.conflicts > 0 {
                    println!(
                        "  {} target(s) appeared during the run and were left alone",
                        applied.conflicts
                    );
                }
            }
            None if report.summary.total > 0 => {
                println!("\nDry-run mode. No files were renamed.");
                println!("Add --apply to rename files.");
            }
            None => {}
        }
        println!(
            "{} {}",
            style("Elapsed:").bold(),
            format_elapsed(report.elapsed)
        );
    }

    fn warning(&self, message: &str) {
        self.finish_progress();
        eprintln!("{}", style(format!("WARN: {message}")).yellow().bold());
    }
}
