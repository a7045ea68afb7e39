//! Run orchestration.
//!
//! [`process_folder`] drives one complete run: discover, probe, classify,
//! plan and (optionally) apply. Each step is also usable on its own.

pub mod probe_pool;

pub use probe_pool::probe_all;

use crate::config::CoreConfig;
use crate::discovery::find_video_files;
use crate::error::CoreResult;
use crate::external::{FfprobeExecutor, FileSystem};
use crate::media::{ProbeFailure, ProbeResult, VideoFile};
use crate::naming::{ClassifyPolicy, NameClassification, classify_with_policy};
use crate::plan::{RenamePlan, apply_plan};
use crate::reporting::{Reporter, RunReport, ScanStartInfo};

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

/// Classifies every file against its probe result, keeping discovery order.
///
/// A file with no entry in `probes` is treated as a failed probe. Files with
/// non UTF-8 names are never looked up.
pub fn classify_files(
    files: Vec<VideoFile>,
    probes: &HashMap<PathBuf, ProbeResult>,
    policy: &ClassifyPolicy,
) -> Vec<(VideoFile, NameClassification)> {
    files
        .into_iter()
        .map(|file| {
            let classification = if !file.utf8_name {
                NameClassification::UnreadableName
            } else {
                match probes.get(&file.path) {
                    Some(probe) => classify_with_policy(&file.base_name, probe, policy),
                    None => NameClassification::ProbeFailed {
                        reason: ProbeFailure::ToolFailed("file was not probed".to_string()),
                    },
                }
            };
            (file, classification)
        })
        .collect()
}

/// Runs the whole pipeline for `config.root`.
///
/// Only invocation problems (bad root, invalid config, pool setup) are
/// returned as errors. Per-file probe and rename failures are recorded in
/// the report and the run still succeeds.
pub fn process_folder<P, F>(
    config: &CoreConfig,
    probe: &P,
    fs: &F,
    reporter: &dyn Reporter,
) -> CoreResult<RunReport>
where
    P: FfprobeExecutor + ?Sized,
    F: FileSystem + ?Sized,
{
    let started = Instant::now();
    config.validate()?;

    reporter.scan_started(&ScanStartInfo {
        root: config.root.clone(),
        extensions: config.extensions.clone(),
        apply: config.apply,
    });

    let files = find_video_files(&config.root, config.extensions.as_slice())?;
    log::info!("Found {} video file(s) under {}", files.len(), config.root.display());
    reporter.discovery_complete(files.len());

    let readable: Vec<VideoFile> = files.iter().filter(|f| f.utf8_name).cloned().collect();
    reporter.probing_started(readable.len());
    let probes = probe_all(&readable, probe, config.jobs, |path| reporter.file_probed(path))?;
    reporter.probing_complete();

    let classified = classify_files(files, &probes, &config.classify_policy());
    let mut plan = RenamePlan::build(classified, fs);
    let summary = plan.summary();
    log::info!(
        "Plan: {} total, {} to rename, {} skipped",
        summary.total,
        summary.to_rename,
        summary.skipped
    );
    reporter.plan_ready(&plan, &summary);

    let applied = if config.apply && summary.to_rename > 0 {
        reporter.apply_started();
        let applied = apply_plan(&mut plan, fs);
        for entry in plan.entries.iter().filter(|e| e.new_path.is_some()) {
            reporter.rename_applied(entry);
        }
        Some(applied)
    } else if config.apply {
        Some(Default::default())
    } else {
        None
    };

    let report = RunReport {
        root: config.root.clone(),
        apply: config.apply,
        plan,
        summary,
        applied,
        elapsed: started.elapsed(),
    };
    reporter.run_complete(&report);
    Ok(report)
}
