//! Implementation of the rename run.
//!
//! Builds a `CoreConfig` from the parsed arguments, checks for ffprobe,
//! picks a reporter and hands the folder to `vidtag_core::process_folder`.

use crate::cli::Cli;
use crate::error::CliResult;

use vidtag_core::reporting::{JsonReporter, Reporter, RunReport, TerminalReporter};
use vidtag_core::{CoreConfig, CrateFfprobeExecutor, StdFileSystem, check_ffprobe, process_folder};

use log::{debug, error, info};

/// Translates command-line arguments into a core configuration.
///
/// An empty `--ext` list keeps the default extension set.
pub fn build_config(args: &Cli) -> CoreConfig {
    let mut config = CoreConfig::new(args.folder.clone());
    if !args.extensions.is_empty() {
        config.set_extensions(&args.extensions);
    }
    config.apply = args.apply;
    config.jobs = args.jobs;
    config.duration_tolerance_min = args.tolerance;
    config.probe_timeout_secs = args.probe_timeout;
    config
}

/// Runs one preview or apply pass over `args.folder`.
pub fn run_rename(args: &Cli) -> CliResult<RunReport> {
    let config = build_config(args);
    debug!("Run configuration: {:?}", config);

    let reporter: Box<dyn Reporter> = if args.json {
        Box::new(JsonReporter::new())
    } else {
        Box::new(TerminalReporter::new())
    };

    if let Err(e) = check_ffprobe() {
        // Not fatal: every file will show up as a probe failure.
        error!("{}", e);
        reporter.warning("ffprobe could not be started; files cannot be probed");
    }

    let report = process_folder(
        &config,
        &CrateFfprobeExecutor::new().with_timeout(config.probe_timeout()),
        &StdFileSystem,
        reporter.as_ref(),
    )?;

    info!(
        "Run finished: {} file(s), {} to rename",
        report.summary.total, report.summary.to_rename
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_build_config_defaults() {
        let cli = Cli::parse_from(["vidtag", "/videos"]);
        let config = build_config(&cli);
        assert_eq!(config.root, std::path::PathBuf::from("/videos"));
        assert!(!config.apply);
        assert_eq!(config.jobs, 0);
        assert_eq!(config.duration_tolerance_min, 0);
        assert_eq!(config.probe_timeout_secs, 30);
        assert!(config.extensions.contains(&"mkv".to_string()));
    }

    #[test]
    fn test_build_config_overrides() {
        let cli = Cli::parse_from([
            "vidtag", "/videos", "--apply", "--ext", "MP4", ".mkv", "--jobs", "4",
            "--tolerance", "2", "--probe-timeout", "5",
        ]);
        let config = build_config(&cli);
        assert!(config.apply);
        assert_eq!(config.extensions, vec!["mp4", "mkv"]);
        assert_eq!(config.jobs, 4);
        assert_eq!(config.duration_tolerance_min, 2);
        assert_eq!(config.probe_timeout_secs, 5);
    }

    #[test]
    fn test_ext_accepts_comma_list() {
        let cli = Cli::parse_from(["vidtag", "/videos", "--ext", "mp4,avi"]);
        assert_eq!(build_config(&cli).extensions, vec!["mp4", "avi"]);
    }
}
