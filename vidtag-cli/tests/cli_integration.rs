use assert_cmd::Command;
use predicates::prelude::*;
use predicates::str::contains;
use std::error::Error;
use std::path::PathBuf;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidtag_cmd() -> Command {
    Command::cargo_bin("vidtag").expect("Failed to find vidtag binary")
}

#[test]
fn test_help_lists_options() {
    vidtag_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("--apply"))
        .stdout(contains("--ext"))
        .stdout(contains("FOLDER"));
}

#[test]
fn test_missing_folder_argument_is_usage_error() {
    vidtag_cmd().assert().code(2);
}

#[test]
fn test_non_existent_folder_fails() {
    let missing = PathBuf::from("surely/this/does/not/exist/videos");
    vidtag_cmd()
        .arg(&missing)
        .assert()
        .code(1)
        .stderr(contains("Invalid folder"));
}

#[test]
fn test_invalid_jobs_value_is_usage_error() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    vidtag_cmd()
        .arg(dir.path())
        .arg("--jobs")
        .arg("many")
        .assert()
        .code(2);
    Ok(())
}

#[test]
fn test_empty_folder_succeeds() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("notes.txt"), "not a video")?;

    vidtag_cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("No video files found."));
    Ok(())
}

#[test]
fn test_unprobeable_files_are_skipped_not_fatal() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    // Dummy content fails to probe whether or not ffprobe is installed.
    std::fs::write(dir.path().join("fake_input.mkv"), "dummy content")?;
    std::fs::write(dir.path().join("clip.MP4"), "dummy content")?;

    vidtag_cmd()
        .arg(dir.path())
        .assert()
        .success()
        .stdout(contains("SKIP (probe failed)"))
        .stdout(contains("fake_input.mkv"))
        .stdout(contains("clip.MP4"))
        .stdout(contains("Total: 2 | To rename: 0 | Skipped: 2"))
        .stdout(contains("Dry-run mode. No files were renamed."));
    Ok(())
}

#[test]
fn test_apply_with_nothing_to_rename_leaves_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("fake_input.mkv");
    std::fs::write(&input, "dummy content")?;

    vidtag_cmd()
        .arg(dir.path())
        .arg("--apply")
        .assert()
        .success()
        .stdout(contains("Done. Renamed: 0 | Failed: 0"))
        .stdout(contains("Dry-run mode").not());

    assert!(input.exists());
    Ok(())
}

#[test]
fn test_ext_filter_limits_scan() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("keep.avi"), "dummy content")?;
    std::fs::write(dir.path().join("ignore.mkv"), "dummy content")?;

    vidtag_cmd()
        .arg(dir.path())
        .arg("--ext")
        .arg("avi")
        .assert()
        .success()
        .stdout(contains("keep.avi"))
        .stdout(contains("ignore.mkv").not());
    Ok(())
}

#[test]
fn test_json_output_is_line_delimited() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("fake_input.mkv"), "dummy content")?;

    let output = vidtag_cmd().arg(dir.path()).arg("--json").output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    let types: Vec<String> = stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            let start = l.find("\"type\":\"").map(|i| i + 8).unwrap_or(0);
            l[start..].split('"').next().unwrap_or_default().to_string()
        })
        .collect();

    assert!(types.contains(&"plan".to_string()));
    assert_eq!(types.last().map(String::as_str), Some("run_complete"));
    assert!(stdout.contains("SKIP (probe failed)"));
    Ok(())
}
