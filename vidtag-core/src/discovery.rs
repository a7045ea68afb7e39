//! File discovery module for finding video files to tag.
//!
//! This module walks the root folder recursively and collects files whose
//! extension (case-insensitive) is in the configured set. The returned order
//! is the discovery order used for every later report.

use crate::config::normalize_extension;
use crate::error::{CoreResult, invalid_root};
use crate::media::VideoFile;

use std::collections::HashSet;
use std::path::Path;
use walkdir::WalkDir;

/// Finds video files under `root`, sorted by path.
///
/// Symlinks are not followed. Entries that cannot be read are logged and
/// skipped; only an unusable `root` is an error. Files whose names are not
/// valid UTF-8 are returned with `utf8_name` unset so they still show up in
/// the plan. Files reached through two
/// different paths (e.g. hard-linked directories) are reported once.
///
/// # Arguments
///
/// * `root` - The directory to search
/// * `extensions` - Extensions to accept, with or without leading dots
///
/// # Returns
///
/// * `Ok(Vec<VideoFile>)` - Matching files, possibly empty
/// * `Err(CoreError::InvalidRoot)` - If `root` is missing or not a directory
///
/// # Examples
///
/// ```rust,no_run
/// use vidtag_core::find_video_files;
/// use std::path::Path;
///
/// let files = find_video_files(Path::new("/path/to/videos"), &["mp4", "mkv"]).unwrap();
/// for file in files {
///     println!("{}", file.path.display());
/// }
/// ```
pub fn find_video_files<S: AsRef<str>>(root: &Path, extensions: &[S]) -> CoreResult<Vec<VideoFile>> {
    let metadata = std::fs::metadata(root)
        .map_err(|e| invalid_root(root, e.to_string()))?;
    if !metadata.is_dir() {
        return Err(invalid_root(root, "not a directory"));
    }

    let wanted: HashSet<String> = extensions
        .iter()
        .map(|e| normalize_extension(e.as_ref()))
        .collect();

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                log::warn!("Skipping unreadable entry: {}", err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| wanted.contains(&ext.to_ascii_lowercase()));
        if !matches {
            continue;
        }

        let identity = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        if !seen.insert(identity) {
            log::debug!("Skipping duplicate path: {}", path.display());
            continue;
        }

        match VideoFile::from_path(path) {
            Some(file) => {
                if !file.utf8_name {
                    log::warn!("File name is not valid UTF-8: {}", path.display());
                }
                files.push(file);
            }
            None => log::debug!("Skipping path without a file name: {}", path.display()),
        }
    }

    files.sort_by(|a, b| a.path.cmp(&b.path));
    log::debug!("Discovered {} video file(s) under {}", files.len(), root.display());
    Ok(files)
}
