//! Sequential execution of a rename plan.
//!
//! Only entries in [`EntryStatus::Rename`] are touched. Renames run one at a
//! time so that the target check and the rename cannot race with another
//! rename from the same plan. A failure is recorded on the entry and the
//! batch continues.

use super::{ConflictKind, EntryStatus, RenamePlan};
use crate::external::FileSystem;

use serde::Serialize;

/// Outcome counts of an apply run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplySummary {
    pub renamed: usize,
    pub failed: usize,
    /// Targets that appeared on disk after the plan was built
    pub conflicts: usize,
}

/// Performs every pending rename in `plan`, updating each entry's status.
pub fn apply_plan<F>(plan: &mut RenamePlan, fs: &F) -> ApplySummary
where
    F: FileSystem + ?Sized,
{
    let mut summary = ApplySummary::default();

    for entry in plan.entries.iter_mut().filter(|e| e.status.is_rename()) {
        let Some(target) = entry.new_path.as_deref() else {
            continue;
        };

        if fs.exists(target) {
            log::warn!(
                "Target appeared since planning, skipping: {}",
                target.display()
            );
            entry.status = EntryStatus::Conflict(ConflictKind::TargetExists);
            summary.conflicts += 1;
            continue;
        }

        match fs.rename(&entry.file.path, target) {
            Ok(()) => {
                log::info!("Renamed {} -> {}", entry.file.path.display(), target.display());
                entry.status = EntryStatus::Renamed;
                summary.renamed += 1;
            }
            Err(err) => {
                log::error!("Failed to rename {}: {}", entry.file.path.display(), err);
                entry.status = EntryStatus::RenameFailed(err.to_string());
                summary.failed += 1;
            }
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{VideoFile, VideoMetadata};
    use crate::naming::classify;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use std::path::{Path, PathBuf};

    /// In-memory file system that refuses to rename anything named "locked".
    struct MemoryFs {
        files: RefCell<HashSet<PathBuf>>,
    }

    impl MemoryFs {
        fn new(paths: &[&str]) -> Self {
            Self {
                files: RefCell::new(paths.iter().map(PathBuf::from).collect()),
            }
        }
    }

    impl FileSystem for MemoryFs {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains(path)
        }

        fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
            if from.to_string_lossy().contains("locked") {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"));
            }
            let mut files = self.files.borrow_mut();
            files.remove(from);
            files.insert(to.to_path_buf());
            Ok(())
        }
    }

    fn plan_for(paths: &[&str], fs: &MemoryFs) -> RenamePlan {
        let meta = VideoMetadata::new(2700.0, 1920, 1080);
        let classified = paths
            .iter()
            .map(|p| {
                let file = VideoFile::from_path(*p).unwrap();
                let c = classify(&file.base_name, &meta);
                (file, c)
            })
            .collect();
        RenamePlan::build(classified, fs)
    }

    #[test]
    fn test_partial_failure_continues() {
        let paths = ["/v/a.mp4", "/v/locked.mp4", "/v/c.mp4"];
        let fs = MemoryFs::new(&paths);
        let mut plan = plan_for(&paths, &fs);

        let summary = apply_plan(&mut plan, &fs);
        assert_eq!(
            summary,
            ApplySummary {
                renamed: 2,
                failed: 1,
                conflicts: 0
            }
        );
        assert_eq!(plan.entries[0].status, EntryStatus::Renamed);
        assert_eq!(
            plan.entries[1].status,
            EntryStatus::RenameFailed("permission denied".to_string())
        );
        assert_eq!(plan.entries[2].status, EntryStatus::Renamed);
        assert!(fs.exists(Path::new("/v/c_45min_1920x1080.mp4")));
        assert!(fs.exists(Path::new("/v/locked.mp4")));
    }

    #[test]
    fn test_target_appearing_after_planning_is_not_overwritten() {
        let paths = ["/v/a.mp4"];
        let fs = MemoryFs::new(&paths);
        let mut plan = plan_for(&paths, &fs);
        fs.files
            .borrow_mut()
            .insert(PathBuf::from("/v/a_45min_1920x1080.mp4"));

        let summary = apply_plan(&mut plan, &fs);
        assert_eq!(summary.conflicts, 1);
        assert_eq!(summary.renamed, 0);
        assert!(fs.exists(Path::new("/v/a.mp4")));
    }

    #[test]
    fn test_only_first_duplicate_is_renamed() {
        let paths = ["/v/Movie.mp4", "/v/Movie_1280x720.mp4"];
        let fs = MemoryFs::new(&paths);
        let mut plan = plan_for(&paths, &fs);

        let summary = apply_plan(&mut plan, &fs);
        assert_eq!(summary.renamed, 1);
        assert!(!fs.exists(Path::new("/v/Movie.mp4")));
        assert!(fs.exists(Path::new("/v/Movie_1280x720.mp4")));
        assert!(fs.exists(Path::new("/v/Movie_45min_1920x1080.mp4")));
    }
}
