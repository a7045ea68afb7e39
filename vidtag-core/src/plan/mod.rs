// ============================================================================
// vidtag-core/src/plan/mod.rs
// ============================================================================
//
// RENAME PLAN: Ordered, reviewable decisions for a batch
//
// The plan is built from classified files in discovery order. Conflicts are
// settled here, before anything touches the disk, so a preview shows exactly
// what an apply run would do:
// - a target that already exists on disk is never overwritten
// - when several files compute the same target, only the first (by discovery
//   order) keeps it
//
// Executing the plan lives in `execute`.

use crate::external::FileSystem;
use crate::media::VideoFile;
use crate::naming::NameClassification;

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

pub mod execute;

pub use execute::{ApplySummary, apply_plan};

/// Why a rename was withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConflictKind {
    /// Something already exists at the target path
    TargetExists,
    /// An earlier file in the plan claimed the same target
    DuplicateTarget { first: PathBuf },
}

/// Status of one plan entry, before and after execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum EntryStatus {
    Rename,
    AlreadyTagged,
    TaggedDifferently,
    ProbeFailed(String),
    UnreadableName,
    Conflict(ConflictKind),
    Renamed,
    RenameFailed(String),
}

impl EntryStatus {
    /// Short label shown in the status column.
    pub fn label(&self) -> &'static str {
        match self {
            EntryStatus::Rename => "RENAME",
            EntryStatus::AlreadyTagged => "SKIP (already tagged)",
            EntryStatus::TaggedDifferently => "SKIP (tagged differently)",
            EntryStatus::ProbeFailed(_) => "SKIP (probe failed)",
            EntryStatus::UnreadableName => "SKIP (non UTF-8 name)",
            EntryStatus::Conflict(ConflictKind::TargetExists) => "SKIP (target exists)",
            EntryStatus::Conflict(ConflictKind::DuplicateTarget { .. }) => "SKIP (duplicate target)",
            EntryStatus::Renamed => "OK",
            EntryStatus::RenameFailed(_) => "FAIL",
        }
    }

    /// Extra context for the label, if any.
    pub fn detail(&self) -> Option<String> {
        match self {
            EntryStatus::ProbeFailed(reason) | EntryStatus::RenameFailed(reason) => {
                Some(reason.clone())
            }
            EntryStatus::Conflict(ConflictKind::DuplicateTarget { first }) => {
                Some(format!("already claimed by {}", first.display()))
            }
            _ => None,
        }
    }

    pub fn is_rename(&self) -> bool {
        matches!(self, EntryStatus::Rename)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detail() {
            Some(detail) => write!(f, "{}: {}", self.label(), detail),
            None => f.write_str(self.label()),
        }
    }
}

/// One file's decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenamePlanEntry {
    pub file: VideoFile,
    pub classification: NameClassification,
    /// Target path, present whenever the classifier computed a new name
    pub new_path: Option<PathBuf>,
    pub status: EntryStatus,
}

impl RenamePlanEntry {
    pub fn old_name(&self) -> String {
        self.file.file_name()
    }

    pub fn new_name(&self) -> Option<String> {
        self.new_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Counts shown after the plan table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlanSummary {
    pub total: usize,
    pub to_rename: usize,
    pub skipped: usize,
}

/// Rename decisions in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenamePlan {
    pub entries: Vec<RenamePlanEntry>,
}

impl RenamePlan {
    /// Builds a plan from classified files, which must be in discovery order.
    pub fn build<F>(classified: Vec<(VideoFile, NameClassification)>, fs: &F) -> Self
    where
        F: FileSystem + ?Sized,
    {
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();
        let mut entries = Vec::with_capacity(classified.len());

        for (file, classification) in classified {
            let mut new_path = None;
            let status = match &classification {
                NameClassification::AlreadyCanonical => EntryStatus::AlreadyTagged,
                NameClassification::AlreadyTaggedDifferent { .. } => EntryStatus::TaggedDifferently,
                NameClassification::ProbeFailed { reason } => {
                    EntryStatus::ProbeFailed(reason.to_string())
                }
                NameClassification::UnreadableName => EntryStatus::UnreadableName,
                NameClassification::NeedsRename { new_base_name, .. } => {
                    let target = file.with_base_name(new_base_name);
                    let status = if let Some(first) = claimed.get(&target) {
                        log::warn!(
                            "{} and {} both map to {}",
                            first.display(),
                            file.path.display(),
                            target.display()
                        );
                        EntryStatus::Conflict(ConflictKind::DuplicateTarget {
                            first: first.clone(),
                        })
                    } else {
                        claimed.insert(target.clone(), file.path.clone());
                        if fs.exists(&target) {
                            EntryStatus::Conflict(ConflictKind::TargetExists)
                        } else {
                            EntryStatus::Rename
                        }
                    };
                    new_path = Some(target);
                    status
                }
            };

            entries.push(RenamePlanEntry {
                file,
                classification,
                new_path,
                status,
            });
        }

        Self { entries }
    }

    pub fn summary(&self) -> PlanSummary {
        let total = self.entries.len();
        let to_rename = self.entries.iter().filter(|e| e.status.is_rename()).count();
        PlanSummary {
            total,
            to_rename,
            skipped: total - to_rename,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ProbeFailure, VideoMetadata};
    use crate::naming::classify;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::io;
    use std::path::Path;

    #[derive(Default)]
    struct FakeFs {
        existing: RefCell<HashSet<PathBuf>>,
    }

    impl FakeFs {
        fn with(paths: &[&str]) -> Self {
            let fs = Self::default();
            fs.existing
                .borrow_mut()
                .extend(paths.iter().map(PathBuf::from));
            fs
        }
    }

    impl FileSystem for FakeFs {
        fn exists(&self, path: &Path) -> bool {
            self.existing.borrow().contains(path)
        }

        fn rename(&self, _from: &Path, _to: &Path) -> io::Result<()> {
            Ok(())
        }
    }

    fn entry(path: &str, secs: f64, w: i64, h: i64) -> (VideoFile, NameClassification) {
        let file = VideoFile::from_path(path).unwrap();
        let classification = classify(&file.base_name, &VideoMetadata::new(secs, w, h));
        (file, classification)
    }

    #[test]
    fn test_plan_statuses_and_summary() {
        let failed = VideoFile::from_path("/v/broken.avi").unwrap();
        let classified = vec![
            entry("/v/Movie.mp4", 2700.0, 1920, 1080),
            entry("/v/A_130min_1280x720.mp4", 7800.0, 1280, 720),
            entry("/v/电影_90分钟.mkv", 5400.0, 1920, 1080),
            (
                failed,
                NameClassification::ProbeFailed {
                    reason: ProbeFailure::NoVideoStream,
                },
            ),
        ];

        let plan = RenamePlan::build(classified, &FakeFs::default());
        let labels: Vec<&str> = plan.entries.iter().map(|e| e.status.label()).collect();
        assert_eq!(
            labels,
            vec![
                "RENAME",
                "SKIP (already tagged)",
                "SKIP (tagged differently)",
                "SKIP (probe failed)"
            ]
        );
        assert_eq!(
            plan.entries[0].new_name().as_deref(),
            Some("Movie_45min_1920x1080.mp4")
        );
        assert_eq!(plan.entries[3].status.detail().as_deref(), Some("no video stream"));
        assert_eq!(
            plan.summary(),
            PlanSummary {
                total: 4,
                to_rename: 1,
                skipped: 3
            }
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_unreadable_name_is_skipped_and_counted() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = VideoFile::from_path(Path::new("/v").join(OsStr::from_bytes(b"bad\xff.mp4")))
            .unwrap();
        let classified = vec![
            entry("/v/Movie.mp4", 2700.0, 1920, 1080),
            (bad, NameClassification::UnreadableName),
        ];

        let plan = RenamePlan::build(classified, &FakeFs::default());
        assert_eq!(plan.entries[1].status, EntryStatus::UnreadableName);
        assert_eq!(plan.entries[1].status.label(), "SKIP (non UTF-8 name)");
        assert_eq!(plan.entries[1].new_path, None);
        assert_eq!(
            plan.summary(),
            PlanSummary {
                total: 2,
                to_rename: 1,
                skipped: 1
            }
        );
    }

    #[test]
    fn test_existing_target_is_conflict() {
        let fs = FakeFs::with(&["/v/Movie_45min_1920x1080.mp4"]);
        let plan = RenamePlan::build(vec![entry("/v/Movie.mp4", 2700.0, 1920, 1080)], &fs);
        assert_eq!(
            plan.entries[0].status,
            EntryStatus::Conflict(ConflictKind::TargetExists)
        );
        assert_eq!(plan.summary().to_rename, 0);
    }

    #[test]
    fn test_duplicate_targets_first_wins() {
        let classified = vec![
            entry("/v/Movie_120min_1280x720.mp4", 2700.0, 1920, 1080),
            entry("/v/Movie.mp4", 2700.0, 1920, 1080),
            entry("/v/Movie_1280x720.mp4", 2700.0, 1920, 1080),
        ];
        let plan = RenamePlan::build(classified, &FakeFs::default());

        assert_eq!(plan.entries[0].status, EntryStatus::Rename);
        for later in &plan.entries[1..] {
            assert_eq!(
                later.status,
                EntryStatus::Conflict(ConflictKind::DuplicateTarget {
                    first: PathBuf::from("/v/Movie_120min_1280x720.mp4")
                })
            );
        }
        assert_eq!(plan.summary().to_rename, 1);
    }

    #[test]
    fn test_same_name_in_different_folders_is_not_a_conflict() {
        let classified = vec![
            entry("/v/a/Movie.mp4", 2700.0, 1920, 1080),
            entry("/v/b/Movie.mp4", 2700.0, 1920, 1080),
        ];
        let plan = RenamePlan::build(classified, &FakeFs::default());
        assert_eq!(plan.summary().to_rename, 2);
    }
}
