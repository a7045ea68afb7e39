//! Naming-state classification.
//!
//! Combines the tag found in a base name with freshly probed metadata and
//! decides whether the file is already correct, deliberately left alone, or
//! needs a new name (and what that name is).

use super::pattern::{CanonicalTag, LegacyTag, TagShape, match_tag};
use crate::media::{ProbeFailure, ProbeResult, VideoMetadata};

use serde::Serialize;
use std::ops::Range;

/// Characters treated as segment separators when a tag is cut out of a name.
const SEPARATORS: &[char] = &['_', '-', '.', ' '];

/// Tunables for [`classify_with_policy`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifyPolicy {
    /// Allowed difference, in minutes, between a legacy duration label and
    /// the probed duration. Canonical tags are always compared exactly.
    pub duration_tolerance_min: u32,
}

/// Why a file needs a new name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameReason {
    /// No tag in the name
    Untagged,
    /// Canonical tag does not match the probed metadata
    StaleCanonical,
    /// Legacy duration or resolution does not match the probed metadata
    StaleLegacy,
}

/// Decision for one file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "classification", rename_all = "snake_case")]
pub enum NameClassification {
    /// The name already ends in the correct canonical tag
    AlreadyCanonical,
    /// The name carries a legacy tag consistent with the metadata; it is
    /// left as is rather than tagged twice
    AlreadyTaggedDifferent { found: LegacyTag },
    /// The file should be renamed to `new_base_name`
    NeedsRename {
        new_base_name: String,
        reason: RenameReason,
    },
    /// Metadata could not be read, so nothing is decided
    ProbeFailed { reason: ProbeFailure },
    /// The on-disk name is not valid UTF-8 and cannot be rewritten
    UnreadableName,
}

impl NameClassification {
    pub fn new_base_name(&self) -> Option<&str> {
        match self {
            NameClassification::NeedsRename { new_base_name, .. } => Some(new_base_name),
            _ => None,
        }
    }

    pub fn needs_rename(&self) -> bool {
        matches!(self, NameClassification::NeedsRename { .. })
    }
}

/// Classifies `base_name` against `probe` with the default (exact) policy.
///
/// # Examples
///
/// ```rust
/// use vidtag_core::media::VideoMetadata;
/// use vidtag_core::naming::{NameClassification, classify};
///
/// let probe = VideoMetadata::new(2700.0, 1920, 1080);
/// let result = classify("Movie", &probe);
/// assert_eq!(result.new_base_name(), Some("Movie_45min_1920x1080"));
///
/// let again = classify("Movie_45min_1920x1080", &probe);
/// assert_eq!(again, NameClassification::AlreadyCanonical);
/// ```
pub fn classify(base_name: &str, probe: &ProbeResult) -> NameClassification {
    classify_with_policy(base_name, probe, &ClassifyPolicy::default())
}

/// Classifies `base_name` against `probe`.
pub fn classify_with_policy(
    base_name: &str,
    probe: &ProbeResult,
    policy: &ClassifyPolicy,
) -> NameClassification {
    let metadata = match probe {
        Ok(metadata) => metadata,
        Err(reason) => {
            return NameClassification::ProbeFailed {
                reason: reason.clone(),
            };
        }
    };

    match match_tag(base_name) {
        TagShape::Canonical(tag) => classify_canonical(base_name, &tag, metadata),
        TagShape::Legacy(tag) => classify_legacy(base_name, tag, metadata, policy),
        TagShape::Untagged => NameClassification::NeedsRename {
            new_base_name: append_tag(base_name, metadata),
            reason: RenameReason::Untagged,
        },
    }
}

fn classify_canonical(
    base_name: &str,
    tag: &CanonicalTag,
    metadata: &VideoMetadata,
) -> NameClassification {
    if tag.duration == metadata.duration_minutes() && tag.resolution == metadata.resolution() {
        return NameClassification::AlreadyCanonical;
    }

    log::debug!(
        "Stale canonical tag in '{}': {}_{} vs probed {}",
        base_name,
        tag.duration,
        tag.resolution,
        metadata.canonical_tag()
    );
    let stripped = strip_spans(base_name, &[tag.span.clone()]);
    NameClassification::NeedsRename {
        new_base_name: append_tag(&stripped, metadata),
        reason: RenameReason::StaleCanonical,
    }
}

fn classify_legacy(
    base_name: &str,
    tag: LegacyTag,
    metadata: &VideoMetadata,
    policy: &ClassifyPolicy,
) -> NameClassification {
    let duration_stale = tag.duration.as_ref().is_some_and(|d| {
        !d.minutes
            .within(metadata.duration_minutes(), policy.duration_tolerance_min)
    });
    let resolution_stale = tag
        .resolution
        .as_ref()
        .is_some_and(|r| r.value != metadata.resolution());

    if !duration_stale && !resolution_stale {
        return NameClassification::AlreadyTaggedDifferent { found: tag };
    }

    log::debug!(
        "Stale legacy tag in '{}' (duration stale: {}, resolution stale: {})",
        base_name,
        duration_stale,
        resolution_stale
    );
    let stripped = strip_spans(base_name, &tag.spans());
    NameClassification::NeedsRename {
        new_base_name: append_tag(&stripped, metadata),
        reason: RenameReason::StaleLegacy,
    }
}

fn append_tag(base_name: &str, metadata: &VideoMetadata) -> String {
    format!("{}_{}", base_name, metadata.canonical_tag())
}

/// Removes the given non-overlapping byte ranges from `name`.
///
/// Each cut takes at most one adjacent separator with it: where two
/// separators end up touching the left one is dropped, and at either end of
/// the name the separator next to the cut is dropped. Everything else is
/// kept verbatim.
pub fn strip_spans(name: &str, spans: &[Range<usize>]) -> String {
    let mut sorted: Vec<Range<usize>> = spans.to_vec();
    sorted.sort_by_key(|s| s.start);

    let mut result = name.to_string();
    for span in sorted.iter().rev() {
        result = remove_fragment(&result, span.clone());
    }
    result
}

fn remove_fragment(name: &str, span: Range<usize>) -> String {
    let left = &name[..span.start];
    let right = &name[span.end..];

    if right.is_empty() {
        return left.strip_suffix(SEPARATORS).unwrap_or(left).to_string();
    }
    if left.is_empty() {
        return right.strip_prefix(SEPARATORS).unwrap_or(right).to_string();
    }

    let left_ends_sep = left.ends_with(SEPARATORS);
    let right_starts_sep = right.starts_with(SEPARATORS);
    if left_ends_sep && right_starts_sep {
        let mut joined = left.to_string();
        joined.pop();
        joined.push_str(right);
        joined
    } else {
        format!("{left}{right}")
    }
}
