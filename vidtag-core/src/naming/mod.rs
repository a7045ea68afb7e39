//! Filename tag matching and classification
//!
//! `pattern` recognizes canonical, legacy and untagged names; `classify`
//! turns a recognized shape plus probed metadata into a naming decision.

pub mod classify;
pub mod pattern;

pub use classify::{
    ClassifyPolicy, NameClassification, RenameReason, classify, classify_with_policy, strip_spans,
};
pub use pattern::{
    CanonicalTag, DURATION_LABELS, DurationLabel, Found, FoundDuration, LegacyTag, TagShape,
    match_tag,
};
