//! Filename tag recognition.
//!
//! A base name is matched against three shapes in a fixed order and the first
//! match wins:
//!
//! 1. [`TagShape::Canonical`]: the name ends in `_{N}min_{W}x{H}`.
//! 2. [`TagShape::Legacy`]: the name contains a duration label from
//!    [`DURATION_LABELS`] and/or a `{W}x{H}` resolution marker anywhere.
//! 3. [`TagShape::Untagged`]: nothing recognizable.
//!
//! Numbers are ASCII digits regardless of the script of the surrounding
//! label. Zero values (and values that overflow `u32`) are not tags. A
//! canonical-looking suffix carrying one makes the whole name untagged; a
//! legacy candidate carrying one is ignored and the next candidate is tried.

use crate::media::{DurationMinutes, Resolution};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use std::ops::Range;

static CANONICAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_([0-9]+)min_([0-9]+)x([0-9]+)$").expect("valid canonical pattern"));

// At least three digits per side keeps episode markers such as "3x07" out.
static RESOLUTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])(?P<w>[0-9]{3,5})[xX](?P<h>[0-9]{3,5})(?:[^0-9]|$)")
        .expect("valid resolution pattern")
});

static LATIN_MIN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"_(?P<n>[0-9]+)(?i:min)(?:_|$)").expect("valid latin duration pattern"));
static SIMPLIFIED_CHINESE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<n>[0-9]+)\s*分钟").expect("valid zh-Hans duration pattern"));
static TRADITIONAL_CHINESE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<n>[0-9]+)\s*分鐘").expect("valid zh-Hant duration pattern"));

/// A recognized spelling of "N minutes" inside a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationLabel {
    /// `_{N}min_`, or `_{N}min` as the last segment
    LatinMin,
    /// `{N}分钟`
    SimplifiedChinese,
    /// `{N}分鐘`
    TraditionalChinese,
}

/// Duration labels in the order they are tried.
pub const DURATION_LABELS: &[DurationLabel] = &[
    DurationLabel::LatinMin,
    DurationLabel::SimplifiedChinese,
    DurationLabel::TraditionalChinese,
];

impl DurationLabel {
    fn regex(self) -> &'static Regex {
        match self {
            DurationLabel::LatinMin => &*LATIN_MIN_RE,
            DurationLabel::SimplifiedChinese => &*SIMPLIFIED_CHINESE_RE,
            DurationLabel::TraditionalChinese => &*TRADITIONAL_CHINESE_RE,
        }
    }

    /// Byte range of the label text to strip for a match whose number
    /// occupies `number`. The Latin form keeps its surrounding underscores.
    fn strip_span(self, number: Range<usize>, whole: Range<usize>) -> Range<usize> {
        match self {
            DurationLabel::LatinMin => number.start..number.end + "min".len(),
            DurationLabel::SimplifiedChinese | DurationLabel::TraditionalChinese => whole,
        }
    }
}

/// A value found in a filename, with the byte range of the text it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Found<T> {
    pub value: T,
    #[serde(skip)]
    pub span: Range<usize>,
}

/// Duration label found in a filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FoundDuration {
    pub label: DurationLabel,
    pub minutes: DurationMinutes,
    #[serde(skip)]
    pub span: Range<usize>,
}

/// A terminal `_{N}min_{W}x{H}` tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalTag {
    pub duration: DurationMinutes,
    pub resolution: Resolution,
    /// Covers the duration digits through the end of the name
    #[serde(skip)]
    pub span: Range<usize>,
}

/// Duration and/or resolution found outside canonical form.
///
/// At least one field is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegacyTag {
    pub duration: Option<FoundDuration>,
    pub resolution: Option<Found<Resolution>>,
}

impl LegacyTag {
    /// Spans to strip, in ascending order.
    pub fn spans(&self) -> Vec<Range<usize>> {
        let mut spans: Vec<Range<usize>> = self
            .duration
            .iter()
            .map(|d| d.span.clone())
            .chain(self.resolution.iter().map(|r| r.span.clone()))
            .collect();
        spans.sort_by_key(|s| s.start);
        spans
    }
}

/// The shape of a base name's tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum TagShape {
    Canonical(CanonicalTag),
    Legacy(LegacyTag),
    Untagged,
}

/// Determines the tag shape of `base_name` (a file name without extension).
///
/// # Examples
///
/// ```rust
/// use vidtag_core::naming::{TagShape, match_tag};
///
/// assert!(matches!(match_tag("A_130min_1280x720"), TagShape::Canonical(_)));
/// assert!(matches!(match_tag("电影_90分钟_高清"), TagShape::Legacy(_)));
/// assert_eq!(match_tag("Movie"), TagShape::Untagged);
/// ```
pub fn match_tag(base_name: &str) -> TagShape {
    if let Some(caps) = CANONICAL_RE.captures(base_name) {
        return match canonical_from(&caps) {
            Some(tag) => TagShape::Canonical(tag),
            None => {
                log::trace!("Malformed canonical tag in '{}', treating as untagged", base_name);
                TagShape::Untagged
            }
        };
    }

    let duration = find_duration(base_name);
    let excluded = duration.as_ref().map(|d| d.span.clone());
    let resolution = find_resolution(base_name, excluded);

    if duration.is_none() && resolution.is_none() {
        TagShape::Untagged
    } else {
        TagShape::Legacy(LegacyTag {
            duration,
            resolution,
        })
    }
}

fn canonical_from(caps: &Captures<'_>) -> Option<CanonicalTag> {
    let minutes = parse_positive(&caps[1])?;
    let width = parse_positive(&caps[2])?;
    let height = parse_positive(&caps[3])?;
    let start = caps.get(1)?.start();

    Some(CanonicalTag {
        duration: DurationMinutes(minutes),
        resolution: Resolution { width, height },
        span: start..caps.get(0)?.end(),
    })
}

fn find_duration(base_name: &str) -> Option<FoundDuration> {
    for &label in DURATION_LABELS {
        for caps in label.regex().captures_iter(base_name) {
            let (Some(number), Some(whole)) = (caps.name("n"), caps.get(0)) else {
                continue;
            };
            let Some(minutes) = parse_positive(number.as_str()) else {
                log::trace!("Ignoring zero duration label in '{}'", base_name);
                continue;
            };
            return Some(FoundDuration {
                label,
                minutes: DurationMinutes(minutes),
                span: label.strip_span(number.range(), whole.range()),
            });
        }
    }
    None
}

fn find_resolution(base_name: &str, excluded: Option<Range<usize>>) -> Option<Found<Resolution>> {
    // The boundary characters are consumed by the match, so scan from each
    // candidate position rather than relying on non-overlapping iteration.
    let mut start = 0;
    while let Some(caps) = RESOLUTION_RE.captures_at(base_name, start) {
        let (w, h) = (caps.name("w")?, caps.name("h")?);
        let span = w.start()..h.end();
        start = w.end();

        let overlaps = excluded
            .as_ref()
            .is_some_and(|ex| span.start < ex.end && ex.start < span.end);
        if overlaps {
            continue;
        }

        if let (Some(width), Some(height)) = (parse_positive(w.as_str()), parse_positive(h.as_str())) {
            return Some(Found {
                value: Resolution { width, height },
                span,
            });
        }
    }
    None
}

fn parse_positive(digits: &str) -> Option<u32> {
    digits.parse::<u32>().ok().filter(|n| *n > 0)
}
