use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// A video file found during discovery.
///
/// The base name and extension are split once so classification never has to
/// touch the path again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VideoFile {
    pub path: PathBuf,
    /// File name without the extension
    pub base_name: String,
    /// Extension as found on disk (original case, no dot)
    pub extension: String,
    /// False when the on-disk name is not valid UTF-8. `base_name` and
    /// `extension` then hold a lossy copy that is only fit for display.
    pub utf8_name: bool,
}

impl VideoFile {
    /// Builds a `VideoFile` from a path, or `None` if the path has no file
    /// stem.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let base_name = path.file_stem()?.to_string_lossy().into_owned();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default();
        let utf8_name = path.file_name().and_then(|n| n.to_str()).is_some();
        Some(Self {
            path,
            base_name,
            extension,
            utf8_name,
        })
    }

    /// Full file name as shown to the user.
    pub fn file_name(&self) -> String {
        join_file_name(&self.base_name, &self.extension)
    }

    /// Path of a sibling file with a different base name and the same extension.
    pub fn with_base_name(&self, base_name: &str) -> PathBuf {
        let file_name = join_file_name(base_name, &self.extension);
        match self.path.parent() {
            Some(parent) => parent.join(file_name),
            None => PathBuf::from(file_name),
        }
    }

    pub fn as_path(&self) -> &Path {
        &self.path
    }
}

pub(crate) fn join_file_name(base_name: &str, extension: &str) -> String {
    if extension.is_empty() {
        base_name.to_string()
    } else {
        format!("{base_name}.{extension}")
    }
}

/// Duration, width and height reported by the probe.
///
/// Construct through [`VideoMetadata::new`], which rejects the zero or
/// unreadable values ffprobe sometimes reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VideoMetadata {
    pub duration_secs: f64,
    pub width: u32,
    pub height: u32,
}

impl VideoMetadata {
    pub fn new(duration_secs: f64, width: i64, height: i64) -> Result<Self, ProbeFailure> {
        if !duration_secs.is_finite() || duration_secs <= 0.0 {
            return Err(ProbeFailure::InvalidMetadata(format!(
                "duration {duration_secs} is not a positive number of seconds"
            )));
        }
        if width <= 0 || height <= 0 || width > i64::from(u32::MAX) || height > i64::from(u32::MAX) {
            return Err(ProbeFailure::InvalidMetadata(format!(
                "invalid dimensions {width}x{height}"
            )));
        }
        Ok(Self {
            duration_secs,
            width: width as u32,
            height: height as u32,
        })
    }

    pub fn duration_minutes(&self) -> DurationMinutes {
        DurationMinutes::from_seconds(self.duration_secs)
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.width,
            height: self.height,
        }
    }

    /// The canonical tag for this metadata, without the leading underscore
    /// (e.g. "45min_1920x1080").
    pub fn canonical_tag(&self) -> String {
        format!("{}_{}", self.duration_minutes(), self.resolution())
    }
}

/// Why a file could not be probed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ProbeFailure {
    /// ffprobe could not be started
    ToolUnavailable(String),
    /// ffprobe ran but exited unsuccessfully
    ToolFailed(String),
    /// ffprobe was killed after running past its deadline
    TimedOut(Duration),
    /// ffprobe output could not be parsed
    Unparseable(String),
    /// The container has no video stream
    NoVideoStream,
    /// Duration or dimensions missing, zero or negative
    InvalidMetadata(String),
}

impl fmt::Display for ProbeFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeFailure::ToolUnavailable(msg) => write!(f, "ffprobe unavailable: {msg}"),
            ProbeFailure::ToolFailed(msg) => write!(f, "ffprobe failed: {msg}"),
            ProbeFailure::TimedOut(after) => {
                write!(f, "ffprobe timed out after {}s", after.as_secs_f64())
            }
            ProbeFailure::Unparseable(msg) => write!(f, "unreadable ffprobe output: {msg}"),
            ProbeFailure::NoVideoStream => write!(f, "no video stream"),
            ProbeFailure::InvalidMetadata(msg) => write!(f, "invalid metadata: {msg}"),
        }
    }
}

/// Outcome of probing one file.
pub type ProbeResult = Result<VideoMetadata, ProbeFailure>;

/// Whole minutes of playback, as written into tags.
///
/// Half-minute ties round to the even neighbour, so 90 s (1.5 min) is 2 and
/// 150 s (2.5 min) is also 2, the same as names tagged by earlier runs.
/// Any positive duration is at least 1 minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct DurationMinutes(pub u32);

impl DurationMinutes {
    pub fn from_seconds(seconds: f64) -> Self {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Self(0);
        }
        let minutes = (seconds / 60.0).round_ties_even();
        let minutes = if minutes >= f64::from(u32::MAX) {
            u32::MAX
        } else {
            minutes as u32
        };
        Self(minutes.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Whether two durations are within `tolerance` minutes of each other.
    pub fn within(self, other: DurationMinutes, tolerance: u32) -> bool {
        self.0.abs_diff(other.0) <= tolerance
    }
}

impl fmt::Display for DurationMinutes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}min", self.0)
    }
}

/// Pixel dimensions rendered as "{width}x{height}".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_minutes_rounding() {
        assert_eq!(DurationMinutes::from_seconds(2700.0).get(), 45);
        assert_eq!(DurationMinutes::from_seconds(29.0).get(), 1);
        assert_eq!(DurationMinutes::from_seconds(0.5).get(), 1);
        assert_eq!(DurationMinutes::from_seconds(0.0).get(), 0);
        assert_eq!(DurationMinutes::from_seconds(f64::NAN).get(), 0);
        // ties go to the even neighbour
        assert_eq!(DurationMinutes::from_seconds(90.0).get(), 2);
        assert_eq!(DurationMinutes::from_seconds(150.0).get(), 2);
        assert_eq!(DurationMinutes::from_seconds(210.0).get(), 4);
    }

    #[test]
    fn test_duration_minutes_is_stable_across_calls() {
        let first = DurationMinutes::from_seconds(90.5);
        for _ in 0..100 {
            assert_eq!(DurationMinutes::from_seconds(90.5), first);
        }
        assert_eq!(first.get(), 2);
    }

    #[test]
    fn test_metadata_rejects_zero_values() {
        assert!(VideoMetadata::new(0.0, 1920, 1080).is_err());
        assert!(VideoMetadata::new(-3.0, 1920, 1080).is_err());
        assert!(VideoMetadata::new(f64::INFINITY, 1920, 1080).is_err());
        assert!(VideoMetadata::new(60.0, 0, 1080).is_err());
        assert!(VideoMetadata::new(60.0, 1920, -1).is_err());
    }

    #[test]
    fn test_timed_out_display() {
        let failure = ProbeFailure::TimedOut(Duration::from_secs(30));
        assert_eq!(failure.to_string(), "ffprobe timed out after 30s");
    }

    #[test]
    fn test_canonical_tag() {
        let meta = VideoMetadata::new(2700.0, 1920, 1080).unwrap();
        assert_eq!(meta.canonical_tag(), "45min_1920x1080");
    }

    #[test]
    fn test_video_file_parts() {
        let file = VideoFile::from_path("/videos/sub/Movie.Part1.MP4").unwrap();
        assert_eq!(file.base_name, "Movie.Part1");
        assert_eq!(file.extension, "MP4");
        assert_eq!(file.file_name(), "Movie.Part1.MP4");
        assert!(file.utf8_name);
        assert_eq!(
            file.with_base_name("Movie.Part1_45min_1920x1080"),
            PathBuf::from("/videos/sub/Movie.Part1_45min_1920x1080.MP4")
        );
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_non_utf8_name_is_kept_lossy() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/videos").join(OsStr::from_bytes(b"bad\xff.mp4"));
        let file = VideoFile::from_path(path).unwrap();
        assert!(!file.utf8_name);
        assert_eq!(file.base_name, "bad\u{FFFD}");
        assert_eq!(file.extension, "mp4");
    }
}
