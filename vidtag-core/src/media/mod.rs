//! Media file and metadata types
//!
//! This module provides the data structures shared by discovery, probing and
//! classification: the discovered [`VideoFile`], the probed
//! [`VideoMetadata`], and the duration/resolution values rendered into tags.

pub mod info;

// Re-export commonly used types
pub use info::{
    DurationMinutes, ProbeFailure, ProbeResult, Resolution, VideoFile, VideoMetadata,
};
