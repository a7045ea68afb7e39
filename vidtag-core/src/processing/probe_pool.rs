//! Concurrent metadata probing.
//!
//! Each file is probed independently on a bounded rayon pool. Completion
//! order is irrelevant: results are keyed by path, and callers read them back
//! in discovery order.

use crate::error::CoreResult;
use crate::external::FfprobeExecutor;
use crate::media::{ProbeResult, VideoFile};

use rayon::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Probes every file on a local pool of `jobs` threads (0 = rayon default).
///
/// `on_probed` is called once per file as soon as its probe finishes, from
/// whichever worker ran it. A failing probe only affects its own entry.
pub fn probe_all<P, F>(
    files: &[VideoFile],
    probe: &P,
    jobs: usize,
    on_probed: F,
) -> CoreResult<HashMap<PathBuf, ProbeResult>>
where
    P: FfprobeExecutor + ?Sized,
    F: Fn(&Path) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .thread_name(|i| format!("vidtag-probe-{i}"))
        .build()?;

    log::debug!(
        "Probing {} file(s) with {} worker(s)",
        files.len(),
        pool.current_num_threads()
    );

    let results = pool.install(|| {
        files
            .par_iter()
            .map(|file| {
                let result = probe.probe_metadata(&file.path);
                if let Err(reason) = &result {
                    log::warn!("Probe failed for {}: {}", file.path.display(), reason);
                }
                on_probed(&file.path);
                (file.path.clone(), result)
            })
            .collect::<HashMap<_, _>>()
    });

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{ProbeFailure, VideoMetadata};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct NameLengthProbe;

    impl FfprobeExecutor for NameLengthProbe {
        fn probe_metadata(&self, input_path: &Path) -> ProbeResult {
            let name = input_path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
            if name.starts_with("broken") {
                return Err(ProbeFailure::ToolFailed("moov atom not found".to_string()));
            }
            VideoMetadata::new(60.0 * name.len() as f64, 1280, 720)
        }
    }

    #[test]
    fn test_results_keyed_by_path() {
        let files: Vec<VideoFile> = ["a.mp4", "bbb.mp4", "broken.mp4", "cc.mkv"]
            .iter()
            .filter_map(|n| VideoFile::from_path(PathBuf::from("/videos").join(n)))
            .collect();
        let calls = AtomicUsize::new(0);

        let results = probe_all(&files, &NameLengthProbe, 3, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(results.len(), 4);
        let minutes = |name: &str| {
            results[&PathBuf::from("/videos").join(name)]
                .as_ref()
                .map(|m| m.duration_minutes().get())
                .ok()
        };
        assert_eq!(minutes("a.mp4"), Some(1));
        assert_eq!(minutes("bbb.mp4"), Some(3));
        assert_eq!(minutes("cc.mkv"), Some(2));
        assert_eq!(minutes("broken.mp4"), None);
    }

    #[test]
    fn test_empty_input() {
        let results = probe_all(&[], &NameLengthProbe, 0, |_| {}).unwrap();
        assert!(results.is_empty());
    }
}
