//! On-disk storage for generated audio files.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};
use tts_core::TtsResult;
use uuid::Uuid;

/// Manages the directory where generated WAV files land.
///
/// Files are named with a fresh UUID per request and reaped by age, so
/// the store needs no index and survives restarts.
#[derive(Debug, Clone)]
pub struct OutputStore {
    dir: PathBuf,
}

impl OutputStore {
    /// Open a store, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> TtsResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the generated files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reserve a fresh path for one output file.
    pub fn allocate(&self) -> PathBuf {
        self.dir.join(format!("{}.wav", Uuid::new_v4()))
    }

    /// Delete `.wav` files older than `max_age`. Returns how many were
    /// removed.
    ///
    /// Only audio outputs are touched; anything else in the directory
    /// is left alone. Errors on individual entries are logged and
    /// skipped so one bad file cannot stall the sweep.
    pub fn sweep(&self, max_age: Duration) -> TtsResult<usize> {
        let now = SystemTime::now();
        let mut removed = 0;

        for entry in std::fs::read_dir(&self.dir)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let path = entry.path();
            if !path.is_file() || path.extension().map_or(true, |ext| ext != "wav") {
                continue;
            }

            let modified = match entry.metadata().and_then(|m| m.modified()) {
                Ok(modified) => modified,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping file without mtime");
                    continue;
                }
            };

            let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
            if age > max_age {
                match std::fs::remove_file(&path) {
                    Ok(()) => {
                        debug!(
                            path = %path.display(),
                            age_secs = age.as_secs(),
                            "removed stale output"
                        );
                        removed += 1;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "failed to remove stale output")
                    }
                }
            }
        }

        Ok(removed)
    }
}
