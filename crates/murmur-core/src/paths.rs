//! Per-job output path ownership.
//!
//! Every job gets a unique path prefix inside the shared results directory,
//! derived from the requester id, the submission timestamp, and a monotonic
//! job sequence number. Cleanup
//! deletes only the files under that prefix — never the whole directory —
//! so one job's cleanup can never remove another pending job's files.

use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::job::RequesterId;

/// File extension the synthesis engine writes its raw samples in.
pub const RAW_SAMPLE_EXT: &str = "wav";

/// Unique per-job output path prefix.
///
/// All temporary files a job produces (engine output samples plus any
/// converted delivery files) must live directly in `dir` and start with
/// `stem` followed by a `_` or `.` separator. [`OutputPrefix::owns`] is the
/// single source of truth for that ownership rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPrefix {
    dir: PathBuf,
    stem: String,
}

impl OutputPrefix {
    /// Derive the prefix for one request: `{requester}_{millis}_{sequence}`
    /// under `dir`.
    ///
    /// The timestamp alone is not unique — two requests from the same
    /// requester can land in the same millisecond — so the dispatcher passes
    /// a process-wide monotonic `sequence` to keep stems collision-free.
    #[must_use]
    pub fn for_request(
        dir: &Path,
        requester: RequesterId,
        submitted_at: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Self {
            dir: dir.to_path_buf(),
            stem: format!(
                "{requester}_{}_{sequence}",
                submitted_at.timestamp_millis()
            ),
        }
    }

    /// Build a prefix from raw parts. Intended for tests and adapters that
    /// already carry a stem.
    #[must_use]
    pub fn from_parts(dir: PathBuf, stem: String) -> Self {
        Self { dir, stem }
    }

    /// Directory the job's files live in (shared with other jobs).
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The job-unique file name stem.
    #[must_use]
    pub fn stem(&self) -> &str {
        &self.stem
    }

    /// Path the engine writes sample `index` to.
    #[must_use]
    pub fn sample_path(&self, index: u32) -> PathBuf {
        self.dir
            .join(format!("{}_{index}.{RAW_SAMPLE_EXT}", self.stem))
    }

    /// Whether `path` belongs to this job.
    ///
    /// Requires the `stem` to be followed by a separator so that the stem
    /// `u_100` does not claim files of the job with stem `u_1000`.
    #[must_use]
    pub fn owns(&self, path: &Path) -> bool {
        if path.parent() != Some(self.dir.as_path()) {
            return false;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        name == self.stem
            || name.starts_with(&format!("{}_", self.stem))
            || name.starts_with(&format!("{}.", self.stem))
    }

    /// Delete every file owned by this prefix, returning how many were
    /// removed. A missing results directory counts as nothing to clean.
    pub fn remove_files(&self) -> io::Result<usize> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry?.path();
            if !self.owns(&path) {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => removed += 1,
                // Already gone is fine; someone beat us to it.
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }
        Ok(removed)
    }
}
