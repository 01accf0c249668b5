//! Pipeline configuration and validation.

use std::path::PathBuf;

use thiserror::Error;

/// Longest caption the delivery transport accepts.
pub const DEFAULT_MAX_CAPTION_CHARS: usize = 1024;

/// Default bound on jobs waiting for the worker.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Configuration for the synthesis pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory all temporary output files are written under. Shared by
    /// every job; per-job ownership is carried by the path prefix.
    pub results_dir: PathBuf,
    /// Maximum jobs queued for the worker; submission beyond this is
    /// rejected with a "busy" notice rather than queued without bound.
    pub queue_capacity: usize,
    /// Longest echoed caption; longer texts are truncated with an ellipsis.
    pub max_caption_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            results_dir: PathBuf::from("results"),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            max_caption_chars: DEFAULT_MAX_CAPTION_CHARS,
        }
    }
}

/// Errors from [`validate_config`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The results directory path is empty.
    #[error("results_dir must not be empty")]
    EmptyResultsDir,

    /// A zero-capacity queue could never accept a job.
    #[error("queue_capacity must be at least 1")]
    ZeroQueueCapacity,

    /// Captions shorter than the ellipsis marker cannot be truncated sanely.
    #[error("max_caption_chars must be at least 4")]
    CaptionTooShort,
}

/// Validate a configuration before the pipeline starts.
pub fn validate_config(config: &PipelineConfig) -> Result<(), ConfigError> {
    if config.results_dir.as_os_str().is_empty() {
        return Err(ConfigError::EmptyResultsDir);
    }
    if config.queue_capacity == 0 {
        return Err(ConfigError::ZeroQueueCapacity);
    }
    if config.max_caption_chars < 4 {
        return Err(ConfigError::CaptionTooShort);
    }
    Ok(())
}
