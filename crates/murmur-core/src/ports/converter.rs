//! Audio delivery-format conversion port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by the format converter.
#[derive(Debug, Error)]
#[error("audio conversion failed for {path}: {detail}")]
pub struct ConversionError {
    /// The raw sample file that failed to convert.
    pub path: PathBuf,
    /// Converter-specific failure detail.
    pub detail: String,
}

/// Port converting a raw engine sample into the transport's delivery format.
///
/// Implementations must write the converted file next to the input, under
/// the same job prefix, so per-job cleanup reclaims both.
#[async_trait]
pub trait AudioFormatConverter: Send + Sync {
    /// Convert one sample file and return the deliverable path.
    async fn convert(&self, path: &Path) -> Result<PathBuf, ConversionError>;
}
