//! Synthesis engine port.

use std::path::PathBuf;

use thiserror::Error;

use crate::paths::OutputPrefix;

/// Parameters for one synthesis engine invocation.
#[derive(Debug, Clone)]
pub struct SynthesisRequest<'a> {
    /// Text to synthesize (already validated).
    pub text: &'a str,
    /// Voice identifier.
    pub voice: &'a str,
    /// Optional emotion tag.
    pub emotion: Option<&'a str>,
    /// Number of samples to produce.
    pub sample_count: u32,
    /// Prefix every output file must be written under.
    pub output: &'a OutputPrefix,
}

/// Errors reported by the synthesis engine.
#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The requested voice does not exist.
    #[error("unknown voice: {0}")]
    UnknownVoice(String),

    /// The engine itself failed (model crash, out of memory, bad output).
    #[error("synthesis engine failure: {0}")]
    Engine(String),
}

/// Port for the heavy text-to-speech engine.
///
/// `synthesize` is a blocking call that can take minutes for long texts; it
/// is only ever invoked from the dedicated worker thread, one call at a
/// time. Implementations write one file per sample under
/// [`SynthesisRequest::output`] (see [`OutputPrefix::sample_path`]) and
/// return the paths in delivery order.
pub trait SynthesisEngine: Send + Sync {
    /// Run synthesis to completion and return the produced sample files.
    fn synthesize(&self, request: &SynthesisRequest<'_>) -> Result<Vec<PathBuf>, SynthesisError>;
}
