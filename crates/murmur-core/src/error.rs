//! Pipeline error taxonomy.
//!
//! Every job failure is mapped onto exactly one [`PipelineError`] variant
//! before it crosses back to the front context. The worker never lets a raw
//! engine error (or a panic) escape its loop, and the requester only ever
//! sees a generic localized notice — the detail here is for logs.

use thiserror::Error;

use crate::ports::{ConversionError, SynthesisError, TranscriptionError};

/// Errors produced by the synthesis job pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input text (or the transcription of input audio) was rejected.
    #[error("invalid input text: {reason}")]
    Validation {
        /// User-facing rejection reason from the validator.
        reason: String,
    },

    /// The transcription engine failed on raw audio input.
    #[error(transparent)]
    Transcription(#[from] TranscriptionError),

    /// The synthesis engine failed.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// Converting a result file to the delivery format failed.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Sending a result message failed mid fan-out. Deliveries that already
    /// completed stand; the remainder were abandoned.
    #[error("delivery failed after {delivered} of {total} samples: {detail}")]
    Delivery {
        /// Samples already delivered when the failure hit.
        delivered: usize,
        /// Samples the job produced in total.
        total: usize,
        /// Transport-level failure detail.
        detail: String,
    },

    /// The bounded submission queue is at capacity; resubmit later.
    #[error("synthesis queue is full")]
    QueueFull,

    /// Unexpected failure anywhere in the pipeline, including worker panics.
    #[error("internal pipeline error: {0}")]
    Internal(String),
}

impl PipelineError {
    /// Whether this failure is attributable to the requester's input rather
    /// than the pipeline or its collaborators.
    #[must_use]
    pub const fn is_user_input(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}
