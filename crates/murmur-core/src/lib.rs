//! Core domain types and port definitions for the murmur synthesis pipeline.
//!
//! This crate holds everything that crosses the context boundary between the
//! front context (the embedding async runtime) and the synthesis worker
//! thread: job descriptors and outcomes, per-job output path ownership, the
//! pipeline error taxonomy, and the port traits the pipeline expects from
//! infrastructure (engines, messaging transport, settings store, localizer).
//!
//! It contains no channels, no threads, and no I/O beyond the per-job file
//! cleanup in [`paths`]; the pipeline machinery lives in `murmur-pipeline`.

pub mod error;
pub mod job;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use error::PipelineError;
pub use job::{
    ConversationRef, IncomingRequest, InputPayload, JobDescriptor, JobOutcome, MessageRef,
    ProgressHandle, RequesterId, SynthesisOutput, SynthesisSettings,
};
pub use paths::OutputPrefix;
pub use ports::{
    ActivityCue, AudioFormatConverter, ConversionError, Localizer, MessageControl, Messaging,
    MessagingError, SettingsStoreError, SynthesisEngine, SynthesisError, SynthesisRequest,
    TextRejection, TextValidator, TranscriptionEngine, TranscriptionError, UserSettingsStore,
    TRANSCRIBE_SAMPLE_RATE,
};
