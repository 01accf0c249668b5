//! Transcription (ASR) engine port.

use thiserror::Error;

/// Sample rate the transcription engine expects, in Hz.
///
/// Voice payloads must be resampled to mono PCM at this rate before they
/// reach the pipeline.
pub const TRANSCRIBE_SAMPLE_RATE: u32 = 16_000;

/// Errors reported by the transcription engine.
#[derive(Debug, Error)]
pub enum TranscriptionError {
    /// The audio contained no recognizable speech.
    #[error("no speech detected in audio")]
    NoSpeech,

    /// The engine itself failed.
    #[error("transcription engine failure: {0}")]
    Engine(String),
}

/// Port for the speech-to-text engine.
///
/// Like synthesis, this is a blocking call made only from the worker thread;
/// while it runs, no other job can start.
pub trait TranscriptionEngine: Send + Sync {
    /// Transcribe mono PCM samples at [`TRANSCRIBE_SAMPLE_RATE`] to text.
    fn transcribe(&self, samples: &[f32]) -> Result<String, TranscriptionError>;
}
