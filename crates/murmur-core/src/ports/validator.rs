//! Input text validation port.

use thiserror::Error;

/// A user-facing reason the validator rejected a text.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct TextRejection(pub String);

/// Port for synthesis input validation.
///
/// Called twice per voice request: once upstream on the front context before
/// submission (command handlers, out of this crate's scope), and again on
/// the worker thread after transcription — transcribed text has never been
/// validated and must not reach the engine unchecked.
pub trait TextValidator: Send + Sync {
    /// Check text for synthesis suitability.
    fn validate(&self, text: &str) -> Result<(), TextRejection>;
}
