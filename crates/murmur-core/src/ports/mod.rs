//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the pipeline expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No transport SDK types in any signature
//! - Engine-side ports are synchronous: they are blocking calls made from
//!   the dedicated worker thread, and that blocking is the serialization
//!   mechanism
//! - Front-context ports (messaging, conversion, settings) are async traits
//!   consumed from the embedding runtime

pub mod converter;
pub mod localizer;
pub mod messaging;
pub mod settings_store;
pub mod synthesis;
pub mod transcription;
pub mod validator;

pub use converter::{AudioFormatConverter, ConversionError};
pub use localizer::Localizer;
pub use messaging::{ActivityCue, MessageControl, Messaging, MessagingError};
pub use settings_store::{SettingsStoreError, UserSettingsStore};
pub use synthesis::{SynthesisEngine, SynthesisError, SynthesisRequest};
pub use transcription::{TranscriptionEngine, TranscriptionError, TRANSCRIBE_SAMPLE_RATE};
pub use validator::{TextRejection, TextValidator};
