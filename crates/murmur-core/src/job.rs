//! Job descriptor and outcome types carried across the context boundary.
//!
//! A [`JobDescriptor`] is owned by the worker from submission until it
//! produces the matching [`JobOutcome`]; ownership then transfers to the
//! result router, which owns the output files until delivery and cleanup
//! complete. Both hand-offs are moves, so a descriptor cannot be submitted
//! twice and an outcome cannot be routed twice.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::paths::OutputPrefix;

// ── Identities ─────────────────────────────────────────────────────

/// Identity of the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterId(pub i64);

impl fmt::Display for RequesterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque reference to the conversation a request arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationRef(pub i64);

/// Opaque reference to a single sent message within a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageRef {
    /// Conversation the message lives in.
    pub conversation: ConversationRef,
    /// Transport-assigned message id.
    pub id: i64,
}

/// The originating front-context request a job replies to.
#[derive(Debug, Clone, Copy)]
pub struct IncomingRequest {
    /// Who asked for the synthesis.
    pub requester: RequesterId,
    /// Where replies (progress, results, failure notices) are sent.
    pub conversation: ConversationRef,
    /// The request message itself; deliveries reply under it.
    pub message: MessageRef,
}

// ── Request content ────────────────────────────────────────────────

/// The input half of a synthesis request — exactly one form is populated.
#[derive(Debug, Clone)]
pub enum InputPayload {
    /// Text to synthesize, already validated upstream.
    Text(String),
    /// Raw mono PCM samples to transcribe before synthesis.
    Audio(Vec<f32>),
}

impl InputPayload {
    /// Whether this payload still needs a transcription pass.
    #[must_use]
    pub const fn needs_transcription(&self) -> bool {
        matches!(self, Self::Audio(_))
    }
}

/// Per-user synthesis settings, resolved before submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesisSettings {
    /// Voice identifier understood by the synthesis engine.
    pub voice: String,
    /// Optional emotion tag forwarded to the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
    /// How many samples the engine should produce for this request.
    pub sample_count: u32,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            voice: "random".to_string(),
            emotion: None,
            sample_count: 1,
        }
    }
}

// ── Progress handle ────────────────────────────────────────────────

/// Handle to the transient status message shown while a job runs.
///
/// The handle is consumed when the message is removed, so each indicator
/// goes through its `Active → Removed` transition exactly once regardless
/// of which outcome path the job takes.
#[derive(Debug)]
pub struct ProgressHandle {
    /// The status message to delete once the job reaches a terminal state.
    pub message: MessageRef,
}

// ── Descriptor and outcome ─────────────────────────────────────────

/// Immutable description of one synthesis job.
#[derive(Debug)]
pub struct JobDescriptor {
    /// The front-context request this job answers.
    pub request: IncomingRequest,
    /// Text or raw audio to synthesize from.
    pub payload: InputPayload,
    /// Voice, emotion, and sample count for the engine call.
    pub settings: SynthesisSettings,
    /// Unique per-job prefix all temporary output files live under.
    pub output: OutputPrefix,
    /// Progress message shown while the job runs.
    pub progress: ProgressHandle,
    /// When the job was accepted on the front context.
    pub submitted_at: DateTime<Utc>,
}

/// Successful synthesis result produced on the worker context.
#[derive(Debug)]
pub struct SynthesisOutput {
    /// The text that was synthesized (for audio input, the transcription);
    /// echoed back as the caption of each delivered sample.
    pub text: String,
    /// Result files in delivery order, all under the job's output prefix.
    pub paths: Vec<PathBuf>,
}

/// Terminal result of a job, produced exactly once per descriptor.
#[derive(Debug)]
pub struct JobOutcome {
    /// The descriptor this outcome settles, handed back for delivery/cleanup.
    pub job: JobDescriptor,
    /// Result files on success, the captured failure otherwise.
    pub result: Result<SynthesisOutput, PipelineError>,
}
