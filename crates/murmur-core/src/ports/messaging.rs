//! Chat messaging transport port.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

use crate::job::{ConversationRef, MessageRef};

/// Activity cue shown in the conversation while work happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityCue {
    /// "Recording a voice message" indicator.
    RecordingVoice,
    /// "Typing" indicator.
    Typing,
}

/// Inline control attached to a delivered message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageControl {
    /// Offer re-running the same synthesis query.
    Regenerate,
}

/// Errors reported by the messaging transport.
#[derive(Debug, Error)]
pub enum MessagingError {
    /// The referenced message no longer exists (deleted by the user or the
    /// platform). Deletion treats this as success.
    #[error("message no longer exists")]
    Gone,

    /// Any other transport failure.
    #[error("messaging transport error: {0}")]
    Transport(String),
}

/// Port for the chat transport the requester talks through.
///
/// All methods run on the front context; the worker thread never calls
/// this port.
#[async_trait]
pub trait Messaging: Send + Sync {
    /// Show a transient activity cue in the conversation.
    async fn send_activity(
        &self,
        conversation: ConversationRef,
        cue: ActivityCue,
    ) -> Result<(), MessagingError>;

    /// Send a plain text message, optionally as a reply.
    async fn send_text(
        &self,
        conversation: ConversationRef,
        text: &str,
        reply_to: Option<MessageRef>,
    ) -> Result<MessageRef, MessagingError>;

    /// Send one synthesized sample as a voice message with a caption and
    /// inline controls, as a reply to the originating request.
    async fn send_voice(
        &self,
        conversation: ConversationRef,
        audio: &Path,
        caption: &str,
        controls: &[MessageControl],
        reply_to: Option<MessageRef>,
    ) -> Result<MessageRef, MessagingError>;

    /// Delete a previously sent message. Implementations report
    /// [`MessagingError::Gone`] when it was already removed.
    async fn delete(&self, message: MessageRef) -> Result<(), MessagingError>;
}
