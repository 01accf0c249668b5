//! Transient progress message lifecycle.
//!
//! One progress message exists per job, from dispatch until the job reaches
//! a terminal state. Removal consumes the handle, so the `Active → Removed`
//! transition happens exactly once on every outcome path; a failed removal
//! is logged and swallowed — the job result matters more than a stale
//! status message.

use murmur_core::ports::{ActivityCue, Localizer, Messaging, MessagingError};
use murmur_core::{ConversationRef, ProgressHandle, RequesterId};
use tracing::{debug, warn};

use crate::notices;

/// Send the activity cue plus a visible status message; returns the handle
/// the job carries until removal.
pub async fn create(
    messaging: &dyn Messaging,
    localizer: &dyn Localizer,
    requester: RequesterId,
    conversation: ConversationRef,
) -> Result<ProgressHandle, MessagingError> {
    messaging
        .send_activity(conversation, ActivityCue::RecordingVoice)
        .await?;
    let text = notices::pick(localizer, requester, notices::IN_PROGRESS);
    let message = messaging.send_text(conversation, &text, None).await?;
    Ok(ProgressHandle { message })
}

/// Delete the status message. Never fails from the caller's point of view:
/// an already-deleted message is expected, anything else is logged.
pub async fn remove(messaging: &dyn Messaging, handle: ProgressHandle) {
    match messaging.delete(handle.message).await {
        Ok(()) => {}
        Err(MessagingError::Gone) => {
            debug!(message = handle.message.id, "progress message already gone");
        }
        Err(error) => {
            warn!(
                message = handle.message.id,
                %error,
                "failed to delete progress message"
            );
        }
    }
}
