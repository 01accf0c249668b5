//! User-facing notice texts.
//!
//! Every notice carries both language variants; the [`Localizer`] port picks
//! the one the requester should see. Failure notices are deliberately
//! generic — internal error detail goes to the logs, never to the chat.

use murmur_core::ports::Localizer;
use murmur_core::RequesterId;

/// A two-variant user-facing notice.
#[derive(Debug, Clone, Copy)]
pub struct Notice {
    /// Variant for requesters matching the localizer's locale.
    pub localized: &'static str,
    /// Default variant for everyone else.
    pub fallback: &'static str,
}

/// Shown while a job is queued or running.
pub const IN_PROGRESS: Notice = Notice {
    localized: "\u{23F3} Синтез в процессе... \u{23F3}",
    fallback: "\u{23F3} Synthesis is in progress... \u{23F3}",
};

/// Shown once when a job fails for any internal reason.
pub const GENERATION_FAILED: Notice = Notice {
    localized: "К сожалению синтез аудио завершился ошибкой, пожалуйста попробуйте еще раз",
    fallback: "Sorry, your audio generation failed, please try again",
};

/// Shown when the submission queue is full.
pub const QUEUE_BUSY: Notice = Notice {
    localized: "Бот сейчас занят, пожалуйста попробуйте позже",
    fallback: "The bot is busy right now, please try again later",
};

/// Resolve a notice for one requester.
pub fn pick(localizer: &dyn Localizer, requester: RequesterId, notice: Notice) -> String {
    localizer.pick(requester, notice.localized, notice.fallback)
}
