//! Locale selection port.

use crate::job::RequesterId;

/// Port picking the right language variant for a requester.
///
/// The pipeline supplies both variants of every user-facing notice; the
/// implementation decides (from stored locale, transport hints, etc.) which
/// one the requester sees. Pure and synchronous.
pub trait Localizer: Send + Sync {
    /// Pick the localized variant when it matches the requester's locale,
    /// the fallback otherwise.
    fn pick(&self, requester: RequesterId, localized: &str, fallback: &str) -> String;
}
