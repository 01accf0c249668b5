//! User settings persistence port.

use async_trait::async_trait;
use thiserror::Error;

use crate::job::{RequesterId, SynthesisSettings};

/// Errors reported by the settings store.
#[derive(Debug, Error)]
#[error("settings store error: {0}")]
pub struct SettingsStoreError(pub String);

/// Port for per-user synthesis settings.
///
/// Unknown users get [`SynthesisSettings::default`]; the store only errors
/// on real persistence failures.
#[async_trait]
pub trait UserSettingsStore: Send + Sync {
    /// Fetch the requester's stored synthesis settings.
    async fn get(&self, requester: RequesterId) -> Result<SynthesisSettings, SettingsStoreError>;
}
