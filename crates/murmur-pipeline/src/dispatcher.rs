//! Front-context entry point for synthesis requests.
//!
//! Command/message handlers validate input and resolve locale upstream,
//! then call [`Dispatcher::dispatch`] — the sole entry point into the job
//! pipeline. The dispatcher itself validates nothing: it shows the progress
//! message, builds the immutable descriptor with a unique output prefix,
//! and hands the job to the worker without blocking.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use murmur_core::ports::{Localizer, Messaging, UserSettingsStore};
use murmur_core::{
    IncomingRequest, InputPayload, JobDescriptor, OutputPrefix, PipelineError, SynthesisSettings,
};
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::notices::{self, Notice};
use crate::progress;
use crate::worker::{SubmitError, WorkerHandle};

/// Builds jobs and submits them to the worker.
pub struct Dispatcher {
    config: PipelineConfig,
    worker: Arc<WorkerHandle>,
    messaging: Arc<dyn Messaging>,
    localizer: Arc<dyn Localizer>,
    settings_store: Arc<dyn UserSettingsStore>,
    // Disambiguates jobs submitted within the same millisecond.
    job_sequence: AtomicU64,
}

impl Dispatcher {
    /// Wire a dispatcher to an already-running worker.
    pub fn new(
        config: PipelineConfig,
        worker: Arc<WorkerHandle>,
        messaging: Arc<dyn Messaging>,
        localizer: Arc<dyn Localizer>,
        settings_store: Arc<dyn UserSettingsStore>,
    ) -> Self {
        Self {
            config,
            worker,
            messaging,
            localizer,
            settings_store,
            job_sequence: AtomicU64::new(0),
        }
    }

    /// Build, register, and enqueue one synthesis job.
    ///
    /// Returns as soon as the job is queued; results arrive later through
    /// the router. A rejected submission (full queue, dead worker) removes
    /// the just-created progress message, notifies the requester, and
    /// reports the error to the caller.
    pub async fn dispatch(
        &self,
        request: IncomingRequest,
        payload: InputPayload,
        settings: SynthesisSettings,
    ) -> Result<(), PipelineError> {
        let submitted_at = Utc::now();
        let output = OutputPrefix::for_request(
            &self.config.results_dir,
            request.requester,
            submitted_at,
            self.job_sequence.fetch_add(1, Ordering::Relaxed),
        );

        let progress = progress::create(
            self.messaging.as_ref(),
            self.localizer.as_ref(),
            request.requester,
            request.conversation,
        )
        .await
        .map_err(|e| {
            PipelineError::Internal(format!("failed to show progress message: {e}"))
        })?;

        let job = JobDescriptor {
            request,
            payload,
            settings,
            output,
            progress,
            submitted_at,
        };

        match self.worker.submit(job) {
            Ok(()) => {
                info!(requester = %request.requester, "job submitted");
                Ok(())
            }
            Err(SubmitError::QueueFull(job)) => {
                warn!(requester = %request.requester, "submission rejected: queue full");
                self.reject(job, notices::QUEUE_BUSY).await;
                Err(PipelineError::QueueFull)
            }
            Err(SubmitError::WorkerGone(job)) => {
                self.reject(job, notices::GENERATION_FAILED).await;
                Err(PipelineError::Internal(
                    "synthesis worker is not running".to_string(),
                ))
            }
        }
    }

    /// Resolve the requester's stored settings, then dispatch.
    ///
    /// A settings-store failure falls back to defaults rather than dropping
    /// the request; the store is a convenience, not a gatekeeper.
    pub async fn dispatch_with_stored_settings(
        &self,
        request: IncomingRequest,
        payload: InputPayload,
    ) -> Result<(), PipelineError> {
        let settings = match self.settings_store.get(request.requester).await {
            Ok(settings) => settings,
            Err(store_error) => {
                warn!(
                    requester = %request.requester,
                    %store_error,
                    "settings lookup failed, using defaults"
                );
                SynthesisSettings::default()
            }
        };
        self.dispatch(request, payload, settings).await
    }

    /// Undo the visible side effects of a job that never reached the worker.
    async fn reject(&self, job: JobDescriptor, notice: Notice) {
        let JobDescriptor {
            request, progress, ..
        } = job;
        progress::remove(self.messaging.as_ref(), progress).await;
        let text = notices::pick(self.localizer.as_ref(), request.requester, notice);
        if let Err(send_error) = self
            .messaging
            .send_text(request.conversation, &text, Some(request.message))
            .await
        {
            warn!(%send_error, "failed to send rejection notice");
        }
    }
}
