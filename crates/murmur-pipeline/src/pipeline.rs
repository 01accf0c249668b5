//! Pipeline assembly — the explicit context object wiring everything up.
//!
//! Constructed once at process start and handed to the command handlers;
//! there are no module-level globals. Owns the worker thread and the router
//! task for the lifetime of the process.

use std::sync::Arc;

use murmur_core::ports::{
    AudioFormatConverter, Localizer, Messaging, SynthesisEngine, TextValidator,
    TranscriptionEngine, UserSettingsStore,
};
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::config::{ConfigError, PipelineConfig, validate_config};
use crate::dispatcher::Dispatcher;
use crate::router::ResultRouter;
use crate::worker::{WorkerDeps, WorkerHandle};

/// The port implementations the pipeline is built from.
#[derive(Clone)]
pub struct PipelineDeps {
    /// The heavy text-to-speech engine (worker context).
    pub synthesis: Arc<dyn SynthesisEngine>,
    /// Speech-to-text engine for voice payloads (worker context).
    pub transcription: Arc<dyn TranscriptionEngine>,
    /// Validator re-run on transcribed text (worker context).
    pub validator: Arc<dyn TextValidator>,
    /// Delivery-format converter (front context).
    pub converter: Arc<dyn AudioFormatConverter>,
    /// Chat transport (front context).
    pub messaging: Arc<dyn Messaging>,
    /// Per-user settings lookup (front context).
    pub settings_store: Arc<dyn UserSettingsStore>,
    /// Locale selection for user-facing notices.
    pub localizer: Arc<dyn Localizer>,
}

/// Errors from [`Pipeline::start`].
#[derive(Debug, Error)]
pub enum StartError {
    /// The configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Creating the results directory or spawning the worker thread failed.
    #[error("failed to start pipeline: {0}")]
    Io(#[from] std::io::Error),
}

/// A running synthesis pipeline: one worker thread, one router task, and
/// the dispatcher handlers submit through.
pub struct Pipeline {
    dispatcher: Arc<Dispatcher>,
    worker: Arc<WorkerHandle>,
    router_task: JoinHandle<()>,
}

impl Pipeline {
    /// Validate the config, create the results directory, and spawn the
    /// worker thread plus the router task. Must be called from within a
    /// Tokio runtime.
    pub fn start(config: PipelineConfig, deps: PipelineDeps) -> Result<Self, StartError> {
        validate_config(&config)?;
        std::fs::create_dir_all(&config.results_dir)?;

        let (outcome_tx, outcome_rx) = tokio::sync::mpsc::unbounded_channel();

        let worker = Arc::new(WorkerHandle::spawn(
            config.queue_capacity,
            WorkerDeps {
                transcription: deps.transcription,
                synthesis: deps.synthesis,
                validator: deps.validator,
            },
            outcome_tx,
        )?);

        let router = ResultRouter::new(
            Arc::clone(&deps.messaging),
            deps.converter,
            Arc::clone(&deps.localizer),
            config.max_caption_chars,
        );
        let router_task = tokio::spawn(router.run(outcome_rx));

        let dispatcher = Arc::new(Dispatcher::new(
            config,
            Arc::clone(&worker),
            deps.messaging,
            deps.localizer,
            deps.settings_store,
        ));

        info!("synthesis pipeline started");
        Ok(Self {
            dispatcher,
            worker,
            router_task,
        })
    }

    /// The entry point handlers dispatch through.
    #[must_use]
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Stop accepting jobs, drain what was already queued, and wait until
    /// every outcome has been delivered.
    ///
    /// The worker join happens off the async runtime. If some handler still
    /// holds the dispatcher, its submission channel keeps the worker alive;
    /// in that case shutdown logs and returns without joining.
    pub async fn shutdown(self) {
        let Self {
            dispatcher,
            worker,
            router_task,
        } = self;
        drop(dispatcher);

        match Arc::try_unwrap(worker) {
            Ok(handle) => {
                // Dropping the handle closes submission and joins the thread.
                let join = tokio::task::spawn_blocking(move || drop(handle));
                if join.await.is_err() {
                    warn!("worker join task panicked");
                }
            }
            Err(_still_shared) => {
                warn!("dispatcher still referenced elsewhere; worker left running");
                router_task.abort();
                return;
            }
        }

        // Worker gone ⇒ completion channel closed ⇒ router drains and exits.
        if router_task.await.is_err() {
            warn!("router task panicked during shutdown");
        }
        info!("synthesis pipeline stopped");
    }
}
