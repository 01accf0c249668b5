//! Dedicated synthesis worker thread.
//!
//! All heavy engine calls happen here, one job at a time, in arrival order.
//! Serialization is structural: the thread performs the blocking
//! transcription/synthesis calls inline, so the next job cannot start until
//! the current one reaches a terminal state — no lock required.
//!
//! # Design Principles
//!
//! - The worker owns the [`JobDescriptor`] for the duration of execution and
//!   gives it back inside the [`JobOutcome`]
//! - Outcomes cross back to the front context only through the completion
//!   channel; nothing front-context-owned is ever touched from this thread
//! - Every iteration is panic-guarded: a misbehaving engine produces an
//!   `Internal` failure outcome, never a dead worker loop

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, SyncSender, TrySendError};
use std::thread;

use murmur_core::ports::{SynthesisEngine, SynthesisRequest, TextValidator, TranscriptionEngine};
use murmur_core::{InputPayload, JobDescriptor, JobOutcome, PipelineError, SynthesisOutput};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, info_span};

/// Engine-side ports the worker thread needs, cloned into the thread.
#[derive(Clone)]
pub struct WorkerDeps {
    /// Speech-to-text engine for voice payloads.
    pub transcription: Arc<dyn TranscriptionEngine>,
    /// The text-to-speech engine.
    pub synthesis: Arc<dyn SynthesisEngine>,
    /// Validator re-run on transcribed text.
    pub validator: Arc<dyn TextValidator>,
}

/// Why a submission was rejected. The descriptor is handed back so the
/// caller can remove its progress message and notify the requester.
#[derive(Debug)]
pub enum SubmitError {
    /// The bounded queue is at capacity.
    QueueFull(JobDescriptor),
    /// The worker thread is no longer running.
    WorkerGone(JobDescriptor),
}

impl SubmitError {
    /// Recover the rejected descriptor.
    #[must_use]
    pub fn into_job(self) -> JobDescriptor {
        match self {
            Self::QueueFull(job) | Self::WorkerGone(job) => job,
        }
    }
}

/// Handle to the dedicated worker thread.
///
/// Submissions go through a bounded channel and return immediately; the
/// job is guaranteed to start only after every previously submitted job has
/// reached a terminal state. Dropping the handle closes the channel; the
/// worker drains what was already queued, then exits and is joined.
pub struct WorkerHandle {
    submit_tx: Option<SyncSender<JobDescriptor>>,
    thread: Option<thread::JoinHandle<()>>,
}

impl WorkerHandle {
    /// Spawn the worker thread with a submission queue of `queue_capacity`.
    ///
    /// Outcomes are pushed onto `outcome_tx`, consumed by the router task on
    /// the front context.
    pub fn spawn(
        queue_capacity: usize,
        deps: WorkerDeps,
        outcome_tx: UnboundedSender<JobOutcome>,
    ) -> std::io::Result<Self> {
        let (submit_tx, submit_rx) = std::sync::mpsc::sync_channel(queue_capacity);

        let thread = thread::Builder::new()
            .name("murmur-synth".into())
            .spawn(move || run(&submit_rx, &deps, &outcome_tx))?;

        Ok(Self {
            submit_tx: Some(submit_tx),
            thread: Some(thread),
        })
    }

    /// Hand a job to the worker without blocking the front context.
    pub fn submit(&self, job: JobDescriptor) -> Result<(), SubmitError> {
        let Some(submit_tx) = &self.submit_tx else {
            return Err(SubmitError::WorkerGone(job));
        };
        submit_tx.try_send(job).map_err(|e| match e {
            TrySendError::Full(job) => SubmitError::QueueFull(job),
            TrySendError::Disconnected(job) => SubmitError::WorkerGone(job),
        })
    }
}

impl Drop for WorkerHandle {
    fn drop(&mut self) {
        // Closing the channel ends the loop once queued jobs have drained.
        drop(self.submit_tx.take());
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// The worker run loop: recv → execute → send outcome → recv.
fn run(
    submit_rx: &Receiver<JobDescriptor>,
    deps: &WorkerDeps,
    outcome_tx: &UnboundedSender<JobOutcome>,
) {
    while let Ok(job) = submit_rx.recv() {
        let span = info_span!(
            "synthesis_job",
            requester = %job.request.requester,
            job = job.output.stem()
        );
        let guard = span.enter();

        info!(samples = job.settings.sample_count, "job started");

        let result = catch_unwind(AssertUnwindSafe(|| execute(&job, deps)))
            .unwrap_or_else(|panic| Err(PipelineError::Internal(panic_message(panic.as_ref()))));

        match &result {
            Ok(output) => info!(produced = output.paths.len(), "job finished"),
            Err(error) => info!(%error, "job failed"),
        }

        drop(guard);

        if outcome_tx.send(JobOutcome { job, result }).is_err() {
            // Front context is gone; nobody can consume further outcomes.
            break;
        }
    }
    debug!("synthesis worker shutting down");
}

/// Execute one job to a terminal result. Blocking by design.
fn execute(job: &JobDescriptor, deps: &WorkerDeps) -> Result<SynthesisOutput, PipelineError> {
    let text = match &job.payload {
        InputPayload::Text(text) => text.clone(),
        InputPayload::Audio(samples) => {
            let text = deps.transcription.transcribe(samples)?;
            // Transcribed text has never seen the upstream validator.
            deps.validator
                .validate(&text)
                .map_err(|rejection| PipelineError::Validation {
                    reason: rejection.to_string(),
                })?;
            text
        }
    };

    let request = SynthesisRequest {
        text: &text,
        voice: &job.settings.voice,
        emotion: job.settings.emotion.as_deref(),
        sample_count: job.settings.sample_count,
        output: &job.output,
    };
    let paths = deps.synthesis.synthesize(&request)?;

    Ok(SynthesisOutput { text, paths })
}

/// Best-effort extraction of a panic payload message.
fn panic_message(panic: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {message}")
    } else if let Some(message) = panic.downcast_ref::<String>() {
        format!("worker panicked: {message}")
    } else {
        "worker panicked".to_string()
    }
}
