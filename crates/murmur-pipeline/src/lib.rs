//! The murmur synthesis job pipeline.
//!
//! Accepts synthesis requests from many concurrent front-end interactions
//! and executes the heavy engine calls strictly one at a time on a dedicated
//! worker thread, while the front context stays responsive.
//!
//! # Architecture
//!
//! - **Dispatcher** (front context): shows the progress message, builds the
//!   immutable [`murmur_core::JobDescriptor`], and hands it to the worker.
//! - **Worker** (`murmur-synth` thread): pulls jobs in arrival order from a
//!   bounded submission channel and performs the blocking transcription and
//!   synthesis calls inline — that blocking is the serialization mechanism.
//! - **Router** (front context): consumes the completion channel, fans out
//!   one voice message per result file (or reports a single failure notice),
//!   then removes the progress message and reclaims the job's files.
//!
//! # Concurrency Model
//!
//! - Submission channel: bounded `std::sync::mpsc::sync_channel`; a full
//!   queue rejects the job instead of queuing without limit
//! - Completion channel: `tokio::sync::mpsc::unbounded_channel`, consumed
//!   only by the router task — no completion callback ever runs on the
//!   worker context, and the worker never touches front-context state
//! - Each worker iteration is panic-guarded, so a misbehaving engine call
//!   cannot kill the loop for subsequent jobs

pub mod config;
pub mod dispatcher;
pub mod notices;
pub mod pipeline;
pub mod progress;
pub mod router;
pub mod worker;

pub use config::{ConfigError, PipelineConfig, validate_config};
pub use dispatcher::Dispatcher;
pub use pipeline::{Pipeline, PipelineDeps, StartError};
pub use router::ResultRouter;
pub use worker::{SubmitError, WorkerHandle};
