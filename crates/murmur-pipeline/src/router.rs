//! Result router — delivers job outcomes back on the front context.
//!
//! Consumes the completion channel and, per outcome, either fans out one
//! voice message per result file or reports a single localized failure
//! notice. A failure mid fan-out also triggers the notice — the requester
//! holding partial results should not be left guessing. In every case
//! the progress message is removed exactly once and the job's temporary
//! files are reclaimed — cleanup runs on every exit path, but only after
//! this job's own result files have been consumed by delivery.

use std::sync::Arc;

use murmur_core::ports::{AudioFormatConverter, Localizer, MessageControl, Messaging};
use murmur_core::{
    IncomingRequest, JobDescriptor, JobOutcome, PipelineError, SynthesisOutput,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, error, info, warn};

use crate::notices;
use crate::progress;

/// Marker appended to captions that were cut at the length limit.
const ELLIPSIS: &str = "...";

/// Front-context consumer of the completion channel.
pub struct ResultRouter {
    messaging: Arc<dyn Messaging>,
    converter: Arc<dyn AudioFormatConverter>,
    localizer: Arc<dyn Localizer>,
    max_caption_chars: usize,
}

impl ResultRouter {
    /// Create a router delivering through the given ports.
    pub fn new(
        messaging: Arc<dyn Messaging>,
        converter: Arc<dyn AudioFormatConverter>,
        localizer: Arc<dyn Localizer>,
        max_caption_chars: usize,
    ) -> Self {
        Self {
            messaging,
            converter,
            localizer,
            max_caption_chars,
        }
    }

    /// Consume outcomes until the worker shuts down and the channel closes.
    pub async fn run(self, mut outcome_rx: UnboundedReceiver<JobOutcome>) {
        while let Some(outcome) = outcome_rx.recv().await {
            if let Err(error) = self.route(outcome).await {
                // Cleanup and the failure notice already ran inside `route`;
                // this is the operator-facing trace.
                error!(%error, "result delivery failed");
            }
        }
        debug!("result router shutting down");
    }

    /// Deliver one outcome, then remove the progress message and reclaim the
    /// job's files — exactly once, on every path.
    pub async fn route(&self, outcome: JobOutcome) -> Result<(), PipelineError> {
        let JobOutcome { job, result } = outcome;
        let JobDescriptor {
            request,
            output,
            progress,
            ..
        } = job;

        let delivery = match result {
            Ok(produced) => {
                let delivery = self.deliver(&request, &produced).await;
                // A mid-fan-out failure leaves the requester with partial
                // results; tell them something went wrong anyway.
                if let Err(failure) = &delivery {
                    self.report_failure(&request, failure).await;
                }
                delivery
            }
            Err(failure) => {
                self.report_failure(&request, &failure).await;
                Ok(())
            }
        };

        progress::remove(self.messaging.as_ref(), progress).await;

        match output.remove_files() {
            Ok(removed) => debug!(job = output.stem(), removed, "temporary files reclaimed"),
            Err(io_error) => warn!(
                job = output.stem(),
                %io_error,
                "failed to reclaim temporary files"
            ),
        }

        delivery
    }

    /// Fan out one voice message per result file, in order. The first
    /// conversion or send failure aborts the remainder; already-delivered
    /// samples stand.
    async fn deliver(
        &self,
        request: &IncomingRequest,
        produced: &SynthesisOutput,
    ) -> Result<(), PipelineError> {
        let caption = truncate_caption(&produced.text, self.max_caption_chars);
        let total = produced.paths.len();

        for (delivered, path) in produced.paths.iter().enumerate() {
            let deliverable = self.converter.convert(path).await?;
            self.messaging
                .send_voice(
                    request.conversation,
                    &deliverable,
                    &caption,
                    &[MessageControl::Regenerate],
                    Some(request.message),
                )
                .await
                .map_err(|transport| PipelineError::Delivery {
                    delivered,
                    total,
                    detail: transport.to_string(),
                })?;
            info!(
                requester = %request.requester,
                sample = delivered,
                "sample delivered"
            );
        }
        Ok(())
    }

    /// Send the single generic failure notice; internal detail stays in the
    /// logs.
    async fn report_failure(&self, request: &IncomingRequest, failure: &PipelineError) {
        error!(requester = %request.requester, %failure, "synthesis job failed");
        let text = notices::pick(
            self.localizer.as_ref(),
            request.requester,
            notices::GENERATION_FAILED,
        );
        if let Err(send_error) = self
            .messaging
            .send_text(request.conversation, &text, Some(request.message))
            .await
        {
            warn!(%send_error, "failed to send failure notice");
        }
    }
}

/// Truncate an echoed caption to `max` characters, appending an ellipsis
/// marker when anything was cut. Character-based so multibyte text cannot be
/// split mid-scalar.
fn truncate_caption(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut caption: String = text.chars().take(max).collect();
    caption.push_str(ELLIPSIS);
    caption
}
