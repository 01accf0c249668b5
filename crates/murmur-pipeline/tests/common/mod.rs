//! Shared fake port implementations for pipeline integration tests.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use murmur_core::ports::{
    ActivityCue, AudioFormatConverter, ConversionError, Localizer, MessageControl, Messaging,
    MessagingError, SettingsStoreError, SynthesisEngine, SynthesisError, SynthesisRequest,
    TextRejection, TextValidator, TranscriptionEngine, TranscriptionError, UserSettingsStore,
};
use murmur_core::{ConversationRef, MessageRef, RequesterId, SynthesisSettings};

/// Initialize test logging once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "murmur_pipeline=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Poll until `check` passes or the deadline hits.
pub async fn wait_until(check: impl Fn() -> bool) {
    for _ in 0..500 {
        if check() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached within deadline");
}

// ── Messaging ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct SentVoice {
    pub path: PathBuf,
    pub caption: String,
    pub controls: Vec<MessageControl>,
    pub reply_to: Option<MessageRef>,
}

/// Recording chat transport.
#[derive(Default)]
pub struct RecordingMessaging {
    pub activities: Mutex<Vec<ActivityCue>>,
    pub texts: Mutex<Vec<String>>,
    pub voices: Mutex<Vec<SentVoice>>,
    pub deleted: Mutex<Vec<MessageRef>>,
    next_id: AtomicI64,
}

impl RecordingMessaging {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn voice_count(&self) -> usize {
        self.voices.lock().unwrap().len()
    }

    pub fn deleted_count(&self) -> usize {
        self.deleted.lock().unwrap().len()
    }

    /// Texts sent after the progress message(s), i.e. notices.
    pub fn notices(&self) -> Vec<String> {
        self.texts
            .lock()
            .unwrap()
            .iter()
            .filter(|t| !t.contains("in progress"))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl Messaging for RecordingMessaging {
    async fn send_activity(
        &self,
        _conversation: ConversationRef,
        cue: ActivityCue,
    ) -> Result<(), MessagingError> {
        self.activities.lock().unwrap().push(cue);
        Ok(())
    }

    async fn send_text(
        &self,
        conversation: ConversationRef,
        text: &str,
        _reply_to: Option<MessageRef>,
    ) -> Result<MessageRef, MessagingError> {
        self.texts.lock().unwrap().push(text.to_string());
        Ok(MessageRef {
            conversation,
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn send_voice(
        &self,
        conversation: ConversationRef,
        audio: &Path,
        caption: &str,
        controls: &[MessageControl],
        reply_to: Option<MessageRef>,
    ) -> Result<MessageRef, MessagingError> {
        self.voices.lock().unwrap().push(SentVoice {
            path: audio.to_path_buf(),
            caption: caption.to_string(),
            controls: controls.to_vec(),
            reply_to,
        });
        Ok(MessageRef {
            conversation,
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
        })
    }

    async fn delete(&self, message: MessageRef) -> Result<(), MessagingError> {
        self.deleted.lock().unwrap().push(message);
        Ok(())
    }
}

// ── Engines ────────────────────────────────────────────────────────

/// Synthesis fake that writes real files under the job prefix.
///
/// Jobs whose text equals `"fail"` error out; the per-call log records
/// texts in execution order; `in_flight`/`overlapped` expose the
/// serialization property.
#[derive(Default)]
pub struct FileWritingEngine {
    pub calls: Mutex<Vec<String>>,
    in_flight: AtomicBool,
    pub overlapped: AtomicBool,
    pub hold: Option<Duration>,
}

impl FileWritingEngine {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn slow(hold: Duration) -> Arc<Self> {
        Arc::new(Self {
            hold: Some(hold),
            ..Self::default()
        })
    }
}

impl SynthesisEngine for FileWritingEngine {
    fn synthesize(&self, request: &SynthesisRequest<'_>) -> Result<Vec<PathBuf>, SynthesisError> {
        if self.in_flight.swap(true, Ordering::SeqCst) {
            self.overlapped.store(true, Ordering::SeqCst);
        }
        self.calls.lock().unwrap().push(request.text.to_string());

        let result = if request.text == "fail" {
            Err(SynthesisError::Engine("model crashed".to_string()))
        } else {
            let paths: Vec<PathBuf> = (0..request.sample_count)
                .map(|i| {
                    let path = request.output.sample_path(i);
                    std::fs::write(&path, b"pcm").unwrap();
                    path
                })
                .collect();
            Ok(paths)
        };

        if let Some(hold) = self.hold {
            std::thread::sleep(hold);
        }
        self.in_flight.store(false, Ordering::SeqCst);
        result
    }
}

/// Transcriber returning queued texts, one per call.
pub struct QueuedTranscriber {
    pub texts: Mutex<VecDeque<String>>,
}

impl QueuedTranscriber {
    pub fn with(texts: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            texts: Mutex::new(texts.iter().map(ToString::to_string).collect()),
        })
    }
}

impl TranscriptionEngine for QueuedTranscriber {
    fn transcribe(&self, _samples: &[f32]) -> Result<String, TranscriptionError> {
        self.texts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TranscriptionError::Engine("no transcript queued".to_string()))
    }
}

/// Validator accepting everything.
pub struct AcceptAll;

impl TextValidator for AcceptAll {
    fn validate(&self, _text: &str) -> Result<(), TextRejection> {
        Ok(())
    }
}

/// Converter copying `x.wav` to `x.ogg` next to it.
pub struct OggConverter;

#[async_trait]
impl AudioFormatConverter for OggConverter {
    async fn convert(&self, path: &Path) -> Result<PathBuf, ConversionError> {
        let converted = path.with_extension("ogg");
        std::fs::copy(path, &converted).map_err(|e| ConversionError {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Ok(converted)
    }
}

/// Store returning one fixed settings value for every user.
pub struct FixedSettings(pub SynthesisSettings);

#[async_trait]
impl UserSettingsStore for FixedSettings {
    async fn get(&self, _requester: RequesterId) -> Result<SynthesisSettings, SettingsStoreError> {
        Ok(self.0.clone())
    }
}

/// Localizer always picking the fallback variant.
pub struct FallbackLocalizer;

impl Localizer for FallbackLocalizer {
    fn pick(&self, _requester: RequesterId, _localized: &str, fallback: &str) -> String {
        fallback.to_string()
    }
}

/// A request from user 1 in conversation 1.
pub fn request() -> murmur_core::IncomingRequest {
    let conversation = ConversationRef(1);
    murmur_core::IncomingRequest {
        requester: RequesterId(1),
        conversation,
        message: MessageRef {
            conversation,
            id: 1,
        },
    }
}
