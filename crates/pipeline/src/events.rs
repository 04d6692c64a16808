use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

use crate::detect::DetectionResult;
use crate::error::PipelineError;
use crate::orchestrator::PipelineResponse;
use crate::translate::TranslationTier;

/// Pipeline stages, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Detecting,
    Preprocessing,
    Translating,
    Generating,
    BackTranslating,
}

/// Typed progress notification for one request.
///
/// Events within a request are totally ordered in pipeline order; each
/// request owns its own channel, so streams never interleave.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    Status {
        stage: Stage,
    },
    LanguageDetected {
        #[serde(flatten)]
        detection: DetectionResult,
    },
    TranslationChunk {
        text: String,
        tier: TranslationTier,
    },
    #[serde(rename = "final")]
    Final {
        #[serde(flatten)]
        result: PipelineResponse,
    },
    Error {
        message: String,
        #[serde(flatten)]
        fallback: PipelineResponse,
    },
}

/// Write side of a request's event stream, handed to the orchestrator
/// once per request.
///
/// `disabled()` gives batch callers a sink that drops everything. A send
/// failure means the consumer went away; the pipeline logs it and keeps
/// going so the request still finishes.
#[derive(Clone)]
pub struct EventSink {
    tx: Option<mpsc::UnboundedSender<PipelineEvent>>,
}

impl EventSink {
    pub fn new(tx: mpsc::UnboundedSender<PipelineEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn disabled() -> Self {
        Self { tx: None }
    }

    pub fn channel() -> (Self, mpsc::UnboundedReceiver<PipelineEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    pub fn emit(&self, event: PipelineEvent) {
        if let Some(tx) = &self.tx {
            if tx.send(event).is_err() {
                debug!(error = %PipelineError::StreamAborted, "Event receiver dropped");
            }
        }
    }

    pub fn status(&self, stage: Stage) {
        self.emit(PipelineEvent::Status { stage });
    }
}
