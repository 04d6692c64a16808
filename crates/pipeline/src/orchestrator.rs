use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::detect::{ModelBackedDetector, ScriptHeuristicDetector};
use crate::error::PipelineError;
use crate::events::{EventSink, PipelineEvent, Stage};
use crate::join::settle2;
use crate::metrics::MetricsRegistry;
use crate::model::LanguageModel;
use crate::preprocess::{self, Preprocessed};
use crate::reply::ReplyGenerator;
use crate::translate::{TieredTranslator, TranslationCache, TranslationResult, TranslationTier};
use crate::{ConversationContext, LanguageCode};

/// One incoming user turn.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub text: String,
    /// Explicit reply language; when absent the reply comes back in the
    /// user's own (preferred or detected) language.
    pub target_language: Option<LanguageCode>,
    pub context: ConversationContext,
}

/// Shared mutable pipeline state. Constructed once at process start and
/// injected, so its lifecycle is explicit and tests can build their own.
pub struct PipelineState {
    pub cache: Arc<TranslationCache>,
    pub metrics: Arc<MetricsRegistry>,
}

impl PipelineState {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            cache: Arc::new(TranslationCache::new(
                config.cache_capacity,
                Duration::from_secs(config.cache_ttl_secs),
            )),
            metrics: Arc::new(MetricsRegistry::new()),
        }
    }
}

/// Final payload of a pipeline run; also the body of the terminal event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineResponse {
    pub request_id: Uuid,
    pub original_text: String,
    /// The assistant reply, rendered in the target language.
    pub translated_text: String,
    pub detected_language: LanguageCode,
    pub target_language: LanguageCode,
    /// The weakest translation hop of the run; within [0.5, 1.0].
    pub confidence: f64,
    /// Model that produced the reply.
    pub model: String,
    pub performance: StagePerformance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StagePerformance {
    pub language_detection_ms: u64,
    pub translation_ms: u64,
    pub total_ms: u64,
}

/// Sequences a request through detection → (preprocessing ∥ forward
/// translation) → generation → back-translation, emitting one typed
/// event per stage.
///
/// Every stage failure is converted into a degraded-but-valid result;
/// nothing from a capability call escapes as an error. The one remaining
/// hazard, a panic inside the run itself, is caught at the task boundary
/// and still terminates the request with an error event.
pub struct PipelineOrchestrator {
    script_detector: ScriptHeuristicDetector,
    model_detector: ModelBackedDetector,
    translator: Arc<TieredTranslator>,
    reply: ReplyGenerator,
    preprocess_backend: Arc<dyn LanguageModel>,
    state: Arc<PipelineState>,
}

impl PipelineOrchestrator {
    pub fn new(
        primary: Arc<dyn LanguageModel>,
        fallback: Arc<dyn LanguageModel>,
        state: Arc<PipelineState>,
        config: PipelineConfig,
    ) -> Arc<Self> {
        let translator = Arc::new(TieredTranslator::new(
            primary.clone(),
            fallback,
            state.cache.clone(),
            &config,
        ));

        Arc::new(Self {
            script_detector: ScriptHeuristicDetector::new(config.detection_scan_chars),
            model_detector: ModelBackedDetector::new(primary.clone(), config.detection_excerpt_chars),
            translator,
            reply: ReplyGenerator::new(primary.clone()),
            preprocess_backend: primary,
            state,
        })
    }

    /// Runs one turn to completion. Never fails: a panicking run still
    /// terminates with an error event and a fallback payload.
    pub async fn process(self: &Arc<Self>, turn: ChatTurn, sink: EventSink) -> PipelineResponse {
        let this = Arc::clone(self);
        let task_turn = turn.clone();
        let task_sink = sink.clone();
        let handle = tokio::spawn(async move { this.run(task_turn, task_sink).await });

        match handle.await {
            Ok(response) => response,
            Err(e) => {
                let err = PipelineError::Branch(e.to_string());
                error!(error = %err, "Pipeline run aborted");
                let fallback = fallback_response(&turn);
                sink.emit(PipelineEvent::Error {
                    message: "pipeline aborted".to_string(),
                    fallback: fallback.clone(),
                });
                fallback
            }
        }
    }

    async fn run(&self, turn: ChatTurn, sink: EventSink) -> PipelineResponse {
        let request_id = Uuid::new_v4();
        let total_start = Instant::now();
        info!(%request_id, chars = turn.text.chars().count(), "Pipeline started");

        // Detection: heuristic first, model only when it has no opinion
        sink.status(Stage::Detecting);
        let detection = match self.script_detector.detect(&turn.text) {
            Some(detection) => detection,
            None => self.model_detector.detect(&turn.text).await,
        };
        sink.emit(PipelineEvent::LanguageDetected {
            detection: detection.clone(),
        });
        info!(
            %request_id,
            language = %detection.language,
            confidence = detection.confidence,
            source = ?detection.source,
            "Language detected"
        );

        let source = detection.language;
        let target = turn
            .target_language
            .or(turn.context.preferred_language)
            .unwrap_or(source);

        // Preprocessing and forward translation settle together; a failed
        // branch substitutes its default without sinking the other
        sink.status(Stage::Preprocessing);
        sink.status(Stage::Translating);
        let preprocess_backend = self.preprocess_backend.clone();
        let preprocess_text = turn.text.clone();
        let translator = self.translator.clone();
        let translate_text = turn.text.clone();
        let (analysis, forward) = settle2(
            preprocess::extract(preprocess_backend, preprocess_text),
            async move {
                Ok(translator
                    .translate(&translate_text, source, LanguageCode::PIVOT)
                    .await)
            },
        )
        .await;

        let analysis = analysis.unwrap_or_else(|e| {
            warn!(%request_id, error = %e, "Preprocessing degraded, using defaults");
            Preprocessed::default()
        });
        let forward = forward.unwrap_or_else(|e| {
            warn!(%request_id, error = %e, "Translation branch aborted, passing text through");
            TranslationResult {
                text: turn.text.clone(),
                confidence: 0.5,
                latency_ms: 0,
                tier: TranslationTier::Error,
            }
        });
        self.state.metrics.record_translation(forward.tier);
        sink.emit(PipelineEvent::TranslationChunk {
            text: forward.text.clone(),
            tier: forward.tier,
        });

        // Generation on the pivot-language text
        sink.status(Stage::Generating);
        let generated = self
            .reply
            .generate(&forward.text, &analysis, &turn.context)
            .await;

        // Reply back into the user's language
        sink.status(Stage::BackTranslating);
        let back = self
            .translator
            .translate(&generated.text, LanguageCode::PIVOT, target)
            .await;
        self.state.metrics.record_translation(back.tier);

        let total_ms = total_start.elapsed().as_millis() as u64;
        let response = PipelineResponse {
            request_id,
            original_text: turn.text,
            translated_text: back.text,
            detected_language: source,
            target_language: target,
            confidence: forward.confidence.min(back.confidence),
            model: generated.model,
            performance: StagePerformance {
                language_detection_ms: detection.latency_ms,
                translation_ms: forward.latency_ms + back.latency_ms,
                total_ms,
            },
        };
        self.state.metrics.record_request(total_ms);
        sink.emit(PipelineEvent::Final {
            result: response.clone(),
        });
        info!(%request_id, total_ms, forward_tier = ?forward.tier, "Pipeline completed");
        response
    }
}

/// Terminal payload when the run itself aborted: the original text stands
/// in for the translation and the pivot is assumed.
fn fallback_response(turn: &ChatTurn) -> PipelineResponse {
    PipelineResponse {
        request_id: Uuid::new_v4(),
        original_text: turn.text.clone(),
        translated_text: turn.text.clone(),
        detected_language: LanguageCode::PIVOT,
        target_language: turn.target_language.unwrap_or(LanguageCode::PIVOT),
        confidence: 0.5,
        model: "none".to_string(),
        performance: StagePerformance {
            language_detection_ms: 0,
            translation_ms: 0,
            total_ms: 0,
        },
    }
}
