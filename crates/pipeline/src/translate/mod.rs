pub mod cache;
pub mod scorer;

pub use cache::{CacheKey, TranslationCache};

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::LanguageCode;
use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::model::LanguageModel;

/// Which attempt produced a translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationTier {
    Primary,
    Fallback,
    Cache,
    Passthrough,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    /// Always within [0.5, 1.0].
    pub confidence: f64,
    pub latency_ms: u64,
    pub tier: TranslationTier,
}

/// The fallback model's output is trusted without scoring; it is the
/// stronger model and there is no further tier to escalate to.
const FALLBACK_CONFIDENCE: f64 = 0.95;
const EXHAUSTED_CONFIDENCE: f64 = 0.5;

/// Escalating translator: passthrough → cache → primary model
/// (confidence-gated) → fallback model → untranslated passthrough.
///
/// Only primary-tier output is cached, so a cache hit is always
/// primary-quality; fallback output never poisons the cache.
pub struct TieredTranslator {
    primary: Arc<dyn LanguageModel>,
    fallback: Arc<dyn LanguageModel>,
    cache: Arc<TranslationCache>,
    accept_threshold: f64,
    key_prefix_chars: usize,
}

impl TieredTranslator {
    pub fn new(
        primary: Arc<dyn LanguageModel>,
        fallback: Arc<dyn LanguageModel>,
        cache: Arc<TranslationCache>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            primary,
            fallback,
            cache,
            accept_threshold: config.primary_accept_threshold,
            key_prefix_chars: config.cache_key_prefix_chars,
        }
    }

    /// Never fails; the worst outcome is the original text at 0.5.
    pub async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> TranslationResult {
        let start = Instant::now();

        if source == target {
            return TranslationResult {
                text: text.to_string(),
                confidence: 1.0,
                latency_ms: 0,
                tier: TranslationTier::Passthrough,
            };
        }

        let key = CacheKey::new(source, target, text, self.key_prefix_chars);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%source, %target, "Translation cache hit");
            return TranslationResult {
                text: cached,
                confidence: 1.0,
                latency_ms: start.elapsed().as_millis() as u64,
                tier: TranslationTier::Cache,
            };
        }

        match self.primary_attempt(text, source, target).await {
            Ok((translated, confidence)) => {
                self.cache.set(key, translated.clone());
                return TranslationResult {
                    text: translated,
                    confidence,
                    latency_ms: start.elapsed().as_millis() as u64,
                    tier: TranslationTier::Primary,
                };
            }
            Err(e) => {
                warn!(%source, %target, error = %e, "Primary tier rejected, escalating");
            }
        }

        match self.fallback.translate(text, source, target).await {
            Ok(translated) => TranslationResult {
                text: translated.trim().to_string(),
                confidence: FALLBACK_CONFIDENCE,
                latency_ms: start.elapsed().as_millis() as u64,
                tier: TranslationTier::Fallback,
            },
            Err(e) => {
                let err = PipelineError::TranslationExhausted(e.to_string());
                warn!(%source, %target, error = %err, "All tiers failed, passing text through");
                TranslationResult {
                    text: text.to_string(),
                    confidence: EXHAUSTED_CONFIDENCE,
                    latency_ms: start.elapsed().as_millis() as u64,
                    tier: TranslationTier::Error,
                }
            }
        }
    }

    /// Primary tier: one model call plus the confidence gate. `Err`
    /// means escalate, whatever the cause.
    async fn primary_attempt(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> Result<(String, f64), PipelineError> {
        let candidate = self
            .primary
            .translate(text, source, target)
            .await
            .map_err(|e| PipelineError::TranslationDegraded(e.to_string()))?;

        let candidate = candidate.trim();
        if candidate.is_empty() {
            return Err(PipelineError::TranslationDegraded("empty output".to_string()));
        }

        let confidence = scorer::score(text, candidate, source, target);
        if confidence < self.accept_threshold {
            return Err(PipelineError::TranslationDegraded(format!(
                "confidence {confidence:.2} below gate {:.2}",
                self.accept_threshold
            )));
        }

        Ok((candidate.to_string(), confidence))
    }
}
