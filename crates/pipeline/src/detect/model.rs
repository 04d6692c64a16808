use std::sync::Arc;
use std::time::Instant;

use tracing::warn;

use crate::LanguageCode;
use crate::error::PipelineError;
use crate::model::LanguageModel;

use super::{DetectionResult, DetectionSource};

/// Model-backed detection for text the script heuristic has no opinion on
/// (Latin-script input, romanized Indic, mixed content).
pub struct ModelBackedDetector {
    backend: Arc<dyn LanguageModel>,
    excerpt_chars: usize,
}

impl ModelBackedDetector {
    pub fn new(backend: Arc<dyn LanguageModel>, excerpt_chars: usize) -> Self {
        Self {
            backend,
            excerpt_chars,
        }
    }

    /// Never fails: a capability error degrades to the pivot at 0.5.
    pub async fn detect(&self, text: &str) -> DetectionResult {
        let start = Instant::now();
        let excerpt: String = text.chars().take(self.excerpt_chars).collect();

        match self.backend.detect_language(&excerpt).await {
            Ok(raw) => {
                let latency_ms = start.elapsed().as_millis() as u64;
                let trimmed = raw.trim().to_ascii_lowercase();

                if let Some(language) = LanguageCode::parse(&trimmed) {
                    // The model answered with a bare code, as asked
                    return DetectionResult {
                        language,
                        confidence: 0.9,
                        latency_ms,
                        source: DetectionSource::Model,
                    };
                }

                // Dig the first recognized code token out of a chatty answer
                let language = first_code_token(&trimmed).unwrap_or(LanguageCode::PIVOT);
                DetectionResult {
                    language,
                    confidence: 0.7,
                    latency_ms,
                    source: DetectionSource::Model,
                }
            }
            Err(e) => {
                let err = PipelineError::Detection(e.to_string());
                warn!(error = %err, "Detection capability failed, assuming pivot");
                DetectionResult {
                    language: LanguageCode::PIVOT,
                    confidence: 0.5,
                    latency_ms: start.elapsed().as_millis() as u64,
                    source: DetectionSource::Fallback,
                }
            }
        }
    }
}

fn first_code_token(response: &str) -> Option<LanguageCode> {
    response
        .split(|c: char| !c.is_ascii_alphabetic())
        .find_map(LanguageCode::parse)
}
