pub mod model;
pub mod script;

pub use model::ModelBackedDetector;
pub use script::ScriptHeuristicDetector;

use serde::{Deserialize, Serialize};

use crate::LanguageCode;

/// Which path produced a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionSource {
    Heuristic,
    Model,
    Fallback,
}

/// Outcome of language detection for one request. Produced once per
/// request and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionResult {
    pub language: LanguageCode,
    /// Within [0.0, 1.0].
    pub confidence: f64,
    pub latency_ms: u64,
    pub source: DetectionSource,
}
