pub mod config;
pub mod detect;
pub mod error;
pub mod events;
pub mod join;
pub mod metrics;
pub mod model;
pub mod orchestrator;
pub mod preprocess;
pub mod reply;
pub mod translate;

#[cfg(test)]
pub(crate) mod testing;

pub use config::PipelineConfig;
pub use detect::{DetectionResult, DetectionSource};
pub use error::PipelineError;
pub use events::{EventSink, PipelineEvent, Stage};
pub use metrics::{MetricsRegistry, MetricsSnapshot};
pub use model::LanguageModel;
pub use orchestrator::{
    ChatTurn, PipelineOrchestrator, PipelineResponse, PipelineState, StagePerformance,
};
pub use translate::{TieredTranslator, TranslationResult, TranslationTier};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Languages the assistant converses in. The pivot (`en`) is the common
/// intermediate every other pair is routed through for reply generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En,
    Hi,
    Ta,
    Te,
    Bn,
    Mr,
    Gu,
    Kn,
    Ml,
    Pa,
}

impl LanguageCode {
    pub const PIVOT: LanguageCode = LanguageCode::En;

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Hi => "hi",
            LanguageCode::Ta => "ta",
            LanguageCode::Te => "te",
            LanguageCode::Bn => "bn",
            LanguageCode::Mr => "mr",
            LanguageCode::Gu => "gu",
            LanguageCode::Kn => "kn",
            LanguageCode::Ml => "ml",
            LanguageCode::Pa => "pa",
        }
    }

    /// Strict parse of a supported code.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "en" => Some(LanguageCode::En),
            "hi" => Some(LanguageCode::Hi),
            "ta" => Some(LanguageCode::Ta),
            "te" => Some(LanguageCode::Te),
            "bn" => Some(LanguageCode::Bn),
            "mr" => Some(LanguageCode::Mr),
            "gu" => Some(LanguageCode::Gu),
            "kn" => Some(LanguageCode::Kn),
            "ml" => Some(LanguageCode::Ml),
            "pa" => Some(LanguageCode::Pa),
            _ => None,
        }
    }

    /// Lenient parse: unsupported or unrecognized input collapses to the pivot.
    pub fn parse_or_pivot(code: &str) -> Self {
        Self::parse(code).unwrap_or(Self::PIVOT)
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::PIVOT
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller-supplied conversational state threaded through a request.
/// Read-mostly; the pipeline never persists it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    #[serde(default)]
    pub recent_moods: Vec<String>,
    #[serde(default)]
    pub recent_topics: Vec<String>,
    #[serde(default)]
    pub preferred_language: Option<LanguageCode>,
}
