use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::model::LanguageModel;

/// Intent and emotional read of a user turn, extracted in parallel with
/// forward translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preprocessed {
    pub intent: String,
    pub emotion: String,
    pub urgency: String,
}

impl Default for Preprocessed {
    /// Safe substitute when extraction fails: a low-urgency casual turn.
    fn default() -> Self {
        Self {
            intent: "casual_chat".to_string(),
            emotion: "neutral".to_string(),
            urgency: "low".to_string(),
        }
    }
}

pub(crate) const CLASSIFY_PROMPT_PREFIX: &str = "Classify this mental-wellness message.";

/// Asks the capability for a compact JSON read of the turn. Failure here
/// never blocks the pipeline; callers substitute `Preprocessed::default()`.
pub async fn extract(
    backend: Arc<dyn LanguageModel>,
    text: String,
) -> Result<Preprocessed, PipelineError> {
    let prompt = format!(
        "{CLASSIFY_PROMPT_PREFIX} Return only JSON with string fields \
         \"intent\" (casual_chat, seeking_support, crisis, gratitude, question), \
         \"emotion\" (neutral, happy, sad, anxious, angry) and \
         \"urgency\" (low, medium, high).\n\n{text}"
    );

    let raw = backend
        .generate_reply(&prompt)
        .await
        .map_err(|e| PipelineError::Preprocess(e.to_string()))?;

    Ok(parse_extraction(&raw))
}

/// Models wrap JSON in prose or fences often enough that we scan for the
/// first object and fill any gaps from the defaults.
fn parse_extraction(raw: &str) -> Preprocessed {
    let defaults = Preprocessed::default();
    let Some(json) = first_json_object(raw) else {
        return defaults;
    };
    Preprocessed {
        intent: json["intent"]
            .as_str()
            .unwrap_or(&defaults.intent)
            .to_string(),
        emotion: json["emotion"]
            .as_str()
            .unwrap_or(&defaults.emotion)
            .to_string(),
        urgency: json["urgency"]
            .as_str()
            .unwrap_or(&defaults.urgency)
            .to_string(),
    }
}

fn first_json_object(raw: &str) -> Option<serde_json::Value> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    serde_json::from_str(raw.get(start..=end)?).ok()
}
