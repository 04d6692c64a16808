use std::sync::Arc;

use tracing::warn;

use crate::ConversationContext;
use crate::error::PipelineError;
use crate::model::LanguageModel;
use crate::preprocess::Preprocessed;

/// Shown whenever reply generation is unreachable. It always carries
/// crisis contacts so a failing model never leaves a user in distress
/// without a human option.
pub const SAFE_FALLBACK_REPLY: &str =
    "I'm here with you, and I'm sorry I'm having trouble responding right now. \
     If you are in distress or thinking about harming yourself, please call the \
     Tele-MANAS helpline at 14416 or the KIRAN helpline at 1800-599-0019 right \
     away. You don't have to go through this alone.";

/// Name reported when the static fallback stood in for the model.
pub const FALLBACK_MODEL_NAME: &str = "static-fallback";

#[derive(Debug, Clone)]
pub struct GeneratedReply {
    pub text: String,
    /// The model that produced the text.
    pub model: String,
}

/// Wraps the reply-generation capability with prompt assembly and the
/// degrade-to-safety path.
pub struct ReplyGenerator {
    backend: Arc<dyn LanguageModel>,
}

impl ReplyGenerator {
    pub fn new(backend: Arc<dyn LanguageModel>) -> Self {
        Self { backend }
    }

    /// Generates a supportive reply in the pivot language. Never fails:
    /// the worst outcome is the fixed safety message.
    pub async fn generate(
        &self,
        pivot_text: &str,
        analysis: &Preprocessed,
        context: &ConversationContext,
    ) -> GeneratedReply {
        let prompt = build_prompt(pivot_text, analysis, context);

        match self.backend.generate_reply(&prompt).await {
            Ok(text) if !text.trim().is_empty() => GeneratedReply {
                text: text.trim().to_string(),
                model: self.backend.name().to_string(),
            },
            Ok(_) => {
                let err = PipelineError::Generation("empty reply".to_string());
                warn!(error = %err, "Generation returned nothing, using safe fallback");
                Self::fallback_reply()
            }
            Err(e) => {
                let err = PipelineError::Generation(e.to_string());
                warn!(error = %err, "Generation failed, using safe fallback");
                Self::fallback_reply()
            }
        }
    }

    fn fallback_reply() -> GeneratedReply {
        GeneratedReply {
            text: SAFE_FALLBACK_REPLY.to_string(),
            model: FALLBACK_MODEL_NAME.to_string(),
        }
    }
}

fn build_prompt(
    pivot_text: &str,
    analysis: &Preprocessed,
    context: &ConversationContext,
) -> String {
    let mut prompt = String::from(
        "You are a warm, supportive mental-wellness companion. Respond with \
         empathy in two to four sentences. Do not diagnose. If the user may be \
         in crisis, gently include the Tele-MANAS helpline 14416.\n",
    );
    if !context.recent_moods.is_empty() {
        prompt.push_str(&format!("Recent moods: {}.\n", context.recent_moods.join(", ")));
    }
    if !context.recent_topics.is_empty() {
        prompt.push_str(&format!(
            "Recent topics: {}.\n",
            context.recent_topics.join(", ")
        ));
    }
    prompt.push_str(&format!(
        "Detected intent: {}, emotion: {}, urgency: {}.\n\nUser: {}",
        analysis.intent, analysis.emotion, analysis.urgency, pivot_text
    ));
    prompt
}
