pub mod claude;
pub mod ollama;

pub use claude::ClaudeBackend;
pub use ollama::OllamaBackend;

use async_trait::async_trait;

use crate::LanguageCode;

/// Trait for pluggable language-model capabilities.
///
/// The pipeline depends on exactly these three calls; which provider
/// answers them (a fast local-style server or a cloud API) is fixed at
/// startup, so call sites never branch on backend identity.
#[async_trait]
pub trait LanguageModel: Send + Sync + 'static {
    /// Names the language of `text` as a bare ISO 639-1 code.
    async fn detect_language(&self, text: &str) -> anyhow::Result<String>;

    /// Translates `text` between two supported languages.
    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<String>;

    /// Generates an assistant reply for an already-assembled prompt.
    async fn generate_reply(&self, prompt: &str) -> anyhow::Result<String>;

    /// Human-readable backend name, reported in responses and logs.
    fn name(&self) -> &str;
}

/// Shared prompt for translation calls. Tone and terminology preservation
/// matters more here than literal fidelity: a flattened rendering of a
/// distress message changes what the reply generator sees.
pub(crate) fn translation_prompt(
    text: &str,
    source: LanguageCode,
    target: LanguageCode,
) -> String {
    format!(
        "Translate the following {source} text to {target} for a mental-wellness \
         conversation. Preserve the emotional tone and any mental-health terminology. \
         Reply with only the translation.\n\n{text}"
    )
}

pub(crate) fn detection_prompt(excerpt: &str) -> String {
    format!(
        "Identify the language of the following text. Answer with a single ISO 639-1 \
         code from: en, hi, ta, te, bn, mr, gu, kn, ml, pa.\n\n{excerpt}"
    )
}
