use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::LanguageCode;

use super::{LanguageModel, detection_prompt, translation_prompt};

/// Local ollama-style backend: the fast, cheap tier the pipeline tries
/// first for detection, translation, and reply generation.
pub struct OllamaBackend {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

impl OllamaBackend {
    pub fn new(endpoint: String, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            max_tokens,
        }
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let response = self
            .client
            .post(format!("{}/api/generate", self.endpoint))
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
                options: GenerateOptions {
                    num_predict: self.max_tokens,
                },
            })
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        Ok(extract_text(&body))
    }
}

/// Local servers answer in more than one shape depending on version and
/// route: `{"response": ...}` from /api/generate, `{"message":
/// {"content": ...}}` from chat-style proxies, or occasionally a bare
/// string. Take whichever parses, then fall back to the raw body.
fn extract_text(body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        if let Some(text) = json["response"].as_str() {
            return text.to_string();
        }
        if let Some(text) = json["message"]["content"].as_str() {
            return text.to_string();
        }
        if let Some(text) = json.as_str() {
            return text.to_string();
        }
    }
    body.to_string()
}

#[async_trait]
impl LanguageModel for OllamaBackend {
    async fn detect_language(&self, text: &str) -> anyhow::Result<String> {
        self.complete(&detection_prompt(text)).await
    }

    async fn translate(
        &self,
        text: &str,
        source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<String> {
        let translated = self.complete(&translation_prompt(text, source, target)).await?;
        Ok(translated.trim().to_string())
    }

    async fn generate_reply(&self, prompt: &str) -> anyhow::Result<String> {
        self.complete(prompt).await
    }

    fn name(&self) -> &str {
        &self.model
    }
}
