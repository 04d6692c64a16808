use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::LanguageCode;

use super::{LanguageModel, detection_prompt, translation_prompt};

/// Cloud backend over the Anthropic messages API: the higher-capacity
/// fallback tier the pipeline escalates to on low confidence.
pub struct ClaudeBackend {
    client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<ClaudeMessage>,
}

#[derive(Debug, Serialize)]
struct ClaudeMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: Option<String>,
}

impl ClaudeBackend {
    pub fn new(api_key: Option<String>, model: String, max_tokens: u32) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            max_tokens,
        }
    }

    async fn complete(&self, prompt: &str) -> anyhow::Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Claude API key not configured"))?;

        let request = ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Claude API error {}: {}", status, body);
        }

        let body = response.text().await?;

        // Nested content blocks normally; a raw body when fronted by a proxy
        match serde_json::from_str::<ClaudeResponse>(&body) {
            Ok(parsed) => Ok(parsed
                .content
                .into_iter()
                .find_map(|block| block.text)
                .unwrap_or(body)),
            Err(_) => Ok(body),
        }
    }
}

#[async_trait]
impl LanguageModel for ClaudeBackend {
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
