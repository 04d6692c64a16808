use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use manas_pipeline::LanguageCode;
use manas_pipeline::model::LanguageModel;

#[derive(Debug, Clone, Copy)]
enum TranslateMode {
    /// `"[<target>] <text>"`, so assertions can see which hop produced it.
    Tagged,
    /// Returns the input unchanged, tripping the scorer's no-op penalty.
    Echo,
    Fail,
}

/// Programmable capability stand-in for black-box tests: each call either
/// answers with canned output or errors, and counts invocations.
pub struct MockModel {
    name: String,
    detect_response: Option<String>,
    translate_mode: TranslateMode,
    reply_response: Option<String>,
    pub translate_calls: AtomicUsize,
    pub reply_calls: AtomicUsize,
}

impl MockModel {
    /// Everything answers: detection says `en`, translation tags its
    /// output, replies are a fixed supportive line.
    pub fn healthy(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            detect_response: Some("en".to_string()),
            translate_mode: TranslateMode::Tagged,
            reply_response: Some("I hear you, and I'm here for you.".to_string()),
            translate_calls: AtomicUsize::new(0),
            reply_calls: AtomicUsize::new(0),
        })
    }

    /// Every capability errors, as if the provider is down.
    pub fn unreachable(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            detect_response: None,
            translate_mode: TranslateMode::Fail,
            reply_response: None,
            translate_calls: AtomicUsize::new(0),
            reply_calls: AtomicUsize::new(0),
        })
    }

    /// Healthy except translation echoes its input, which fails the
    /// confidence gate and forces tier escalation.
    pub fn echoing(name: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            detect_response: Some("en".to_string()),
            translate_mode: TranslateMode::Echo,
            reply_response: Some("I hear you, and I'm here for you.".to_string()),
            translate_calls: AtomicUsize::new(0),
            reply_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn detect_language(&self, _text: &str) -> anyhow::Result<String> {
        self.detect_response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock detection unreachable"))
    }

    async fn translate(
        &self,
        text: &str,
        _source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<String> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        match self.translate_mode {
            TranslateMode::Tagged => Ok(format!("[{target}] {text}")),
            TranslateMode::Echo => Ok(text.to_string()),
            TranslateMode::Fail => anyhow::bail!("mock translation unreachable"),
        }
    }

    async fn generate_reply(&self, _prompt: &str) -> anyhow::Result<String> {
        self.reply_calls.fetch_add(1, Ordering::SeqCst);
        self.reply_response
            .clone()
            .ok_or_else(|| anyhow::anyhow!("mock generation unreachable"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
