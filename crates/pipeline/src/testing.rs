//! Scriptable in-process capability for unit tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::LanguageCode;
use crate::model::LanguageModel;
use crate::preprocess::CLASSIFY_PROMPT_PREFIX;

#[derive(Debug, Clone, Default)]
enum Behavior {
    #[default]
    Fixed,
    Respond(String),
    Echo,
    Fail,
    Panic,
}

/// A `LanguageModel` whose three capabilities are scripted per test.
/// Builder methods override the defaults (which all succeed with bland
/// canned answers).
#[derive(Default)]
pub(crate) struct StubModel {
    detect: Behavior,
    translate: Behavior,
    reply: Behavior,
    fail_classification_only: bool,
    pub translate_calls: AtomicUsize,
    pub reply_calls: AtomicUsize,
}

impl StubModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn detect_with(mut self, response: &str) -> Self {
        self.detect = Behavior::Respond(response.to_string());
        self
    }

    pub fn fail_detect(mut self) -> Self {
        self.detect = Behavior::Fail;
        self
    }

    pub fn panic_detect(mut self) -> Self {
        self.detect = Behavior::Panic;
        self
    }

    pub fn translate_with(mut self, response: &str) -> Self {
        self.translate = Behavior::Respond(response.to_string());
        self
    }

    pub fn echo_translate(mut self) -> Self {
        self.translate = Behavior::Echo;
        self
    }

    pub fn fail_translate(mut self) -> Self {
        self.translate = Behavior::Fail;
        self
    }

    pub fn reply_with(mut self, response: &str) -> Self {
        self.reply = Behavior::Respond(response.to_string());
        self
    }

    pub fn fail_reply(mut self) -> Self {
        self.reply = Behavior::Fail;
        self
    }

    /// Fails classification prompts only; ordinary reply prompts succeed.
    pub fn fail_classification(mut self) -> Self {
        self.fail_classification_only = true;
        self
    }

    pub fn everything_down() -> Self {
        Self::new().fail_detect().fail_translate().fail_reply()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn detect_language(&self, _text: &str) -> anyhow::Result<String> {
        match &self.detect {
            Behavior::Fixed => Ok("en".to_string()),
            Behavior::Respond(s) => Ok(s.clone()),
            Behavior::Echo => Ok("en".to_string()),
            Behavior::Fail => anyhow::bail!("stub detection unreachable"),
            Behavior::Panic => panic!("stub detection panicked"),
        }
    }

    async fn translate(
        &self,
        text: &str,
        _source: LanguageCode,
        target: LanguageCode,
    ) -> anyhow::Result<String> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        match &self.translate {
            Behavior::Fixed => Ok(format!("[{target}] {text}")),
            Behavior::Respond(s) => Ok(s.clone()),
            Behavior::Echo => Ok(text.to_string()),
            Behavior::Fail => anyhow::bail!("stub translation unreachable"),
            Behavior::Panic => panic!("stub translation panicked"),
        }
    }

    async fn generate_reply(&self, prompt: &str) -> anyhow::Result<String> {
        self.reply_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_classification_only && prompt.starts_with(CLASSIFY_PROMPT_PREFIX) {
            anyhow::bail!("stub classification unreachable");
        }
        match &self.reply {
            Behavior::Fixed => Ok("I'm here with you.".to_string()),
            Behavior::Respond(s) => Ok(s.clone()),
            Behavior::Echo => Ok(prompt.to_string()),
            Behavior::Fail => anyhow::bail!("stub generation unreachable"),
            Behavior::Panic => panic!("stub generation panicked"),
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}
