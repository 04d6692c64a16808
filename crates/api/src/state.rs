use std::sync::Arc;

use manas_config::{ModelBackendSettings, PipelineSettings, Settings};
use manas_pipeline::model::{ClaudeBackend, OllamaBackend};
use manas_pipeline::{LanguageModel, PipelineConfig, PipelineOrchestrator, PipelineState};
use tracing::warn;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub pipeline: Arc<PipelineState>,
    pub orchestrator: Arc<PipelineOrchestrator>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let primary = build_backend(&settings.models.primary);
        let fallback = build_backend(&settings.models.fallback);
        Self::with_backends(settings, primary, fallback)
    }

    /// Builds state around explicit capabilities; tests inject mocks here.
    pub fn with_backends(
        settings: Settings,
        primary: Arc<dyn LanguageModel>,
        fallback: Arc<dyn LanguageModel>,
    ) -> Self {
        let config = pipeline_config(&settings.pipeline);
        let pipeline = Arc::new(PipelineState::new(&config));
        let orchestrator = PipelineOrchestrator::new(primary, fallback, pipeline.clone(), config);

        Self {
            settings,
            pipeline,
            orchestrator,
        }
    }
}

/// Providers are fixed here, once, at startup; nothing downstream
/// branches on backend identity again.
fn build_backend(settings: &ModelBackendSettings) -> Arc<dyn LanguageModel> {
    match settings.provider.as_str() {
        "claude" => Arc::new(ClaudeBackend::new(
            settings.api_key.clone(),
            settings.model.clone(),
            settings.max_tokens,
        )),
        "ollama" => Arc::new(ollama_backend(settings)),
        other => {
            warn!(provider = %other, "Unknown model provider, using ollama");
            Arc::new(ollama_backend(settings))
        }
    }
}

fn ollama_backend(settings: &ModelBackendSettings) -> OllamaBackend {
    let endpoint = settings
        .endpoint
        .clone()
        .unwrap_or_else(|| "http://localhost:11434".to_string());
    OllamaBackend::new(endpoint, settings.model.clone(), settings.max_tokens)
}

fn pipeline_config(settings: &PipelineSettings) -> PipelineConfig {
    PipelineConfig {
        cache_capacity: settings.cache_capacity,
        cache_ttl_secs: settings.cache_ttl_secs,
        cache_key_prefix_chars: settings.cache_key_prefix_chars,
        detection_scan_chars: settings.detection_scan_chars,
        detection_excerpt_chars: settings.detection_excerpt_chars,
        primary_accept_threshold: settings.primary_accept_threshold,
    }
}
