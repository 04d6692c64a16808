use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub app: AppSettings,
    pub models: ModelSettings,
    pub pipeline: PipelineSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
}

/// The two model capabilities the pipeline escalates across: a fast
/// local-style primary and a higher-capacity cloud fallback.
#[derive(Debug, Deserialize, Clone)]
pub struct ModelSettings {
    pub primary: ModelBackendSettings,
    pub fallback: ModelBackendSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelBackendSettings {
    /// Backend provider: "ollama" or "claude".
    pub provider: String,
    pub model: String,
    /// HTTP endpoint (ollama-style backends only).
    pub endpoint: Option<String>,
    /// API key (cloud backends only).
    pub api_key: Option<String>,
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PipelineSettings {
    /// Max entries before FIFO eviction kicks in.
    pub cache_capacity: usize,
    /// Entry lifetime in seconds; expired entries miss on read.
    pub cache_ttl_secs: u64,
    /// How many leading chars of the input participate in the cache key.
    pub cache_key_prefix_chars: usize,
    /// How many leading chars the script heuristic scans.
    pub detection_scan_chars: usize,
    /// Excerpt length sent to the model-backed detector.
    pub detection_excerpt_chars: usize,
    /// Primary-tier confidence gate; below this the fallback model runs.
    pub primary_accept_threshold: f64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("MANAS"),
            )
            .set_default("app.host", "0.0.0.0")?
            .set_default("app.port", 3000)?
            .set_default("app.cors_origins", Vec::<String>::new())?
            .set_default("models.primary.provider", "ollama")?
            .set_default("models.primary.model", "gemma2:9b")?
            .set_default("models.primary.endpoint", "http://localhost:11434")?
            .set_default("models.primary.api_key", None::<String>)?
            .set_default("models.primary.max_tokens", 512)?
            .set_default("models.fallback.provider", "claude")?
            .set_default("models.fallback.model", "claude-sonnet-4-5-20250929")?
            .set_default("models.fallback.endpoint", None::<String>)?
            .set_default("models.fallback.api_key", None::<String>)?
            .set_default("models.fallback.max_tokens", 1024)?
            .set_default("pipeline.cache_capacity", 1000)?
            .set_default("pipeline.cache_ttl_secs", 3600)?
            .set_default("pipeline.cache_key_prefix_chars", 120)?
            .set_default("pipeline.detection_scan_chars", 64)?
            .set_default("pipeline.detection_excerpt_chars", 200)?
            .set_default("pipeline.primary_accept_threshold", 0.85)?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::load().expect("Failed to load default settings")
    }
}
