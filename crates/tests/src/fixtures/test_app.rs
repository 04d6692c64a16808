use std::net::SocketAddr;
use std::sync::Arc;

use manas_api::{build_router, state::AppState};
use manas_config::{
    AppSettings, ModelBackendSettings, ModelSettings, PipelineSettings, Settings,
};
use manas_pipeline::model::LanguageModel;
use tokio::net::TcpListener;

/// A running test server with injected model capabilities.
pub struct TestApp {
    pub addr: SocketAddr,
    pub base_url: String,
    pub client: reqwest::Client,
    pub state: AppState,
}

impl TestApp {
    /// Spawn a server on an ephemeral port around the given backends.
    pub async fn spawn(
        primary: Arc<dyn LanguageModel>,
        fallback: Arc<dyn LanguageModel>,
    ) -> Self {
        let settings = test_settings();
        let state = AppState::with_backends(settings, primary, fallback);
        let app = build_router(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let base_url = format!("http://{}", addr);
        let client = reqwest::Client::new();

        Self {
            addr,
            base_url,
            client,
            state,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn chat(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/chat"))
            .json(body)
            .send()
            .await
            .expect("chat request failed")
    }
}

/// Deterministic settings: no files, no env, tiny cache bounds.
fn test_settings() -> Settings {
    Settings {
        app: AppSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec![],
        },
        models: ModelSettings {
            primary: backend_settings("mock-primary"),
            fallback: backend_settings("mock-fallback"),
        },
        pipeline: PipelineSettings {
            cache_capacity: 100,
            cache_ttl_secs: 60,
            cache_key_prefix_chars: 120,
            detection_scan_chars: 64,
            detection_excerpt_chars: 200,
            primary_accept_threshold: 0.85,
        },
    }
}

fn backend_settings(model: &str) -> ModelBackendSettings {
    ModelBackendSettings {
        provider: "mock".to_string(),
        model: model.to_string(),
        endpoint: None,
        api_key: None,
        max_tokens: 256,
    }
}
