use manas_api::{build_router, state::AppState};
use manas_config::Settings;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "manas_api=debug,manas_pipeline=debug,tower_http=debug".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load config
    let settings = Settings::load()?;
    info!("Starting Manas API on {}:{}", settings.app.host, settings.app.port);
    info!(
        primary = %settings.models.primary.provider,
        primary_model = %settings.models.primary.model,
        fallback = %settings.models.fallback.provider,
        fallback_model = %settings.models.fallback.model,
        "Model backends"
    );

    // Build app state (constructs the pipeline singletons)
    let app_state = AppState::new(settings.clone());

    // Build router
    let app = build_router(app_state);

    // Start server
    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
