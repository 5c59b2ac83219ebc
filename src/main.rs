use std::sync::Arc;

use tracing::info;

use stacksmith::config::Config;
use stacksmith::patterns::load_patterns;
use stacksmith::server::{app, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();

    let patterns = load_patterns(&config.patterns_path).expect("Failed to load pattern catalog");
    info!("Loaded {} Clarity patterns", patterns.len());

    let state = Arc::new(AppState {
        classifier: config.classifier.build(),
        patterns,
        analysis_delay: config.analysis_delay,
    });

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app(state)).await.expect("Server failed");
}
