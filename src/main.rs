use anyhow::Result;
use speechcoach::{
    AppState, Config, DeepgramClient, GeminiClient, PostgresStore, S3MediaStore, SessionCompletion,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = Config::load("config/speechcoach")?;

    info!("{} starting", cfg.service.name);

    let store = Arc::new(PostgresStore::connect(&cfg.postgres).await?);
    let media = Arc::new(S3MediaStore::new(&cfg.object_store));

    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.pipeline.request_timeout_secs))
        .connect_timeout(Duration::from_secs(5))
        .build()?;

    let transcriber = Arc::new(DeepgramClient::new(http_client.clone(), cfg.deepgram.clone()));
    let analyzer = Arc::new(GeminiClient::new(http_client, cfg.gemini.clone()));

    let completion = Arc::new(SessionCompletion::new(
        store,
        media,
        transcriber,
        analyzer,
        cfg.pipeline.max_concurrent_transcriptions,
    ));

    let app = speechcoach::create_router(AppState::new(completion));

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("server stopped");

    Ok(())
}

/// Resolve on ctrl-c or SIGTERM so in-flight completions can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}
