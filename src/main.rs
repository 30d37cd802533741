use anyhow::Context;
use scroll_feed::app;
use scroll_feed::config::AppConfig;
use scroll_feed::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Log initialized");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(
        "Fetch delay {:?}, rng seed {:?}",
        config.fetch_delay,
        config.rng_seed
    );

    let app_state = AppState::new(&config);
    app_state.paginator.sync_anchor().await;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Feed server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let router = app(app_state);
    axum::serve(listener, router).await?;

    Ok(())
}
