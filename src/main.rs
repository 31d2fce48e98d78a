use std::net::SocketAddr;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use triage_bot::config::Configuration;
use triage_bot::github::OctocrabClient;
use triage_bot::router::Router;
use triage_bot::server::{AppState, build_router};
use triage_bot::webhooks::WebhookSecret;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8888";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "triage_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let token = std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN must be set")?;
    let secret = std::env::var("TRIAGE_BOT_WEBHOOK_SECRET")
        .context("TRIAGE_BOT_WEBHOOK_SECRET must be set")?;
    let config_path =
        std::env::var("TRIAGE_BOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let listen = std::env::var("TRIAGE_BOT_LISTEN")
        .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
    let addr: SocketAddr = listen
        .parse()
        .with_context(|| format!("invalid listen address {listen}"))?;

    let config = Configuration::load(&config_path)
        .with_context(|| format!("failed to load configuration from {config_path}"))?;
    tracing::info!(
        path = %config_path,
        items = config.config_items.len(),
        "loaded configuration"
    );

    let client = OctocrabClient::from_token(token).context("failed to build GitHub client")?;
    let router = Router::connect(client, config)
        .await
        .context("failed to resolve bot identity")?;

    let app = build_router(AppState::new(router, WebhookSecret::new(secret)));

    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
