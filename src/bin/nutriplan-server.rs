// ABOUTME: Server binary: parses CLI flags, selects the LLM provider, serves the REST API.
// ABOUTME: Binds axum on the configured address with graceful ctrl-c shutdown.
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 NutriPlan Assistant

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use nutriplan_server::config::LlmConfig;
use nutriplan_server::llm::{select_provider, LlmProvider};
use nutriplan_server::routes::{router, AppState};
use nutriplan_server::services::ConversationOrchestrator;
use nutriplan_server::{logging, VERSION};

#[derive(Parser)]
#[command(
    name = "nutriplan-server",
    about = "Nutritional plan assistant REST server",
    version
)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8083)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_from_env()?;

    let args = Args::parse();
    info!("Starting nutriplan-server v{}", VERSION);

    let config = LlmConfig::from_env();
    let provider = select_provider(&config).context("LLM provider selection failed")?;
    info!("Serving with provider: {}", provider.name());

    let orchestrator = ConversationOrchestrator::new(Arc::new(provider));
    let app = router(AppState::new(orchestrator));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
