use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use jobscout::api::{AppState, create_router};
use jobscout::config::Config;

#[derive(Debug, Parser)]
#[command(name = "jobscout", about = "Ask questions about web pages through an LLM")]
struct Args {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "PORT", default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to build application state")?;
    tracing::info!(model = %state.llm.model(), "completion client ready");

    let app = create_router(Arc::new(state));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
