use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use reqwest::Client;
use tracing::info;

use mediawiki_agent::api::WikiClient;
use mediawiki_agent::config::loader::load_config;
use mediawiki_agent::server::{self, AppState};
use mediawiki_agent::token::TokenManager;
use mediawiki_agent::utils::constants::DEFAULT_HTTP_TIMEOUT_MS;
use mediawiki_agent::utils::logging::{self, LogLevel};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "mediawiki-agent.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read CLI args and YAML config
    // -------------------------------

    let args = Args::parse();
    let service_config = load_config(&args.config)?;
    logging::run(&service_config, args.log_level)?;

    // -------------------------------
    // 2. Create the shared request client
    // -------------------------------

    let timeout_ms = service_config
        .http
        .as_ref()
        .and_then(|http| http.timeout_ms)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_MS);
    let client = Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()?;

    // -------------------------------
    // 3. Build the token manager and wiki client
    // -------------------------------

    let state = AppState::new(
        Arc::new(TokenManager::new(client.clone())),
        WikiClient::new(client),
    );

    // -------------------------------
    // 4. Serve the tool routes
    // -------------------------------

    info!("mediawiki-agent starting");
    server::start(&service_config.server, state).await
}
