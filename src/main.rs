use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod context;
mod models;
mod services;
mod utils;
mod webhook;

use api::{AirtableClient, LineClient};
use config::Config;
use context::BotContext;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["promptledger=debug", "hyper=warn", "reqwest=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting PromptPay expense bot...");

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };

    let ledger = Arc::new(AirtableClient::new(
        config.airtable_api_token.clone(),
        config.airtable_base_id.clone(),
        config.airtable_table_name.clone(),
    ));
    let notifier = Arc::new(LineClient::new(config.line_channel_access_token.clone()));
    let ctx = Arc::new(BotContext::new(&config, ledger, notifier));

    info!(
        "Ledger table '{}' in base {}, day boundary in {}",
        config.airtable_table_name, config.airtable_base_id, config.ledger_timezone
    );

    let listener = match tokio::net::TcpListener::bind(config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", config.bind_addr, e);
            return;
        }
    };
    info!("Listening on {}", config.bind_addr);

    if let Err(e) = axum::serve(listener, webhook::router(ctx)).await {
        error!("Server error: {}", e);
    }
}
