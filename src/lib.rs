pub mod api;
pub mod commands;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod presentation;
pub mod services;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};

use api::HttpResourceClient;
use commands::{AppState, Flow};
use config::ConsoleSettings;
use presentation::{ConsoleAdapter, Notice};
use services::BackgroundServices;

pub fn run() -> anyhow::Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!("PANIC in waf-console: {info}");
        default_hook(info);
    }));

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "waf_console=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = ConsoleSettings::from_env();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build async runtime")?
        .block_on(console_main(settings))
}

async fn console_main(settings: ConsoleSettings) -> anyhow::Result<()> {
    std::fs::create_dir_all(&settings.data_dir)
        .with_context(|| format!("failed to create {}", settings.data_dir.display()))?;
    let db_path = settings.preferences_path();
    let database = Arc::new(db::Database::open(&db_path)?);
    tracing::info!("Preferences opened at {}", db_path.display());

    let client = Arc::new(HttpResourceClient::new(&settings.api_base)?);
    tracing::info!("Management API at {}", client.base());
    let adapter = Arc::new(ConsoleAdapter::new());

    let state = Arc::new(AppState::new(client, adapter, database));
    if let Err(e) = commands::restore_theme(&state) {
        tracing::warn!("Failed to restore theme: {e}");
    }

    let services = BackgroundServices::start(&state);
    state.adapter.notify(&Notice::info(commands::HELP));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        let intent = match commands::parse_intent(&line) {
            Ok(Some(intent)) => intent,
            Ok(None) => continue,
            Err(e) => {
                state.adapter.notify(&Notice::failure(e.to_string()));
                continue;
            }
        };
        match commands::dispatch(&state, intent).await {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            // Handlers raise their own operator notices.
            Err(e) => tracing::warn!("Command failed: {e}"),
        }
    }

    services.shutdown();
    tracing::info!("Console closed");
    Ok(())
}
