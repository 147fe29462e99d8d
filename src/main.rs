// This is the entry point of the GroupMe moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (the GroupMe REST client)
// - `web/` = The inbound webhook adapter (axum)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Start the webhook server

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with half a dozen mod.rs files that all look the same.
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "web/web_layer.rs"]
mod web;

mod config;

use crate::core::membership::{MembershipTracker, SystemClock};
use crate::core::moderation::{KeywordFilter, ModerationService};
use crate::infra::groupme::GroupMeApiClient;
use crate::web::{create_router, AppState};
use anyhow::Result;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groupme_guard=info,tower_http=info".into()),
        )
        .init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    // Fails fast when BOT_ID, ACCESS_TOKEN or GROUP_ID is missing.
    let config = config::Config::from_env()?;

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // Create our services with their dependencies.
    // This is the "composition root" where we wire everything together.

    let api = GroupMeApiClient::new(
        config.bot_id.clone(),
        config.access_token.clone(),
        config.group_id.clone(),
        config.api_base_url.clone(),
    )?;

    let tracker = MembershipTracker::new(SystemClock);
    let service = Arc::new(ModerationService::new(
        tracker,
        KeywordFilter::default_list(),
        api,
    ));

    tracing::info!(
        port = config.port,
        group_id = %config.group_id,
        keywords = service.keyword_count(),
        "Starting GroupMe moderation bot"
    );

    let app = create_router(AppState { service });

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        tracing::info!("Received shutdown signal, stopping");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    Ok(())
}
