// Environment configuration.
//
// Loaded once at startup, after dotenv. Missing credentials abort the
// process before the server starts listening.

use anyhow::{Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    /// GroupMe bot identifier, used for posting as the bot.
    pub bot_id: String,

    /// Access token for the moderator account the bot acts as.
    pub access_token: String,

    /// The single group this bot moderates.
    pub group_id: String,

    /// Webhook listen port (default: 3000).
    pub port: u16,

    /// GroupMe API base URL override, mainly for tests.
    pub api_base_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            bot_id: env::var("BOT_ID").context("BOT_ID must be set")?,
            access_token: env::var("ACCESS_TOKEN").context("ACCESS_TOKEN must be set")?,
            group_id: env::var("GROUP_ID").context("GROUP_ID must be set")?,
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            api_base_url: env::var("GROUPME_API").ok(),
        })
    }
}
