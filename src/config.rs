//! Configuration types.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default path for the group-config JSON file.
pub const DEFAULT_DATA_FILE: &str = "bot_data.json";

/// Bot configuration, read from the environment at startup.
#[derive(Debug)]
pub struct BotConfig {
    /// Telegram Bot API token. Required unless running the CLI channel.
    pub bot_token: Option<SecretString>,
    /// User ids allowed to run admin commands.
    pub admin_ids: Vec<String>,
    /// Path of the JSON file holding per-group config.
    pub data_file: PathBuf,
    /// Long-poll timeout for getUpdates, in seconds.
    pub poll_timeout_secs: u64,
    /// Run the stdin/stdout channel instead of Telegram.
    pub use_cli: bool,
}

impl BotConfig {
    /// Read configuration from environment variables.
    ///
    /// `BOT_TOKEN` — Telegram token (required unless `PERSONA_BOT_CLI=1`).
    /// `ADMIN_IDS` — comma-separated numeric user ids; non-numeric entries
    /// are dropped. `BOT_DATA_FILE` — group-config path, defaults to
    /// `bot_data.json`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let use_cli = std::env::var("PERSONA_BOT_CLI")
            .map(|v| v == "1")
            .unwrap_or(false);

        let bot_token = std::env::var("BOT_TOKEN").ok().map(SecretString::from);
        if bot_token.is_none() && !use_cli {
            return Err(ConfigError::MissingEnvVar("BOT_TOKEN".into()));
        }

        let admin_ids = parse_admin_ids(&std::env::var("ADMIN_IDS").unwrap_or_default());

        let data_file = std::env::var("BOT_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_FILE));

        let poll_timeout_secs: u64 = std::env::var("BOT_POLL_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            bot_token,
            admin_ids,
            data_file,
            poll_timeout_secs,
            use_cli,
        })
    }
}

/// Parse a comma-separated admin id list, keeping only numeric entries.
pub fn parse_admin_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && s.parse::<i64>().is_ok())
        .map(String::from)
        .collect()
}
