//! Configuration management for notes-bot

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result};
use notes_client::NotesApiConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

use crate::env::ReadEnv;

const ENV_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
const ENV_LEGACY_BOT_TOKEN: &str = "BOT_TOKEN";
const ENV_API_URL: &str = "NOTES_API_URL";
const ENV_TEXT_CHUNK_LIMIT: &str = "TEXT_CHUNK_LIMIT";

/// Telegram rejects messages longer than this
pub const TELEGRAM_MAX_MESSAGE_LEN: usize = 4096;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub telegram: TelegramBotConfig,
    #[serde(default)]
    pub notes_api: NotesApiConfig,
}

/// Telegram bot specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token from BotFather
    #[serde(default)]
    pub bot_token: String,
    /// Publish the command menu via `setMyCommands` on start-up
    #[serde(default = "default_true")]
    pub register_commands: bool,
    #[serde(default)]
    pub limits: LimitConfig,
}

/// Size limits for the chat transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Max text chunk size (Telegram limit: 4096)
    #[serde(default = "default_text_chunk_limit")]
    pub text_chunk_limit: usize,
    /// Inbound messages buffered between the Telegram poller and the command loop
    #[serde(default = "default_inbound_buffer")]
    pub inbound_buffer: usize,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env<E: ReadEnv>(env: &E) -> Self {
        let bot_token = env
            .var(ENV_BOT_TOKEN)
            .or_else(|_| env.var(ENV_LEGACY_BOT_TOKEN))
            .unwrap_or_default();

        let notes_api = env
            .var(ENV_API_URL)
            .map(NotesApiConfig::new)
            .unwrap_or_default();

        let mut limits = LimitConfig::default();
        if let Ok(raw) = env.var(ENV_TEXT_CHUNK_LIMIT) {
            match raw.parse::<usize>() {
                Ok(limit) if (1..=TELEGRAM_MAX_MESSAGE_LEN).contains(&limit) => {
                    limits.text_chunk_limit = limit;
                }
                _ => warn!(
                    "{ENV_TEXT_CHUNK_LIMIT}={raw:?} must be between 1 and {TELEGRAM_MAX_MESSAGE_LEN}, using default"
                ),
            }
        }

        Config {
            telegram: TelegramBotConfig {
                bot_token,
                register_commands: true,
                limits,
            },
            notes_api,
        }
    }

    /// Check the settings needed to talk to Telegram
    pub fn validate_for_telegram(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            anyhow::bail!("{ENV_BOT_TOKEN} not set (pass --bot-token or use --console)");
        }
        let limit = self.telegram.limits.text_chunk_limit;
        if limit == 0 || limit > TELEGRAM_MAX_MESSAGE_LEN {
            anyhow::bail!(
                "text_chunk_limit must be between 1 and {TELEGRAM_MAX_MESSAGE_LEN}, got {limit}"
            );
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_text_chunk_limit() -> usize {
    TELEGRAM_MAX_MESSAGE_LEN
}

fn default_inbound_buffer() -> usize {
    64
}

impl Default for TelegramBotConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            register_commands: true,
            limits: LimitConfig::default(),
        }
    }
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            text_chunk_limit: default_text_chunk_limit(),
            inbound_buffer: default_inbound_buffer(),
        }
    }
}
