//! Outbound replies (command loop → Telegram)

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::types::ChatId;
use tracing::{debug, warn};

use crate::adapter::ReplySink;
use crate::errors::{classify, SendFailure};

/// Sends reply text with `sendMessage`, splitting long texts.
#[derive(Clone)]
pub struct TelegramReplier {
    bot: Bot,
    text_chunk_limit: usize,
}

impl TelegramReplier {
    pub fn new(bot: Bot, text_chunk_limit: usize) -> Self {
        Self {
            bot,
            text_chunk_limit,
        }
    }

    async fn send_chunk(&self, chat_id: ChatId, text: String) -> Result<()> {
        let err = match self.bot.send_message(chat_id, text.clone()).await {
            Ok(_) => return Ok(()),
            Err(e) => e,
        };

        match classify(chat_id, &err) {
            SendFailure::Retry(wait) => {
                tokio::time::sleep(wait).await;
                self.bot
                    .send_message(chat_id, text)
                    .await
                    .with_context(|| format!("resend to chat {} after flood wait failed", chat_id))?;
                Ok(())
            }
            SendFailure::Migrated(new_id) => {
                self.bot
                    .send_message(new_id, text)
                    .await
                    .with_context(|| format!("resend to migrated chat {} failed", new_id))?;
                Ok(())
            }
            SendFailure::Permanent(reason) => {
                warn!("Dropping reply to chat {}: {}", chat_id, reason);
                Err(anyhow::Error::new(err).context(reason))
            }
            SendFailure::Transient(reason) => Err(anyhow::Error::new(err).context(reason)),
        }
    }
}

impl ReplySink for TelegramReplier {
    async fn send_reply(&self, chat_id: i64, text: &str) -> Result<()> {
        let chunks = chunk_text(text, self.text_chunk_limit);
        debug!("Sending {} chunk(s) to chat {}", chunks.len(), chat_id);
        for chunk in chunks {
            self.send_chunk(ChatId(chat_id), chunk).await?;
        }
        Ok(())
    }
}

/// Split `text` into chunks of at most `limit` characters, preferring to break
/// on newlines. Never splits inside a UTF-8 character.
pub fn chunk_text(text: &str, limit: usize) -> Vec<String> {
    if limit == 0 {
        return vec![];
    }
    let mut chunks = Vec::new();
    let mut remaining = text;

    while remaining.chars().count() > limit {
        // Byte offset just past the first `limit` characters
        let hard_end = remaining
            .char_indices()
            .nth(limit)
            .map(|(i, _)| i)
            .unwrap_or(remaining.len());
        let slice = &remaining[..hard_end];
        let break_pos = match slice.rfind('\n') {
            Some(p) if p > 0 => p + 1,
            _ => hard_end,
        };
        chunks.push(remaining[..break_pos].to_string());
        remaining = &remaining[break_pos..];
    }

    if !remaining.is_empty() {
        chunks.push(remaining.to_string());
    }

    chunks
}
