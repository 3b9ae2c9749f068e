//! Telegram send-error handling
//!
//! Converts teloxide errors into the action the reply sender should take.

use std::time::Duration;

use teloxide::types::ChatId;
use teloxide::{ApiError, RequestError};
use tracing::{debug, warn};

/// What to do after a failed `sendMessage`
#[derive(Debug, PartialEq, Eq)]
pub enum SendFailure {
    /// Flood control; resend after this duration
    Retry(Duration),
    /// Chat migrated to a supergroup; resend to the new id
    Migrated(ChatId),
    /// The chat can never receive this message
    Permanent(String),
    /// Network trouble or an unexpected API answer
    Transient(String),
}

/// Classify a `RequestError` raised while sending a reply to `chat_id`.
pub fn classify(chat_id: ChatId, err: &RequestError) -> SendFailure {
    match err {
        // ── Flood control ────────────────────────────────────────────────────
        RequestError::RetryAfter(secs) => {
            let wait = Duration::from_secs(secs.duration().as_secs().max(1));
            warn!("Flood control on chat {}: retry after {:?}", chat_id, wait);
            SendFailure::Retry(wait)
        }

        // ── Chat migration ───────────────────────────────────────────────────
        RequestError::MigrateToChatId(new_id) => {
            warn!("Chat {} migrated to {}", chat_id, new_id);
            SendFailure::Migrated(*new_id)
        }

        // ── Network / I/O ────────────────────────────────────────────────────
        RequestError::Network(_) | RequestError::Io(_) => {
            debug!("Network error sending to chat {}: {}", chat_id, err);
            SendFailure::Transient(err.to_string())
        }

        RequestError::InvalidJson { raw, .. } => {
            SendFailure::Transient(format!("Invalid JSON response: {}", raw))
        }

        // ── Telegram API errors ──────────────────────────────────────────────
        RequestError::Api(api_err) => classify_api(api_err),
    }
}

fn classify_api(api_err: &ApiError) -> SendFailure {
    let permanent = match api_err {
        ApiError::BotBlocked => Some("Bot was blocked by the user"),
        ApiError::BotKicked => Some("Bot was kicked from the group"),
        ApiError::BotKickedFromSupergroup => Some("Bot was kicked from the supergroup"),
        ApiError::ChatNotFound => Some("Chat not found"),
        ApiError::UserDeactivated => Some("User is deactivated"),
        ApiError::GroupDeactivated => Some("Group is deactivated"),
        ApiError::CantInitiateConversation => Some("Can't initiate conversation with the user"),
        ApiError::CantTalkWithBots => Some("Can't send messages to bots"),
        ApiError::NotEnoughRightsToPostMessages => Some("Not enough rights to post messages"),
        ApiError::MessageIsTooLong => Some("Message is too long (max 4096 characters)"),
        ApiError::MessageTextIsEmpty => Some("Message text must not be empty"),
        ApiError::InvalidToken => Some("Bot token is invalid"),
        _ => None,
    };

    match permanent {
        Some(reason) => SendFailure::Permanent(reason.to_string()),
        None => SendFailure::Transient(format!("Telegram API error: {}", api_err)),
    }
}
