//! Telegram update handlers and the message source they feed

use std::future::Future;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, Message};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use notes_types::CommandKind;

use crate::adapter::{InboundMessage, MessageSource};

/// Forward a text message to the command loop
pub async fn handle_text_message(msg: Message, tx: mpsc::Sender<InboundMessage>) -> ResponseResult<()> {
    let text = msg.text().unwrap_or_default();

    debug!("Received text message in chat {}", msg.chat.id);

    if tx.send(InboundMessage::new(msg.chat.id.0, text)).await.is_err() {
        warn!("Command loop is gone, dropping message from chat {}", msg.chat.id);
    }

    Ok(())
}

/// Handler tree: only text messages are of interest
pub fn schema() -> UpdateHandler<teloxide::RequestError> {
    Update::filter_message().branch(
        dptree::filter(|msg: Message| msg.text().is_some()).endpoint(handle_text_message),
    )
}

/// Command loop side of the Telegram long-polling dispatcher
pub struct TelegramSource {
    rx: mpsc::Receiver<InboundMessage>,
}

impl TelegramSource {
    /// Build the source together with the polling future that feeds it.
    ///
    /// The source closes once the polling future completes (Ctrl-C).
    pub fn polling(bot: Bot, buffer: usize) -> (Self, impl Future<Output = ()>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));

        let mut dispatcher = Dispatcher::builder(bot, schema())
            .dependencies(dptree::deps![tx])
            .default_handler(|_update| async {})
            .enable_ctrlc_handler()
            .build();

        let polling = async move {
            info!("Starting Telegram long polling");
            dispatcher.dispatch().await;
            info!("Telegram dispatcher stopped");
            // Dropping the dispatcher drops the last sender and closes the source
            drop(dispatcher);
        };

        (Self { rx }, polling)
    }
}

impl MessageSource for TelegramSource {
    async fn next_message(&mut self) -> Option<InboundMessage> {
        self.rx.recv().await
    }
}

/// Command menu shown by Telegram clients
pub fn bot_commands() -> Vec<BotCommand> {
    CommandKind::ALL
        .into_iter()
        .map(|kind| BotCommand::new(kind.name(), kind.description()))
        .collect()
}

/// Publish the command menu; failures are logged, not fatal
pub async fn register_commands(bot: &Bot) {
    match bot.set_my_commands(bot_commands()).await {
        Ok(_) => info!("Registered {} bot commands", CommandKind::ALL.len()),
        Err(e) => warn!("Failed to register bot commands: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_commands_cover_every_kind() {
        let commands = bot_commands();
        let names: Vec<&str> = commands.iter().map(|c| c.command.as_str()).collect();
        assert_eq!(names, vec!["start", "list", "create", "update", "delete", "view"]);
        assert!(commands.iter().all(|c| !c.description.is_empty()));
    }

    #[tokio::test]
    async fn test_source_closes_when_senders_drop() {
        let (tx, rx) = mpsc::channel(4);
        let mut source = TelegramSource { rx };
        tx.send(InboundMessage::new(5, "/list")).await.unwrap();
        drop(tx);

        assert_eq!(source.next_message().await, Some(InboundMessage::new(5, "/list")));
        assert_eq!(source.next_message().await, None);
    }
}
