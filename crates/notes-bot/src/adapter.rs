//! Chat adapter: pulls inbound messages from a source, dispatches them,
//! and sends each reply back to the conversation it came from.

use std::future::Future;

use notes_client::NoteStore;
use tracing::{debug, error, info};

use crate::dispatcher::{CommandDispatcher, Outcome};
use crate::health::AppState;

/// One inbound chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub text: String,
}

impl InboundMessage {
    pub fn new(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
        }
    }
}

/// Delivers inbound messages one at a time.
pub trait MessageSource: Send {
    /// Next message, or `None` once the source is exhausted.
    fn next_message(&mut self) -> impl Future<Output = Option<InboundMessage>> + Send;
}

/// Sends reply text to a conversation.
pub trait ReplySink: Send + Sync {
    fn send_reply(
        &self,
        chat_id: i64,
        text: &str,
    ) -> impl Future<Output = anyhow::Result<()>> + Send;
}

/// Glues a message source and a reply sink to the command dispatcher.
///
/// Messages are processed strictly in arrival order: parse, remote call,
/// render and send all finish before the next message is pulled.
pub struct ChatAdapter<S> {
    dispatcher: CommandDispatcher<S>,
    health: AppState,
}

impl<S: NoteStore> ChatAdapter<S> {
    pub fn new(dispatcher: CommandDispatcher<S>, health: AppState) -> Self {
        Self { dispatcher, health }
    }

    pub fn dispatcher(&self) -> &CommandDispatcher<S> {
        &self.dispatcher
    }

    /// Handle a single message without sending anything.
    pub async fn handle(&self, msg: &InboundMessage) -> Option<Outcome> {
        self.health.record_received();

        let outcome = self.dispatcher.handle_text(&msg.text).await;
        match &outcome {
            Some(outcome) => {
                self.health.record_command();
                if outcome.is_failure() {
                    self.health.record_error();
                }
            }
            None => debug!("Ignoring non-command message in chat {}", msg.chat_id),
        }
        outcome
    }

    /// Drain `source`, replying through `sink`, until the source closes.
    pub async fn run<M, R>(&self, mut source: M, sink: &R)
    where
        M: MessageSource,
        R: ReplySink,
    {
        info!("Chat adapter started");

        while let Some(msg) = source.next_message().await {
            let Some(outcome) = self.handle(&msg).await else {
                continue;
            };

            match sink.send_reply(msg.chat_id, &outcome.text).await {
                Ok(()) => self.health.record_sent(),
                Err(e) => {
                    error!("Failed to send reply to chat {}: {:#}", msg.chat_id, e);
                    self.health.record_error();
                }
            }
        }

        info!("Message source closed, chat adapter stopping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_client::mock::{MockNoteStore, StoreCall};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    struct VecSource(VecDeque<InboundMessage>);

    impl MessageSource for VecSource {
        async fn next_message(&mut self) -> Option<InboundMessage> {
            self.0.pop_front()
        }
    }

    #[derive(Clone, Default)]
    struct RecordingSink {
        sent: Arc<Mutex<Vec<(i64, String)>>>,
        fail: bool,
    }

    impl ReplySink for RecordingSink {
        async fn send_reply(&self, chat_id: i64, text: &str) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("chat unreachable");
            }
            self.sent.lock().unwrap().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn adapter(store: MockNoteStore) -> ChatAdapter<MockNoteStore> {
        ChatAdapter::new(CommandDispatcher::new(store), AppState::new(None))
    }

    fn source(messages: &[(i64, &str)]) -> VecSource {
        VecSource(
            messages
                .iter()
                .map(|(chat, text)| InboundMessage::new(*chat, *text))
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_replies_go_back_to_originating_chat_in_order() {
        let store = MockNoteStore::new();
        let adapter = adapter(store.clone());
        let sink = RecordingSink::default();

        adapter
            .run(
                source(&[(10, "/create Groceries milk"), (20, "/list"), (10, "/view 1")]),
                &sink,
            )
            .await;

        let sent = sink.sent.lock().unwrap().clone();
        assert_eq!(
            sent,
            vec![
                (10, "Note created successfully".to_string()),
                (20, "1: Groceries".to_string()),
                (10, "Note 1:\n\nGroceries\n\nmilk".to_string()),
            ]
        );
        assert_eq!(store.call_count(), 3);
    }

    #[tokio::test]
    async fn test_plain_text_gets_no_reply() {
        let adapter = adapter(MockNoteStore::new());
        let sink = RecordingSink::default();

        adapter.run(source(&[(1, "hello"), (1, "/list")]), &sink).await;

        let sent = sink.sent.lock().unwrap().clone();
        assert_eq!(sent, vec![(1, "The note list is empty".to_string())]);
    }

    #[tokio::test]
    async fn test_metrics_track_messages_and_failures() {
        let store = MockNoteStore::new();
        store.fail_next(notes_client::RemoteError::HttpStatus(500));
        let health = AppState::new(None);
        let adapter = ChatAdapter::new(CommandDispatcher::new(store.clone()), health.clone());

        adapter
            .run(source(&[(1, "/list"), (1, "hi"), (1, "/view x")]), &RecordingSink::default())
            .await;

        let metrics = health.metrics();
        assert_eq!(metrics.messages_received, 3);
        assert_eq!(metrics.commands_processed, 2);
        assert_eq!(metrics.replies_sent, 2);
        assert_eq!(metrics.errors, 1);
        assert_eq!(store.calls(), vec![StoreCall::List]);
    }

    #[tokio::test]
    async fn test_sink_failure_does_not_stop_the_loop() {
        let health = AppState::new(None);
        let adapter = ChatAdapter::new(CommandDispatcher::new(MockNoteStore::new()), health.clone());
        let sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        adapter.run(source(&[(1, "/start"), (1, "/list")]), &sink).await;

        let metrics = health.metrics();
        assert_eq!(metrics.commands_processed, 2);
        assert_eq!(metrics.errors, 2);
        assert_eq!(metrics.replies_sent, 0);
    }
}
