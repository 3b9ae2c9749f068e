//! Console transport: commands from stdin, replies to stdout.
//!
//! Useful for exercising the bot against a notes API without Telegram.

use anyhow::Result;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};
use tracing::warn;

use crate::adapter::{InboundMessage, MessageSource, ReplySink};

/// Chat id used for every console message
pub const CONSOLE_CHAT_ID: i64 = 0;

pub struct ConsoleSource {
    lines: Lines<BufReader<Stdin>>,
}

impl ConsoleSource {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(io::stdin()).lines(),
        }
    }
}

impl Default for ConsoleSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageSource for ConsoleSource {
    async fn next_message(&mut self) -> Option<InboundMessage> {
        match self.lines.next_line().await {
            Ok(Some(line)) => Some(InboundMessage::new(CONSOLE_CHAT_ID, line)),
            Ok(None) => None,
            Err(e) => {
                warn!("Failed to read stdin: {}", e);
                None
            }
        }
    }
}

pub struct ConsoleReplier;

impl ReplySink for ConsoleReplier {
    async fn send_reply(&self, _chat_id: i64, text: &str) -> Result<()> {
        let mut stdout = io::stdout();
        stdout.write_all(text.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
        Ok(())
    }
}
