//! Notes Bot
//!
//! Lets a chat user create, list, view, update and delete notes stored
//! behind a REST API. Inbound chat text is parsed into commands, each
//! command is executed against the notes API, and exactly one reply is
//! rendered per command.

pub mod adapter;
pub mod config;
pub mod console;
pub mod dispatcher;
pub mod env;
pub mod errors;
pub mod handlers;
pub mod health;
pub mod outbound;
pub mod replies;

pub use adapter::{ChatAdapter, InboundMessage, MessageSource, ReplySink};
pub use dispatcher::{CommandDispatcher, Outcome, OutcomeStatus};
