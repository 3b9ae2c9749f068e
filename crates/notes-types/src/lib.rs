//! Shared types for the notes bot
//!
//! This crate provides the note data model exchanged with the remote
//! notes API and the chat command model, including the parser that turns
//! raw command text into validated commands.

pub mod commands;
pub mod note;

// Re-export commonly used types
pub use commands::{parse, Command, CommandKind, ParseError};
pub use note::{Note, NoteDraft, NoteId, NoteSummary};
