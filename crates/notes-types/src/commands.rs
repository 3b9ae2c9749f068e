//! Chat commands and the parser that produces them
//!
//! A command line looks like `/view 42` or `/create@notes_bot Title some text`.
//! The first whitespace-separated token selects the [`CommandKind`]; the rest
//! are positional arguments validated per kind.

#[cfg(test)]
#[path = "commands_tests.rs"]
mod commands_tests;

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::note::{NoteDraft, NoteId};

/// Leading marker of a chat command
pub const COMMAND_MARKER: char = '/';

/// The set of commands understood by the bot
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    Start,
    Create,
    List,
    View,
    Update,
    Delete,
}

impl CommandKind {
    /// All kinds, in the order they are listed in the help text
    pub const ALL: [CommandKind; 6] = [
        CommandKind::Start,
        CommandKind::List,
        CommandKind::Create,
        CommandKind::Update,
        CommandKind::Delete,
        CommandKind::View,
    ];

    /// Command name without the leading marker
    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Start => "start",
            CommandKind::Create => "create",
            CommandKind::List => "list",
            CommandKind::View => "view",
            CommandKind::Update => "update",
            CommandKind::Delete => "delete",
        }
    }

    /// Look up a kind by its (lowercase) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Full argument pattern, echoed back on arity failures
    pub fn usage(self) -> &'static str {
        match self {
            CommandKind::Start => "/start",
            CommandKind::Create => "/create <title> <content...>",
            CommandKind::List => "/list",
            CommandKind::View => "/view <note_id>",
            CommandKind::Update => "/update <note_id> <title> <content...>",
            CommandKind::Delete => "/delete <note_id>",
        }
    }

    /// Short description for help text and the Telegram command menu
    pub fn description(self) -> &'static str {
        match self {
            CommandKind::Start => "show the list of commands",
            CommandKind::Create => "create a new note",
            CommandKind::List => "get the list of notes",
            CommandKind::View => "view a note",
            CommandKind::Update => "update an existing note",
            CommandKind::Delete => "delete a note",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parsed and validated user request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Create(NoteDraft),
    List,
    View { id: NoteId },
    Update { id: NoteId, draft: NoteDraft },
    Delete { id: NoteId },
}

impl Command {
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::Start => CommandKind::Start,
            Command::Create(_) => CommandKind::Create,
            Command::List => CommandKind::List,
            Command::View { .. } => CommandKind::View,
            Command::Update { .. } => CommandKind::Update,
            Command::Delete { .. } => CommandKind::Delete,
        }
    }
}

/// Why a line of text could not be turned into a [`Command`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Plain text, not addressed to the bot as a command
    #[error("not a command")]
    NotACommand,

    #[error("unknown command: /{0}")]
    UnknownCommand(String),

    #[error("not enough arguments for /{0}")]
    InsufficientArguments(CommandKind),

    #[error("too many arguments for /{0}")]
    UnexpectedArguments(CommandKind),

    #[error("note id must be numeric, got {token:?}")]
    InvalidIdFormat { kind: CommandKind, token: String },
}

impl ParseError {
    /// The command kind the error relates to, when one was recognised
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            ParseError::NotACommand | ParseError::UnknownCommand(_) => None,
            ParseError::InsufficientArguments(kind)
            | ParseError::UnexpectedArguments(kind)
            | ParseError::InvalidIdFormat { kind, .. } => Some(*kind),
        }
    }
}

/// Parse one inbound line of chat text.
pub fn parse(raw: &str) -> Result<Command, ParseError> {
    let mut tokens = raw.split_whitespace();
    let head = tokens.next().ok_or(ParseError::NotACommand)?;
    let name = command_name(head).ok_or(ParseError::NotACommand)?;
    let kind = CommandKind::from_name(&name).ok_or(ParseError::UnknownCommand(name))?;
    let args: Vec<&str> = tokens.collect();

    match kind {
        // Extra tokens are tolerated: Telegram deep links arrive as `/start <payload>`
        CommandKind::Start => Ok(Command::Start),
        CommandKind::List => Ok(Command::List),
        CommandKind::Create => {
            require_at_least(kind, &args, 2)?;
            Ok(Command::Create(NoteDraft::new(args[0], args[1..].join(" "))))
        }
        CommandKind::View => {
            let id = single_id(kind, &args)?;
            Ok(Command::View { id })
        }
        CommandKind::Delete => {
            let id = single_id(kind, &args)?;
            Ok(Command::Delete { id })
        }
        CommandKind::Update => {
            require_at_least(kind, &args, 3)?;
            let id = parse_id(kind, args[0])?;
            Ok(Command::Update {
                id,
                draft: NoteDraft::new(args[1], args[2..].join(" ")),
            })
        }
    }
}

/// Strip the marker and an optional `@botname` suffix, lowercase the rest.
fn command_name(head: &str) -> Option<String> {
    let body = head.strip_prefix(COMMAND_MARKER)?;
    let name = body.split('@').next().unwrap_or_default();
    if name.is_empty() {
        return None;
    }
    Some(name.to_lowercase())
}

fn require_at_least(kind: CommandKind, args: &[&str], min: usize) -> Result<(), ParseError> {
    if args.len() < min {
        return Err(ParseError::InsufficientArguments(kind));
    }
    Ok(())
}

fn single_id(kind: CommandKind, args: &[&str]) -> Result<NoteId, ParseError> {
    match args {
        [] => Err(ParseError::InsufficientArguments(kind)),
        [token] => parse_id(kind, token),
        _ => Err(ParseError::UnexpectedArguments(kind)),
    }
}

fn parse_id(kind: CommandKind, token: &str) -> Result<NoteId, ParseError> {
    let invalid = || ParseError::InvalidIdFormat {
        kind,
        token: token.to_string(),
    };

    // `u64::from_str` would also accept a leading '+'
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<u64>().map(NoteId::new).map_err(|_| invalid())
}
