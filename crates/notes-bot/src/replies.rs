//! User-facing reply texts

use notes_types::{CommandKind, Note, NoteSummary, ParseError};

pub const NOTE_CREATED: &str = "Note created successfully";
pub const NOTE_UPDATED: &str = "Note updated successfully";
pub const NOTE_DELETED: &str = "Note deleted successfully";
pub const EMPTY_LIST: &str = "The note list is empty";

pub const VIEW_NOT_FOUND: &str = "A note with that id does not exist.";
pub const DELETE_NOT_FOUND: &str = "There is no note with that id";

pub const INVALID_ID: &str = "Please enter a numeric note id.";
pub const UNKNOWN_COMMAND: &str = "Unknown command. Send /start to see the list of commands.";
pub const UNHANDLED_ERROR: &str = "An error occurred";

/// Static help text listing every command
pub fn help_text() -> String {
    let mut text = String::from("Hi! I'm a bot for working with notes. Use the commands:");
    for kind in CommandKind::ALL {
        if kind == CommandKind::Start {
            continue;
        }
        text.push('\n');
        text.push_str(kind.usage());
        text.push_str(" - ");
        text.push_str(kind.description());
    }
    text
}

/// Generic failure text for a remote operation
pub fn failure_text(kind: CommandKind) -> &'static str {
    match kind {
        CommandKind::Create => "Failed to create the note",
        CommandKind::List => "Failed to fetch the note list",
        CommandKind::View => {
            "Failed to fetch the note. Please check the command and try again."
        }
        CommandKind::Update => "Failed to update the note",
        CommandKind::Delete => "Failed to delete the note",
        CommandKind::Start => UNHANDLED_ERROR,
    }
}

/// Reply for a command that failed to parse.
///
/// Returns `None` for text that is not a command at all.
pub fn parse_error_text(err: &ParseError) -> Option<String> {
    match err {
        ParseError::NotACommand => None,
        ParseError::UnknownCommand(_) => Some(UNKNOWN_COMMAND.to_string()),
        ParseError::InsufficientArguments(kind) => {
            Some(format!("Not enough arguments. Usage: {}", kind.usage()))
        }
        ParseError::UnexpectedArguments(kind) => {
            Some(format!("Too many arguments. Usage: {}", kind.usage()))
        }
        ParseError::InvalidIdFormat { .. } => Some(INVALID_ID.to_string()),
    }
}

/// One `id: title` line per note
pub fn note_list(notes: &[NoteSummary]) -> String {
    if notes.is_empty() {
        return EMPTY_LIST.to_string();
    }
    notes
        .iter()
        .map(|note| format!("{}: {}", note.id, note.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn note_view(note: &Note) -> String {
    format!("Note {}:\n\n{}\n\n{}", note.id, note.title, note.content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notes_types::NoteId;

    #[test]
    fn test_help_lists_every_command_usage() {
        let help = help_text();
        assert!(help.contains("/list - get the list of notes"));
        assert!(help.contains("/create <title> <content...> - create a new note"));
        assert!(help.contains("/update <note_id> <title> <content...>"));
        assert!(help.contains("/delete <note_id>"));
        assert!(help.contains("/view <note_id>"));
        assert!(!help.contains("/start -"));
    }

    #[test]
    fn test_note_list_lines() {
        let notes = vec![
            NoteSummary { id: NoteId::new(1), title: "One".into() },
            NoteSummary { id: NoteId::new(12), title: "Twelve".into() },
        ];
        assert_eq!(note_list(&notes), "1: One\n12: Twelve");
    }

    #[test]
    fn test_empty_note_list_uses_sentinel() {
        assert_eq!(note_list(&[]), EMPTY_LIST);
    }

    #[test]
    fn test_note_view_layout() {
        let note = Note {
            id: NoteId::new(42),
            title: "Plan".into(),
            content: "step one".into(),
        };
        assert_eq!(note_view(&note), "Note 42:\n\nPlan\n\nstep one");
    }

    #[test]
    fn test_usage_hints_echo_argument_pattern() {
        assert_eq!(
            parse_error_text(&ParseError::InsufficientArguments(CommandKind::Create)).as_deref(),
            Some("Not enough arguments. Usage: /create <title> <content...>")
        );
        assert_eq!(
            parse_error_text(&ParseError::UnexpectedArguments(CommandKind::View)).as_deref(),
            Some("Too many arguments. Usage: /view <note_id>")
        );
    }

    #[test]
    fn test_plain_text_gets_no_reply() {
        assert_eq!(parse_error_text(&ParseError::NotACommand), None);
    }
}
