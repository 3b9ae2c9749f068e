//! Command dispatcher: parsed command → notes API call → rendered reply

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod dispatcher_tests;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use notes_client::{NoteStore, RemoteError};
use notes_types::{parse, Command, CommandKind, ParseError};
use tracing::{debug, error, info, warn};

use crate::replies;

/// How a command ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// The command ran and the remote call succeeded
    Success,
    /// The command was malformed; no remote call was made
    Rejected,
    /// The remote API reported the note missing
    NotFound,
    /// The remote call failed with an HTTP or transport error
    Failed,
    /// Serving the command panicked
    Unhandled,
}

/// The single rendered reply produced for a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub status: OutcomeStatus,
    pub text: String,
}

impl Outcome {
    fn new(status: OutcomeStatus, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, OutcomeStatus::Failed | OutcomeStatus::Unhandled)
    }
}

/// Maps commands onto [`NoteStore`] operations.
///
/// Holds no state between commands; the store is the only dependency.
pub struct CommandDispatcher<S> {
    store: S,
}

impl<S: NoteStore> CommandDispatcher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Parse and dispatch one line of chat text.
    ///
    /// Returns `None` when the text is not a command.
    pub async fn handle_text(&self, text: &str) -> Option<Outcome> {
        match parse(text) {
            Ok(command) => Some(self.dispatch(command).await),
            Err(ParseError::NotACommand) => None,
            Err(err) => {
                debug!("Rejected command: {}", err);
                replies::parse_error_text(&err).map(|text| Outcome::new(OutcomeStatus::Rejected, text))
            }
        }
    }

    /// Run a command to completion. Always yields exactly one outcome.
    pub async fn dispatch(&self, command: Command) -> Outcome {
        let kind = command.kind();
        info!("Dispatching /{}", kind);

        match AssertUnwindSafe(self.execute(command)).catch_unwind().await {
            Ok(outcome) => outcome,
            Err(panic) => {
                error!(
                    "Unhandled failure while processing /{}: {}",
                    kind,
                    panic_message(panic.as_ref())
                );
                Outcome::new(OutcomeStatus::Unhandled, replies::UNHANDLED_ERROR)
            }
        }
    }

    async fn execute(&self, command: Command) -> Outcome {
        match command {
            Command::Start => Outcome::new(OutcomeStatus::Success, replies::help_text()),

            Command::Create(draft) => match self.store.create(&draft).await {
                Ok(Some(id)) => {
                    info!("Created note {}", id);
                    Outcome::new(OutcomeStatus::Success, replies::NOTE_CREATED)
                }
                Ok(None) => {
                    info!("Created note (id not returned)");
                    Outcome::new(OutcomeStatus::Success, replies::NOTE_CREATED)
                }
                Err(err) => failure(CommandKind::Create, err),
            },

            Command::List => match self.store.list().await {
                Ok(notes) => {
                    debug!("Listed {} notes", notes.len());
                    Outcome::new(OutcomeStatus::Success, replies::note_list(&notes))
                }
                Err(err) => failure(CommandKind::List, err),
            },

            Command::View { id } => match self.store.get(id).await {
                Ok(note) => {
                    info!("Viewed note {}", id);
                    Outcome::new(OutcomeStatus::Success, replies::note_view(&note))
                }
                Err(err) => failure(CommandKind::View, err),
            },

            Command::Update { id, draft } => match self.store.update(id, &draft).await {
                Ok(()) => {
                    info!("Updated note {}", id);
                    Outcome::new(OutcomeStatus::Success, replies::NOTE_UPDATED)
                }
                Err(err) => failure(CommandKind::Update, err),
            },

            Command::Delete { id } => match self.store.delete(id).await {
                Ok(()) => {
                    info!("Deleted note {}", id);
                    Outcome::new(OutcomeStatus::Success, replies::NOTE_DELETED)
                }
                Err(err) => failure(CommandKind::Delete, err),
            },
        }
    }
}

/// Log a classified remote failure and pick the reply for it.
fn failure(kind: CommandKind, err: RemoteError) -> Outcome {
    match &err {
        RemoteError::NotFound => info!("/{}: note not found", kind),
        RemoteError::HttpStatus(status) => {
            warn!("/{} failed: notes API answered HTTP {}", kind, status)
        }
        RemoteError::Transport(cause) => error!("/{} failed: {}", kind, cause),
    }

    match (kind, err) {
        (CommandKind::View, RemoteError::NotFound) => {
            Outcome::new(OutcomeStatus::NotFound, replies::VIEW_NOT_FOUND)
        }
        (CommandKind::Delete, RemoteError::NotFound) => {
            Outcome::new(OutcomeStatus::NotFound, replies::DELETE_NOT_FOUND)
        }
        _ => Outcome::new(OutcomeStatus::Failed, replies::failure_text(kind)),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
