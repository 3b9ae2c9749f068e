//! [`NoteStore`] trait: the seam between command handling and the notes API.

use std::future::Future;

use notes_types::{Note, NoteDraft, NoteId, NoteSummary};

use crate::error::RemoteError;

/// Remote CRUD operations on notes.
///
/// Implementations must be `Send + Sync` and return `Send` futures so a
/// single instance can be shared by async tasks.
pub trait NoteStore: Send + Sync {
    /// Create a note. Returns the server-assigned id when the response
    /// body carries one.
    fn create(
        &self,
        draft: &NoteDraft,
    ) -> impl Future<Output = Result<Option<NoteId>, RemoteError>> + Send;

    /// List all notes. An empty list is not an error.
    fn list(&self) -> impl Future<Output = Result<Vec<NoteSummary>, RemoteError>> + Send;

    /// Fetch a single note.
    fn get(&self, id: NoteId) -> impl Future<Output = Result<Note, RemoteError>> + Send;

    /// Replace title and content of an existing note.
    fn update(
        &self,
        id: NoteId,
        draft: &NoteDraft,
    ) -> impl Future<Output = Result<(), RemoteError>> + Send;

    /// Delete a note.
    fn delete(&self, id: NoteId) -> impl Future<Output = Result<(), RemoteError>> + Send;
}
