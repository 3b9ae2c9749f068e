//! In-memory [`NoteStore`] for unit testing without a notes API.
//!
//! Enabled with the `test-support` feature:
//!
//! ```toml
//! [dev-dependencies]
//! notes-client = { path = "...", features = ["test-support"] }
//! ```

use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex};

use notes_types::{Note, NoteDraft, NoteId, NoteSummary};

use crate::error::RemoteError;
use crate::store::NoteStore;

/// One recorded call against the mock
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Create(NoteDraft),
    List,
    Get(NoteId),
    Update(NoteId, NoteDraft),
    Delete(NoteId),
}

#[derive(Default)]
struct State {
    notes: BTreeMap<NoteId, Note>,
    next_id: u64,
    calls: Vec<StoreCall>,
    failures: VecDeque<RemoteError>,
}

/// Records every call and serves notes from memory.
///
/// Queued failures (see [`MockNoteStore::fail_next`]) are returned by the
/// next calls in FIFO order instead of touching the in-memory notes.
#[derive(Clone, Default)]
pub struct MockNoteStore {
    state: Arc<Mutex<State>>,
}

impl MockNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a note with a fixed id.
    pub fn insert(&self, id: u64, title: &str, content: &str) {
        let mut state = self.state.lock().unwrap();
        let id = NoteId::new(id);
        state.notes.insert(
            id,
            Note {
                id,
                title: title.to_string(),
                content: content.to_string(),
            },
        );
        state.next_id = state.next_id.max(id.get());
    }

    /// Make the next call fail with `err`.
    pub fn fail_next(&self, err: RemoteError) {
        self.state.lock().unwrap().failures.push_back(err);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }

    pub fn note(&self, id: u64) -> Option<Note> {
        self.state.lock().unwrap().notes.get(&NoteId::new(id)).cloned()
    }

    fn record(&self, call: StoreCall) -> Result<std::sync::MutexGuard<'_, State>, RemoteError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(err) => Err(err),
            None => Ok(state),
        }
    }
}

impl NoteStore for MockNoteStore {
    async fn create(&self, draft: &NoteDraft) -> Result<Option<NoteId>, RemoteError> {
        let mut state = self.record(StoreCall::Create(draft.clone()))?;
        state.next_id += 1;
        let id = NoteId::new(state.next_id);
        state.notes.insert(
            id,
            Note {
                id,
                title: draft.title.clone(),
                content: draft.content.clone(),
            },
        );
        Ok(Some(id))
    }

    async fn list(&self) -> Result<Vec<NoteSummary>, RemoteError> {
        let state = self.record(StoreCall::List)?;
        Ok(state.notes.values().cloned().map(NoteSummary::from).collect())
    }

    async fn get(&self, id: NoteId) -> Result<Note, RemoteError> {
        let state = self.record(StoreCall::Get(id))?;
        state.notes.get(&id).cloned().ok_or(RemoteError::NotFound)
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<(), RemoteError> {
        let mut state = self.record(StoreCall::Update(id, draft.clone()))?;
        let note = state.notes.get_mut(&id).ok_or(RemoteError::NotFound)?;
        note.title = draft.title.clone();
        note.content = draft.content.clone();
        Ok(())
    }

    async fn delete(&self, id: NoteId) -> Result<(), RemoteError> {
        let mut state = self.record(StoreCall::Delete(id))?;
        state.notes.remove(&id).map(|_| ()).ok_or(RemoteError::NotFound)
    }
}
