//! reqwest-backed [`NoteStore`] talking to the notes REST API.
//!
//! Endpoint mapping:
//! ```text
//! create  POST    {base}/
//! list    GET     {base}/
//! get     GET     {base}/{id}/
//! update  PUT     {base}/{id}/
//! delete  DELETE  {base}/{id}/
//! ```

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use notes_types::{Note, NoteDraft, NoteId, NoteSummary};

use crate::config::NotesApiConfig;
use crate::error::RemoteError;
use crate::store::NoteStore;

/// HTTP client for the notes API.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpNoteClient {
    client: Client,
    base_url: String,
}

impl HttpNoteClient {
    /// Create a client with a default `reqwest::Client`.
    pub fn new(config: &NotesApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Create a client reusing an existing `reqwest::Client`.
    pub fn with_client(client: Client, config: &NotesApiConfig) -> Self {
        Self {
            client,
            base_url: config.collection_url(),
        }
    }

    // ── URL helpers ───────────────────────────────────────────────────────────

    fn collection_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: NoteId) -> String {
        format!("{}{}/", self.base_url, id)
    }
}

// ── Response helpers ──────────────────────────────────────────────────────────

/// Turn a non-2xx response into a classified error.
fn check_status(resp: Response) -> Result<Response, RemoteError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(RemoteError::from_status(status.as_u16()))
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, RemoteError> {
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| RemoteError::Transport(format!("malformed response body: {e}")))
}

/// Best-effort read of `{"id": N}` from a create response.
async fn created_id(resp: Response) -> Option<NoteId> {
    let json: Value = resp.json().await.ok()?;
    json.get("id").and_then(Value::as_u64).map(NoteId::new)
}

// ── NoteStore impl ────────────────────────────────────────────────────────────

impl NoteStore for HttpNoteClient {
    async fn create(&self, draft: &NoteDraft) -> Result<Option<NoteId>, RemoteError> {
        debug!("POST {}", self.collection_url());
        let resp = self
            .client
            .post(self.collection_url())
            .json(draft)
            .send()
            .await?;
        let resp = check_status(resp)?;
        Ok(created_id(resp).await)
    }

    async fn list(&self) -> Result<Vec<NoteSummary>, RemoteError> {
        debug!("GET {}", self.collection_url());
        let resp = self.client.get(self.collection_url()).send().await?;
        let resp = check_status(resp)?;
        decode(resp).await
    }

    async fn get(&self, id: NoteId) -> Result<Note, RemoteError> {
        let url = self.item_url(id);
        debug!("GET {}", url);
        let resp = self.client.get(&url).send().await?;
        let resp = check_status(resp)?;
        decode(resp).await
    }

    async fn update(&self, id: NoteId, draft: &NoteDraft) -> Result<(), RemoteError> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let resp = self.client.put(&url).json(draft).send().await?;
        check_status(resp)?;
        Ok(())
    }

    async fn delete(&self, id: NoteId) -> Result<(), RemoteError> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let resp = self.client.delete(&url).send().await?;
        check_status(resp)?;
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
