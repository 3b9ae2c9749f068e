//! Client for the remote notes REST resource
//!
//! [`HttpNoteClient`] issues exactly one HTTP request per operation and
//! classifies every failure into a [`RemoteError`]. Callers depend on the
//! [`NoteStore`] trait so they can be driven by test doubles.

pub mod config;
pub mod error;
pub mod http;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use config::NotesApiConfig;
pub use error::{RemoteError, Result};
pub use http::HttpNoteClient;
pub use store::NoteStore;
