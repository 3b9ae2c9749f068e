//! Configuration for the remote notes API

use serde::{Deserialize, Serialize};

/// Default collection endpoint of the notes API
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/api/notes/";

/// Remote notes API configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotesApiConfig {
    /// Collection URL, e.g. `http://127.0.0.1:8000/api/notes/`
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for NotesApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl NotesApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Base URL with exactly one trailing slash
    pub fn collection_url(&self) -> String {
        format!("{}/", self.base_url.trim().trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_api() {
        assert_eq!(NotesApiConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_collection_url_normalizes_trailing_slash() {
        for raw in [
            "http://api.test/api/notes",
            "http://api.test/api/notes/",
            "http://api.test/api/notes//",
            " http://api.test/api/notes/ ",
        ] {
            assert_eq!(
                NotesApiConfig::new(raw).collection_url(),
                "http://api.test/api/notes/"
            );
        }
    }

    #[test]
    fn test_deserialize_without_base_url_uses_default() {
        let config: NotesApiConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(config, NotesApiConfig::default());
    }
}
