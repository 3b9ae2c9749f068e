//! Environment variable access behind a trait, so configuration loading
//! can be tested without mutating the process environment.

use std::env::VarError;
use std::path::{Path, PathBuf};

/// Load `.env` from the working directory (or a parent) into the process
/// environment. Variables that are already set keep their value.
///
/// Returns the file that was loaded, if any.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

/// Same as [`load_dotenv`] for an explicit file.
pub fn load_dotenv_from(path: &Path) -> dotenvy::Result<()> {
    dotenvy::from_path(path)
}

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, VarError>;
}

/// Delegates to `std::env`.
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }
}

#[cfg(test)]
pub use in_memory::InMemoryEnv;

#[cfg(test)]
mod in_memory {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::ReadEnv;

    /// Fixed set of variables for tests
    #[derive(Default)]
    pub struct InMemoryEnv {
        vars: HashMap<String, String>,
    }

    impl InMemoryEnv {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(mut self, key: &str, value: &str) -> Self {
            self.vars.insert(key.to_string(), value.to_string());
            self
        }
    }

    impl ReadEnv for InMemoryEnv {
        fn var(&self, key: &str) -> Result<String, VarError> {
            self.vars.get(key).cloned().ok_or(VarError::NotPresent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_env_delegation() {
        let std_result = std::env::var("PATH");
        assert_eq!(std_result.is_ok(), SystemEnv.var("PATH").is_ok());
    }

    #[test]
    fn test_dotenv_file_feeds_system_env() {
        let dir = std::env::temp_dir().join(format!("notes-bot-dotenv-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        std::fs::write(
            &path,
            "NOTES_BOT_DOTENV_TOKEN=from-file\nNOTES_BOT_DOTENV_KEPT=from-file\n",
        )
        .unwrap();
        std::env::set_var("NOTES_BOT_DOTENV_KEPT", "from-process");

        load_dotenv_from(&path).unwrap();

        assert_eq!(SystemEnv.var("NOTES_BOT_DOTENV_TOKEN").as_deref(), Ok("from-file"));
        assert_eq!(SystemEnv.var("NOTES_BOT_DOTENV_KEPT").as_deref(), Ok("from-process"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_dotenv_file_is_an_error() {
        let path = std::env::temp_dir().join("notes-bot-no-such-dir").join(".env");
        assert!(load_dotenv_from(&path).is_err());
    }

    #[test]
    fn test_in_memory_env() {
        let env = InMemoryEnv::new().with("A", "1");
        assert_eq!(env.var("A").as_deref(), Ok("1"));
        assert_eq!(env.var("B"), Err(VarError::NotPresent));
    }
}
