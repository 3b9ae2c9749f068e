#[cfg(test)]
mod tests {
    use crate::config::*;
    use crate::env::InMemoryEnv;
    use notes_client::config::DEFAULT_BASE_URL;

    #[test]
    fn test_default_limit_config() {
        let config = LimitConfig::default();
        assert_eq!(config.text_chunk_limit, 4096);
        assert_eq!(config.inbound_buffer, 64);
    }

    #[test]
    fn test_from_env_reads_token_and_api_url() {
        let env = InMemoryEnv::new()
            .with("TELEGRAM_BOT_TOKEN", "123:abc")
            .with("NOTES_API_URL", "http://notes.internal/api/notes/");
        let config = Config::from_env(&env);
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert_eq!(config.notes_api.base_url, "http://notes.internal/api/notes/");
        assert!(config.telegram.register_commands);
    }

    #[test]
    fn test_from_env_falls_back_to_legacy_token_name() {
        let env = InMemoryEnv::new().with("BOT_TOKEN", "legacy");
        assert_eq!(Config::from_env(&env).telegram.bot_token, "legacy");
    }

    #[test]
    fn test_from_env_defaults() {
        let config = Config::from_env(&InMemoryEnv::new());
        assert!(config.telegram.bot_token.is_empty());
        assert_eq!(config.notes_api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.telegram.limits.text_chunk_limit, 4096);
    }

    #[test]
    fn test_from_env_rejects_out_of_range_chunk_limit() {
        for raw in ["0", "5000", "lots"] {
            let env = InMemoryEnv::new().with("TEXT_CHUNK_LIMIT", raw);
            assert_eq!(Config::from_env(&env).telegram.limits.text_chunk_limit, 4096);
        }
        let env = InMemoryEnv::new().with("TEXT_CHUNK_LIMIT", "1000");
        assert_eq!(Config::from_env(&env).telegram.limits.text_chunk_limit, 1000);
    }

    #[test]
    fn test_parse_toml_file_contents() {
        let raw = r#"
            [telegram]
            bot_token = "123:abc"
            register_commands = false

            [telegram.limits]
            text_chunk_limit = 2000

            [notes_api]
            base_url = "http://127.0.0.1:9000/api/notes/"
        "#;
        let config: Config = toml::from_str(raw).expect("parse");
        assert_eq!(config.telegram.bot_token, "123:abc");
        assert!(!config.telegram.register_commands);
        assert_eq!(config.telegram.limits.text_chunk_limit, 2000);
        assert_eq!(config.telegram.limits.inbound_buffer, 64);
        assert_eq!(config.notes_api.base_url, "http://127.0.0.1:9000/api/notes/");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").expect("parse");
        assert_eq!(config.notes_api.base_url, DEFAULT_BASE_URL);
        assert!(config.telegram.register_commands);
    }

    #[test]
    fn test_from_file_missing_path_has_context() {
        let err = Config::from_file("/nonexistent/notes-bot.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_validate_for_telegram_requires_token() {
        let config = Config::from_env(&InMemoryEnv::new());
        assert!(config.validate_for_telegram().is_err());

        let config = Config::from_env(&InMemoryEnv::new().with("BOT_TOKEN", "t"));
        assert!(config.validate_for_telegram().is_ok());
    }
}
