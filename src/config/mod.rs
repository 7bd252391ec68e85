//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `ADVISORY_BOARD` prefix and nested values use double underscores
//! as separators.
//!
//! # Example
//!
//! ```no_run
//! use advisory_board::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod board;
mod database;
mod error;
mod server;

pub use ai::AiConfig;
pub use board::BoardConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the advisory board backend.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// AI provider configuration (OpenAI)
    pub ai: AiConfig,

    /// Board and session gate configuration
    #[serde(default)]
    pub board: BoardConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `ADVISORY_BOARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `ADVISORY_BOARD__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `ADVISORY_BOARD__DATABASE__URL=...` -> `database.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required environment variables are missing or
    /// values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ADVISORY_BOARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.board.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var(
            "ADVISORY_BOARD__DATABASE__URL",
            "postgresql://test@localhost/test",
        );
        env::set_var("ADVISORY_BOARD__AI__OPENAI_API_KEY", "sk-test-xxx");
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("ADVISORY_BOARD__DATABASE__URL");
        env::remove_var("ADVISORY_BOARD__AI__OPENAI_API_KEY");
        env::remove_var("ADVISORY_BOARD__SERVER__PORT");
        env::remove_var("ADVISORY_BOARD__BOARD__MAX_FREE_QUESTIONS");
    }

    #[test]
    fn load_from_environment_with_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("minimal env should load");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.ai.model, "gpt-4o");
        assert_eq!(config.board.max_free_questions, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_overrides_apply() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ADVISORY_BOARD__SERVER__PORT", "3000");
        env::set_var("ADVISORY_BOARD__BOARD__MAX_FREE_QUESTIONS", "5");
        let result = AppConfig::load();
        clear_env();

        let config = result.expect("env should load");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.board.max_free_questions, 5);
    }

    #[test]
    fn load_fails_without_required_values() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();
        assert!(result.is_err());
    }
}
