//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and can be reloaded from the environment with `reset`.
//!
//! Only the binary entry point reads the global. Library code receives the values
//! it needs as explicit structs built from a snapshot of this configuration.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Default upload limit: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Default maximum number of characters accepted for analysis.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 100_000;

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
    pub max_text_chars: usize,
    pub model_base_url: String,
    pub model_api_key: String,
    pub model_name: String,
    pub model_timeout_seconds: u64,
    pub model_temperature: f32,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key has a default, so this never fails. Malformed numeric values
    /// fall back to their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "writewise"),
            log_level: var_or("LOG_LEVEL", "api=info,analyzer=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            host: var_or("HOST", "127.0.0.1"),
            port: parse_or("PORT", 5000),
            max_upload_bytes: parse_or("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            max_text_chars: parse_or("MAX_TEXT_CHARS", DEFAULT_MAX_TEXT_CHARS),
            model_base_url: env::var("OPENAI_BASE_URL").unwrap_or_default(),
            model_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            model_name: var_or("OPENAI_MODEL", "chat-default"),
            model_timeout_seconds: parse_or("MODEL_TIMEOUT_SECONDS", 60),
            model_temperature: parse_or("MODEL_TEMPERATURE", 0.2),
        }
    }

    /// True when an upstream model endpoint has been configured.
    pub fn model_configured(&self) -> bool {
        !self.model_base_url.trim().is_empty() || !self.model_api_key.trim().is_empty()
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock is poisoned.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Returns an owned copy of the global configuration.
    pub fn snapshot() -> AppConfig {
        AppConfig::global().clone()
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Picks up environment changes made after the first access.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }
}
