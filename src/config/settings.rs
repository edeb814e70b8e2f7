//! Client settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// REST endpoints
    pub api: ApiSettings,

    /// Client-side upload limits
    pub upload: UploadSettings,

    /// Persisted session location
    pub storage: StorageSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// REST API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    /// Board API base URL (posts, notices, comments, files)
    pub base_url: String,

    /// User service base URL (auth and profile)
    pub user_service_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Upload limits applied before sending files.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// Maximum file size in bytes (default: 10MB)
    pub max_file_size: u64,

    /// Allowed MIME types; `type/*` matches any subtype
    pub allowed_file_types: Vec<String>,
}

/// Session persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// JSON file holding tokens and the user profile
    pub session_path: String,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. built-in defaults
    /// 2. config/default.toml
    /// 3. config/{RUN_ENV}.toml
    /// 4. `APP__*` environment variables, then `API_BASE_URL` / `USER_SERVICE_URL`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if an API URL is not http(s).
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Self::builder(&environment)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // APP__API__BASE_URL=... -> api.base_url
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("upload.allowed_file_types")
                    .try_parsing(true),
            )
            .set_override_option("api.base_url", std::env::var("API_BASE_URL").ok())?
            .set_override_option("api.user_service_url", std::env::var("USER_SERVICE_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(Self::validated)
    }

    /// Built-in defaults only, for tests and embedding.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder("development")?
            .build()?
            .try_deserialize()
            .and_then(Self::validated)
    }

    fn builder(
        environment: &str,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("environment", environment)?
            .set_default("api.base_url", "http://localhost:8081/api")?
            .set_default("api.user_service_url", "http://localhost:8082/api/users")?
            .set_default("api.timeout_secs", 30)?
            .set_default("upload.max_file_size", 10_485_760_i64)? // 10MB
            .set_default(
                "upload.allowed_file_types",
                vec!["image/*", "application/pdf", "text/*"],
            )?
            .set_default("storage.session_path", ".board-client/session.json")
    }

    fn validated(settings: Self) -> Result<Self, ConfigError> {
        for (key, url) in [
            ("api.base_url", &settings.api.base_url),
            ("api.user_service_url", &settings.api.user_service_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Message(format!(
                    "{} must be an http(s) URL, got '{}'",
                    key, url
                )));
            }
        }
        Ok(settings)
    }
}

impl ApiSettings {
    /// Request timeout as a duration.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}
