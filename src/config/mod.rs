//! # Configuration Module
//!
//! This module handles client configuration loading.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus API_BASE_URL / USER_SERVICE_URL)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use board_client::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Board API at {}", settings.api.base_url);
//! ```

mod settings;

pub use settings::*;
