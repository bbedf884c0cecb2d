//! Layered configuration loading using figment.
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. A TOML file: `--config PATH`, or `atelier.toml` in the working
//!    directory when present
//! 3. Environment variables prefixed `ATELIER_`, with `__` separating
//!    sections (`ATELIER_DATABASE__URL` sets `database.url`). `ATELIER_LOG`
//!    is the tracing filter read by [`crate::telemetry`] and is skipped here.

mod error;

pub use error::ConfigError;

use crate::board::domain::Vocabulary;
use crate::board::services::{BoardSettings, DEFAULT_MAX_ATTACHMENT_BYTES};
use crate::dashboard::{DEFAULT_PAGE_SIZE, DEFAULT_WINDOW_THRESHOLD, ListingSettings};
use camino::{Utf8Path, Utf8PathBuf};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "atelier.toml";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "ATELIER_";

/// Prefixed variables that are not configuration keys.
const IGNORED_ENV_KEYS: &[&str] = &["LOG"];

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/atelier".to_owned(),
            max_connections: 8,
        }
    }
}

/// Attachment storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentsConfig {
    /// Directory holding uploaded files.
    pub upload_dir: Utf8PathBuf,
    /// Path prefix under which clients fetch uploads.
    pub public_prefix: String,
    /// Largest accepted upload, in bytes.
    pub max_bytes: usize,
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            upload_dir: Utf8PathBuf::from("uploads"),
            public_prefix: "/uploads".to_owned(),
            max_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
        }
    }
}

/// List presentation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows per page.
    pub page_size: usize,
    /// Page count up to which every page link is shown.
    pub window_threshold: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.get(),
            window_threshold: DEFAULT_WINDOW_THRESHOLD,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing-subscriber` filter directive used when `ATELIER_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_owned(),
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtelierConfig {
    /// Database connection.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Attachment storage.
    #[serde(default)]
    pub attachments: AttachmentsConfig,
    /// Reporter and assignee vocabularies.
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// List presentation.
    #[serde(default)]
    pub listing: ListingConfig,
    /// Logging.
    #[serde(default)]
    pub log: LogConfig,
}

impl AtelierConfig {
    /// Loads configuration from defaults, the optional file, and the
    /// environment.
    ///
    /// An explicit `path` must exist; without one, `atelier.toml` is read
    /// only if present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingFile`] when `path` does not exist, or
    /// another [`ConfigError`] when a source cannot be parsed or a value is
    /// out of range.
    pub fn load(path: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        if let Some(explicit) = path
            && !explicit.is_file()
        {
            return Err(ConfigError::MissingFile(explicit.to_path_buf()));
        }
        let config: Self = Self::figment(path).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain without extracting it.
    #[must_use]
    pub fn figment(path: Option<&Utf8Path>) -> Figment {
        let base = Figment::from(Serialized::defaults(Self::default()));
        let with_file = match path {
            Some(explicit) => base.merge(Toml::file(explicit.as_std_path())),
            None => base.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };
        with_file.merge(
            Env::prefixed(ENV_PREFIX)
                .ignore(IGNORED_ENV_KEYS)
                .split("__"),
        )
    }

    /// Checks values that deserialise fine but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listing.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.page_size",
                reason: "must be at least 1",
            });
        }
        if self.listing.window_threshold == 0 {
            return Err(ConfigError::InvalidValue {
                field: "listing.window_threshold",
                reason: "must be at least 1",
            });
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be at least 1",
            });
        }
        if self.attachments.max_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "attachments.max_bytes",
                reason: "must be at least 1",
            });
        }
        if self.vocabulary.normalized().reporters.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "vocabulary.reporters",
                reason: "must name at least one reporter",
            });
        }
        if self.vocabulary.normalized().assignees.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "vocabulary.assignees",
                reason: "must name at least one assignee",
            });
        }
        Ok(())
    }

    /// Service settings derived from this configuration.
    #[must_use]
    pub fn board_settings(&self) -> BoardSettings {
        BoardSettings {
            vocabulary: self.vocabulary.normalized(),
            max_attachment_bytes: self.attachments.max_bytes,
        }
    }

    /// Listing settings derived from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the page size is zero.
    pub fn listing_settings(&self) -> Result<ListingSettings, ConfigError> {
        let page_size =
            NonZeroUsize::new(self.listing.page_size).ok_or(ConfigError::InvalidValue {
                field: "listing.page_size",
                reason: "must be at least 1",
            })?;
        Ok(ListingSettings {
            page_size,
            window_threshold: self.listing.window_threshold,
        })
    }
}
