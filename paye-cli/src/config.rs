//! `paye.toml` configuration and its merge with command-line flags.
//!
//! ```toml
//! currency = "NGN"
//! user = "ada"
//! log_level = "info"
//!
//! [database]
//! backend = "sqlite"
//! connection_string = "paye.db"
//!
//! [[custom_categories]]
//! label = "Union Dues"
//! is_tax_deductible = true
//! ```

use std::path::{Path, PathBuf};

use paye_core::{CategoryTable, CustomCategory, DbConfig};
use serde::Deserialize;
use thiserror::Error;

use crate::cli::GlobalArgs;
use crate::currency::Currency;

pub const DEFAULT_CONFIG_FILE: &str = "paye.toml";
pub const DEFAULT_USER: &str = "local";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Currency(#[from] crate::currency::UnknownCurrencyError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
}

/// Contents of the config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub database: DatabaseSection,
    pub currency: Option<Currency>,
    pub user: Option<String>,
    pub log_level: Option<String>,
    pub custom_categories: Vec<CustomCategory>,
}

impl FileConfig {
    pub fn parse(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads `path` when given, otherwise `paye.toml` if it exists.
    /// A missing default file yields an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !required && !path.is_file() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::parse(&text, &path)
    }
}

/// Effective settings after applying flags over the file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub db: DbConfig,
    pub currency: Currency,
    pub user: String,
    pub log_level: String,
    pub categories: CategoryTable,
}

impl Settings {
    /// `--db` without `--backend` selects the sqlite backend.
    pub fn resolve(
        file: FileConfig,
        args: &GlobalArgs,
    ) -> Result<Self, ConfigError> {
        let defaults = DbConfig::default();

        let backend = match (&args.backend, &args.db) {
            (Some(backend), _) => backend.clone(),
            (None, Some(_)) => "sqlite".to_string(),
            (None, None) => file.database.backend.unwrap_or(defaults.backend),
        };
        let connection_string = args
            .db
            .clone()
            .or(file.database.connection_string)
            .unwrap_or(defaults.connection_string);

        let currency = match &args.currency {
            Some(code) => code.parse()?,
            None => file.currency.unwrap_or_default(),
        };

        Ok(Self {
            db: DbConfig::new(backend, connection_string),
            currency,
            user: args
                .user
                .clone()
                .or(file.user)
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            categories: CategoryTable::common().with_custom(file.custom_categories),
        })
    }
}
