//! Error types shared across the crate.

use std::path::PathBuf;

use crate::validation::ErrorMap;

/// Failure reading or writing the durable key-value backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failure loading the configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Locale(#[from] crate::i18n::UnknownLocale),

    #[error("Page size must be at least 1")]
    PageSize,
}

/// Why a form submission did not reach the store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Form has {} invalid field(s)", .0.len())]
    Invalid(ErrorMap),

    #[error("Employee not found: {0}")]
    NotFound(String),
}
