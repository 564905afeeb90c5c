//! Configuration error types.

use thiserror::Error;

/// Errors raised while loading or validating a `LandingConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse failure.
    #[error("Failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failure.
    #[error("Failed to serialize TOML config: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON parse or serialization failure.
    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    /// An environment override held a value of the wrong shape.
    #[error("Invalid value for {var}: {value}")]
    InvalidOverride { var: String, value: String },

    /// A loaded value failed validation.
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}
