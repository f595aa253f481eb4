//! Configuration error taxonomy.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while resolving the application configuration.
///
/// `EnvironmentNotSet` is soft: the YAML source catches it and contributes
/// an empty mapping. Every other variant aborts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The environment-name variable is absent from the process environment.
    #[error("environment variable {variable} is not set")]
    EnvironmentNotSet { variable: &'static str },

    /// An environment was selected but its config file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A config file exists but is not a well-formed YAML mapping.
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A config or secret file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The merged configuration does not match the schema: a required
    /// field is missing, a value has the wrong shape, or an unknown key
    /// is present.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}
