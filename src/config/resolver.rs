//! Four-source configuration resolution.

use super::error::ConfigError;
use super::merge::deep_merge_all;
use super::schema::AppConfig;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::debug;

/// Environment variable naming the active deployment environment
/// (`dev`, `test`, `staging`, `production`, ...).
pub const APP_ENVIRONMENT_VAR: &str = "APPLICATION_ENV";

/// Default directory holding per-environment config files.
const DEFAULT_CONFIGS_DIR: &str = "configs";

/// Render the config filename for an environment name.
pub fn config_filename(environment: &str) -> String {
    format!("{environment}.yaml")
}

/// Resolves the application configuration from its sources.
///
/// Sources in precedence order, lowest to highest: explicit arguments,
/// process environment variables, the environment-selected YAML file,
/// file-based secrets. Later sources override earlier ones key-by-key.
///
/// The process environment is snapshotted at construction;
/// [`ConfigResolver::with_env_vars`] substitutes the snapshot so tests can
/// exercise environment-dependent behavior without mutating process state.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    configs_dir: PathBuf,
    secrets_dir: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Create a resolver over the current process environment.
    pub fn new() -> Self {
        Self {
            configs_dir: PathBuf::from(DEFAULT_CONFIGS_DIR),
            secrets_dir: None,
            env: std::env::vars().collect(),
        }
    }

    /// Set the directory holding per-environment YAML config files.
    pub fn with_configs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.configs_dir = dir.into();
        self
    }

    /// Set the directory holding file-based secrets.
    pub fn with_secrets_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.secrets_dir = Some(dir.into());
        self
    }

    /// Replace the environment snapshot.
    pub fn with_env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env = vars;
        self
    }

    /// Name of the environment the application is running in.
    pub fn environment_name(&self) -> Result<String, ConfigError> {
        self.env
            .get(APP_ENVIRONMENT_VAR)
            .cloned()
            .ok_or(ConfigError::EnvironmentNotSet {
                variable: APP_ENVIRONMENT_VAR,
            })
    }

    /// Merge all sources in precedence order and validate the result.
    pub fn resolve(&self, explicit: Map<String, Value>) -> Result<AppConfig, ConfigError> {
        let sources = vec![
            Value::Object(explicit),
            Value::Object(self.env_source()),
            Value::Object(self.yaml_source()?),
            Value::Object(self.secrets_source()?),
        ];
        let merged = deep_merge_all(sources);
        serde_json::from_value(merged).map_err(|e| ConfigError::Validation {
            message: e.to_string(),
        })
    }

    /// Environment-variable source: declared schema fields only, looked up
    /// by upper-cased name first, exact name as fallback. Everything else
    /// in the process environment is not configuration.
    fn env_source(&self) -> Map<String, Value> {
        let mut out = Map::new();
        for field in AppConfig::FIELD_NAMES {
            let value = self
                .env
                .get(&field.to_uppercase())
                .or_else(|| self.env.get(*field));
            if let Some(value) = value {
                out.insert(field.to_string(), Value::String(value.clone()));
            }
        }
        out
    }

    /// Environment-selected YAML file source.
    ///
    /// No environment selected means no contribution. A selected-but-missing
    /// or malformed file is a hard error.
    fn yaml_source(&self) -> Result<Map<String, Value>, ConfigError> {
        let environment = match self.environment_name() {
            Ok(name) => name,
            Err(ConfigError::EnvironmentNotSet { variable }) => {
                debug!(variable, "environment not set, config file source skipped");
                return Ok(Map::new());
            }
            Err(e) => return Err(e),
        };

        let path = self.configs_dir.join(config_filename(&environment));
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound { path: path.clone() }
            } else {
                ConfigError::Io {
                    path: path.clone(),
                    source: e,
                }
            }
        })?;

        // An empty document is an empty contribution; anything present must
        // be a mapping.
        let parsed: Option<Map<String, Value>> = serde_yaml::from_str(&contents)
            .map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            })?;
        Ok(parsed.unwrap_or_default())
    }

    /// File-secret source: for each declared schema field, a file of that
    /// name inside the secrets directory, its trimmed contents being the
    /// value. A missing directory or missing files contribute nothing.
    fn secrets_source(&self) -> Result<Map<String, Value>, ConfigError> {
        let mut out = Map::new();
        let Some(ref dir) = self.secrets_dir else {
            return Ok(out);
        };
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "secrets directory missing, secret file source skipped");
            return Ok(out);
        }
        for field in AppConfig::FIELD_NAMES {
            let path = dir.join(field);
            match std::fs::read_to_string(&path) {
                Ok(contents) => {
                    out.insert(field.to_string(), Value::String(contents.trim().to_string()));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(ConfigError::Io { path, source: e }),
            }
        }
        Ok(out)
    }
}
