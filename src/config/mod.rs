//! Environment-aware configuration system.
//!
//! Builds the application configuration from four sources, merged
//! key-by-key with later sources overriding earlier ones:
//! 1. **Explicit arguments** - Values passed to `resolve()` at startup
//! 2. **Environment variables** - Process environment, matched by field name
//! 3. **Environment YAML file** - `{configs_dir}/{environment}.yaml`, where
//!    the environment name comes from `APPLICATION_ENV`
//! 4. **File secrets** - One file per field inside an optional secrets dir
//!
//! ## Failure semantics
//! - `APPLICATION_ENV` unset: the YAML source contributes nothing and no
//!   error surfaces. Local development works from explicit arguments and
//!   environment variables alone.
//! - `APPLICATION_ENV` set but the file is missing or malformed: hard
//!   error, startup aborts. A configured-but-broken deployment must fail
//!   loudly instead of silently falling back.
//! - The merged result must contain exactly the schema fields, correctly
//!   typed; anything else is a validation error.
//!
//! Resolution runs once before any other component is constructed. There
//! is no reload path.

mod error;
mod merge;
mod resolver;
mod schema;

pub use error::ConfigError;
pub use merge::{deep_merge, deep_merge_all};
pub use resolver::{APP_ENVIRONMENT_VAR, ConfigResolver, config_filename};
pub use schema::{AppConfig, DatabaseDsn, InvalidDsn};
