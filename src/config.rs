//! Connection configuration.
//!
//! Settings come from environment variables with XDG-compliant defaults:
//!
//! | variable | default |
//! |---|---|
//! | `SQLT_DB` | `$XDG_DATA_HOME/sqlt/<schema>.db` |
//! | `SQLT_SCHEMA` | `tour` |
//! | `SQLT_MAX_CONNECTIONS` | `5` |
//! | `SQLT_ACQUIRE_TIMEOUT` | `5` (seconds) |

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

pub const DEFAULT_SCHEMA: &str = "tour";
const DATA_DIR_NAME: &str = "sqlt";

#[derive(Error, Diagnostic, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}'")]
    #[diagnostic(code(sql_tour::config::invalid))]
    Invalid { key: String, value: String },

    #[error("Cannot determine data directory")]
    #[diagnostic(
        code(sql_tour::config::no_data_dir),
        help("Set HOME, XDG_DATA_HOME, or point SQLT_DB at a database file.")
    )]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Everything needed to open a database session.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    /// Database file.
    pub path: PathBuf,
    /// Logical database name; selects the default file name.
    pub schema: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    /// When false, a missing file is a connection error instead of a new database.
    pub create_if_missing: bool,
}

impl DatabaseConfig {
    /// Default settings for a database file at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            schema: DEFAULT_SCHEMA.to_string(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
            create_if_missing: true,
        }
    }

    /// Resolve configuration from the process environment.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Resolve configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let schema = lookup("SQLT_SCHEMA")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SCHEMA.to_string());

        let path = match lookup("SQLT_DB").filter(|s| !s.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => data_dir(&lookup)?.join(format!("{}.db", schema)),
        };

        let mut config = Self::with_path(path);
        config.schema = schema;

        if let Some(n) = parse_var::<u32, _>(&lookup, "SQLT_MAX_CONNECTIONS")? {
            if n == 0 {
                return Err(ConfigError::Invalid {
                    key: "SQLT_MAX_CONNECTIONS".to_string(),
                    value: n.to_string(),
                });
            }
            config.max_connections = n;
        }
        if let Some(secs) = parse_var::<u64, _>(&lookup, "SQLT_ACQUIRE_TIMEOUT")? {
            config.acquire_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> ConfigResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                key: key.to_string(),
                value: raw,
            }),
    }
}

fn data_dir<F>(lookup: &F) -> ConfigResult<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    let data_home = lookup("XDG_DATA_HOME")
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .or_else(|| lookup("HOME").map(|home| PathBuf::from(home).join(".local/share")))
        .ok_or(ConfigError::NoDataDir)?;

    Ok(data_home.join(DATA_DIR_NAME))
}
