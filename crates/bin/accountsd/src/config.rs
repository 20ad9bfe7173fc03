//! Daemon settings: an optional TOML file, then `ACCOUNTS_*` environment
//! variables on top.
//!
//! ```toml
//! listen = "127.0.0.1:8080"
//! database_url = "sqlite:/var/lib/accounts/accounts.db"
//! log = "accounts=debug"
//! ```

use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// File read when `ACCOUNTS_CONFIG` does not name one.
const DEFAULT_PATH: &str = "accounts.toml";

/// Settings for one `accountsd` process.
#[derive(Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Socket address the HTTP server binds.
    pub listen: SocketAddr,
    /// `SQLite` URL of the accounts database.
    pub database_url: String,
    /// `tracing` filter directive.
    pub log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from((Ipv4Addr::UNSPECIFIED, 3000)),
            database_url: "sqlite:accounts.db?mode=rwc".to_string(),
            log: "accountsd=info,accounts=info,tower_http=debug".to_string(),
        }
    }
}

impl Config {
    /// Read the config file and apply environment overrides.
    ///
    /// `ACCOUNTS_CONFIG` names the file; when unset, `accounts.toml` in the
    /// working directory is read if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, an
    /// override cannot be parsed, or the result is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var_os("ACCOUNTS_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::from_file(Path::new(DEFAULT_PATH)).or_else(|err| match err {
                ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                    Ok(Self::default())
                }
                err => Err(err),
            })?,
        };
        config.override_with(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `ACCOUNTS_LISTEN` replaces the whole address, `ACCOUNTS_PORT` only the
    /// port. `ACCOUNTS_LOG` wins over `RUST_LOG`.
    fn override_with(
        &mut self,
        var: impl Fn(&'static str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(value) = var("ACCOUNTS_LISTEN") {
            self.listen = value
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("ACCOUNTS_LISTEN", value))?;
        }
        if let Some(value) = var("ACCOUNTS_PORT") {
            let port = value
                .parse()
                .map_err(|_| ConfigError::InvalidEnv("ACCOUNTS_PORT", value))?;
            self.listen.set_port(port);
        }
        if let Some(value) = var("ACCOUNTS_DATABASE_URL") {
            self.database_url = value;
        }
        if let Some(value) = var("ACCOUNTS_LOG").or_else(|| var("RUST_LOG")) {
            self.log = value;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.listen.port() == 0 {
            return Err(ConfigError::Invalid("listen port must be non-zero"));
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid("database_url must not be empty"));
        }
        Ok(())
    }
}

/// Why the daemon could not be configured.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{0} has an unusable value {1:?}")]
    InvalidEnv(&'static str, String),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}
