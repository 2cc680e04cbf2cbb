//! Database connection configuration
//!
//! Resolution order (later wins):
//! 1. Built-in defaults (local development database)
//! 2. TOML file: `$LIGHTBNB_CONFIG`, else `~/.lightbnb/config.toml`, table `[database]`
//! 3. `LIGHTBNB_DB_*` environment variables
//! 4. `DATABASE_URL`, which replaces the individual connection fields
//!
//! `.env` files are loaded first with dotenvy and never overwrite variables
//! that are already set.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqlx::postgres::PgConnectOptions;
use tracing::{debug, info};

use crate::error::{DbError, Result};

const ENV_URL: &str = "DATABASE_URL";
const ENV_CONFIG_PATH: &str = "LIGHTBNB_CONFIG";
const ENV_USER: &str = "LIGHTBNB_DB_USER";
const ENV_PASSWORD: &str = "LIGHTBNB_DB_PASSWORD";
const ENV_HOST: &str = "LIGHTBNB_DB_HOST";
const ENV_PORT: &str = "LIGHTBNB_DB_PORT";
const ENV_NAME: &str = "LIGHTBNB_DB_NAME";
const ENV_MAX_CONNECTIONS: &str = "LIGHTBNB_DB_MAX_CONNECTIONS";

/// Connection settings for the LightBnB database
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DbConfig {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database: String,
    pub max_connections: u32,
    /// Full connection string; when set, the fields above except
    /// `max_connections` are ignored
    pub url: Option<String>,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            user: "vagrant".to_string(),
            password: "123".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            database: "lightbnb".to_string(),
            max_connections: 5,
            url: None,
        }
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    database: DbConfig,
}

impl DbConfig {
    /// Load configuration from .env files, the TOML file and the environment.
    pub fn load() -> Result<Self> {
        load_dotenv();

        let mut config = match config_path() {
            Some(path) if path.exists() => Self::from_toml_file(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse the `[database]` table of a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(contents)
            .map_err(|e| DbError::config(format!("invalid config TOML: {}", e)))?;
        Ok(file.database)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| DbError::config(format!("failed to read {}: {}", path.display(), e)))?;
        info!("Loaded database config from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user) = lookup(ENV_USER) {
            self.user = user;
        }
        if let Some(password) = lookup(ENV_PASSWORD) {
            self.password = password;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .parse()
                .map_err(|_| DbError::config(format!("{} is not a port: {}", ENV_PORT, port)))?;
        }
        if let Some(name) = lookup(ENV_NAME) {
            self.database = name;
        }
        if let Some(max) = lookup(ENV_MAX_CONNECTIONS) {
            self.max_connections = max.parse().map_err(|_| {
                DbError::config(format!("{} is not a number: {}", ENV_MAX_CONNECTIONS, max))
            })?;
        }
        if let Some(url) = lookup(ENV_URL).filter(|u| !u.is_empty()) {
            self.url = Some(url);
        }
        Ok(())
    }

    /// Connection options for sqlx.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(url) = &self.url {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|e| DbError::config(format!("invalid {}: {}", ENV_URL, e)));
        }

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database))
    }
}

/// Path of the TOML config file, if one can be determined.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the lightbnb config directory path (~/.lightbnb)
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".lightbnb"))
}

/// Load .env from the current directory, then ~/.lightbnb/.env.
///
/// dotenvy doesn't overwrite existing vars, so the current directory wins.
pub fn load_dotenv() {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded .env from current directory: {}", path.display());
    }

    if let Some(env_file) = config_dir().map(|dir| dir.join(".env")) {
        if env_file.exists() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => debug!("Loaded .env from {}", env_file.display()),
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_db() {
        let config = DbConfig::default();
        assert_eq!(config.host, "localhost");
        assert_eq!(config.database, "lightbnb");
        assert_eq!(config.max_connections, 5);
        assert!(config.url.is_none());
    }

    #[test]
    fn toml_overrides_some_fields() {
        let config = DbConfig::from_toml_str(
            r#"
            [database]
            host = "db.internal"
            port = 6543
            "#,
        )
        .unwrap();
        assert_eq!(config.host, "db.internal");
        assert_eq!(config.port, 6543);
        assert_eq!(config.user, "vagrant");
    }

    #[test]
    fn toml_without_database_table() {
        let config = DbConfig::from_toml_str("").unwrap();
        assert_eq!(config, DbConfig::default());
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = DbConfig::from_toml_str("[database]\nport = \"x\"").unwrap_err();
        assert!(matches!(err, DbError::Config(_)));
    }

    #[test]
    fn reads_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[database]\ndatabase = \"lightbnb_test\"").unwrap();
        let config = DbConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.database, "lightbnb_test");
    }

    #[test]
    fn env_overrides() {
        let mut config = DbConfig::default();
        config
            .apply_env(env(&[
                (ENV_USER, "labber"),
                (ENV_PORT, "5433"),
                (ENV_MAX_CONNECTIONS, "12"),
            ]))
            .unwrap();
        assert_eq!(config.user, "labber");
        assert_eq!(config.port, 5433);
        assert_eq!(config.max_connections, 12);
        assert_eq!(config.host, "localhost");
    }

    #[test]
    fn bad_port_rejected() {
        let mut config = DbConfig::default();
        let err = config.apply_env(env(&[(ENV_PORT, "abc")])).unwrap_err();
        assert!(err.to_string().contains("LIGHTBNB_DB_PORT"));
    }

    #[test]
    fn database_url_wins() {
        let mut config = DbConfig::default();
        config
            .apply_env(env(&[(ENV_URL, "postgres://alice:pw@db.example.com:6000/bnb")]))
            .unwrap();
        let opts = config.connect_options().unwrap();
        assert_eq!(opts.get_host(), "db.example.com");
        assert_eq!(opts.get_port(), 6000);
        assert_eq!(opts.get_username(), "alice");
        assert_eq!(opts.get_database(), Some("bnb"));
    }

    #[test]
    fn options_from_fields() {
        let opts = DbConfig::default().connect_options().unwrap();
        assert_eq!(opts.get_host(), "localhost");
        assert_eq!(opts.get_port(), 5432);
        assert_eq!(opts.get_username(), "vagrant");
        assert_eq!(opts.get_database(), Some("lightbnb"));
    }

    #[test]
    fn debug_redacts_secrets() {
        let config = DbConfig {
            url: Some("postgres://u:hunter2@h/d".into()),
            ..DbConfig::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("123"));
        assert!(!debug.contains("hunter2"));
    }
}
