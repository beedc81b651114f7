//! Configuration loading and management
//!
//! Settings are layered: built-in defaults, then an optional YAML file, then
//! environment variables and command-line flags (flags win over variables).

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

const DEFAULT_SQLITE_URL: &str = "sqlite://MvcMovie.db?mode=rwc";

/// Hosting environment
///
/// Development error pages include the underlying error; production pages
/// show a generic message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[value(alias = "dev")]
    #[serde(alias = "dev")]
    Development,
    #[default]
    #[value(alias = "prod")]
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Which movie store to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[value(alias = "in-memory")]
    #[serde(alias = "in-memory", alias = "in_memory")]
    Memory,
    Sqlite,
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(feature = "sqlite") {
            StorageBackend::Sqlite
        } else {
            StorageBackend::Memory
        }
    }
}

/// Datastore settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Connection string for relational backends
    #[serde(default)]
    pub connection_string: Option<String>,
}

impl DatabaseConfig {
    /// The configured connection string, or the default SQLite file
    pub fn connection_string(&self) -> &str {
        self.connection_string
            .as_deref()
            .unwrap_or(DEFAULT_SQLITE_URL)
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind: SocketAddr,
    pub environment: Environment,
    pub database: DatabaseConfig,
    /// Insert the baseline movies into an empty store on startup
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::merge(CliArgs::default(), PartialConfig::default())
    }
}

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mvc-movie", version, about = "Movie catalog web application")]
pub struct CliArgs {
    #[arg(
        long,
        env = "MVC_MOVIE_CONFIG",
        value_name = "FILE",
        help = "Path to a YAML configuration file"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = "MVC_MOVIE_BIND",
        value_name = "ADDR",
        help = "Address the HTTP server listens on"
    )]
    pub bind: Option<SocketAddr>,

    #[arg(
        long,
        env = "MVC_MOVIE_ENVIRONMENT",
        value_enum,
        value_name = "ENV",
        help = "Hosting environment (development or production)"
    )]
    pub environment: Option<Environment>,

    #[arg(
        long,
        env = "MVC_MOVIE_BACKEND",
        value_enum,
        value_name = "BACKEND",
        help = "Movie store backend (memory or sqlite)"
    )]
    pub backend: Option<StorageBackend>,

    #[arg(
        long,
        env = "MVC_MOVIE_DATABASE_URL",
        value_name = "URL",
        help = "Connection string for the relational store"
    )]
    pub database_url: Option<String>,

    #[arg(
        long,
        env = "MVC_MOVIE_NO_SEED",
        help = "Skip inserting the baseline movies on startup"
    )]
    pub no_seed: bool,
}

/// Shape of the YAML file; every key is optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialConfig {
    bind: Option<SocketAddr>,
    environment: Option<Environment>,
    #[serde(default)]
    database: PartialDatabaseConfig,
    seed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct PartialDatabaseConfig {
    backend: Option<StorageBackend>,
    connection_string: Option<String>,
}

impl AppConfig {
    /// Resolve configuration from parsed command-line arguments
    pub fn from_args(args: CliArgs) -> Result<Self> {
        let file = match args.config.as_deref() {
            Some(path) => load_config_file(path)?,
            None => PartialConfig::default(),
        };
        Ok(Self::merge(args, file))
    }

    /// Load configuration from a YAML string (no CLI overrides)
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let file: PartialConfig =
            serde_yaml::from_str(yaml).context("failed to parse YAML config")?;
        Ok(Self::merge(CliArgs::default(), file))
    }

    /// Load configuration from a YAML file (no CLI overrides)
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = load_config_file(path.as_ref())?;
        Ok(Self::merge(CliArgs::default(), file))
    }

    fn merge(cli: CliArgs, file: PartialConfig) -> Self {
        let bind = cli
            .bind
            .or(file.bind)
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)));

        Self {
            bind,
            environment: cli.environment.or(file.environment).unwrap_or_default(),
            database: DatabaseConfig {
                backend: cli
                    .backend
                    .or(file.database.backend)
                    .unwrap_or_default(),
                connection_string: cli.database_url.or(file.database.connection_string),
            },
            seed: !cli.no_seed && file.seed.unwrap_or(true),
        }
    }
}

fn load_config_file(path: &Path) -> Result<PartialConfig> {
    if !path.exists() {
        anyhow::bail!("config file {:?} does not exist", path);
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {:?}", path))?;
    serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse YAML config {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.bind.to_string(), "127.0.0.1:5000");
        assert_eq!(config.environment, Environment::Production);
        assert!(config.seed);
        assert_eq!(config.database.connection_string(), DEFAULT_SQLITE_URL);
    }

    #[test]
    fn test_yaml_overrides_defaults() {
        let config = AppConfig::from_yaml_str(
            r#"
bind: "0.0.0.0:8080"
environment: development
database:
  backend: memory
seed: false
"#,
        )
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert!(config.environment.is_development());
        assert_eq!(config.database.backend, StorageBackend::Memory);
        assert!(!config.seed);
    }

    #[test]
    fn test_cli_overrides_yaml() {
        let file: PartialConfig = serde_yaml::from_str(
            r#"
bind: "0.0.0.0:8080"
database:
  backend: sqlite
  connection_string: "sqlite://file.db"
"#,
        )
        .unwrap();
        let cli = CliArgs::parse_from([
            "mvc-movie",
            "--bind",
            "127.0.0.1:9000",
            "--database-url",
            "sqlite://cli.db",
            "--no-seed",
        ]);

        let config = AppConfig::merge(cli, file);
        assert_eq!(config.bind.port(), 9000);
        assert_eq!(config.database.backend, StorageBackend::Sqlite);
        assert_eq!(config.database.connection_string(), "sqlite://cli.db");
        assert!(!config.seed);
    }

    #[test]
    fn test_unknown_yaml_key_rejected() {
        assert!(AppConfig::from_yaml_str("port: 80").is_err());
    }

    #[test]
    fn test_backend_aliases() {
        let config = AppConfig::from_yaml_str("database:\n  backend: in-memory\n").unwrap();
        assert_eq!(config.database.backend, StorageBackend::Memory);
    }
}
