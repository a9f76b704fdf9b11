//! Configuration management for usergraph services.
//!
//! Configuration is loaded from (in priority order):
//! 1. Environment variables (USERGRAPH__ prefix, `__` between sections)
//! 2. Config file (usergraph.toml)
//! 3. Defaults

use serde::Deserialize;

use crate::error::CoreError;

/// Environment variable prefix, e.g. `USERGRAPH__NEO4J__PASSWORD`.
pub const ENV_PREFIX: &str = "USERGRAPH";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub neo4j: Neo4jConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind (default: 127.0.0.1).
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on (default: 4000).
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Neo4j connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Neo4jConfig {
    #[serde(default = "default_uri")]
    pub uri: String,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Upper bound on pooled Bolt connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Rows pulled per round trip when streaming results.
    #[serde(default = "default_fetch_size")]
    pub fetch_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    4000
}

fn default_uri() -> String {
    "bolt://localhost:7687".to_string()
}

fn default_user() -> String {
    "neo4j".to_string()
}

fn default_password() -> String {
    "neo4j".to_string()
}

fn default_max_connections() -> u32 {
    16
}

fn default_fetch_size() -> usize {
    256
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for Neo4jConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            user: default_user(),
            password: default_password(),
            max_connections: default_max_connections(),
            fetch_size: default_fetch_size(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `<file_prefix>.toml` (optional) and the
    /// `USERGRAPH__` environment.
    pub fn load(file_prefix: &str) -> Result<Self, CoreError> {
        Self::from_sources(
            config::File::with_name(file_prefix).required(false),
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
    }

    /// Build configuration from an explicit file source and environment
    /// source. The environment wins over the file.
    pub fn from_sources<F, E>(file: F, env: E) -> Result<Self, CoreError>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let cfg = config::Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?;

        let app: AppConfig = cfg.try_deserialize()?;
        tracing::debug!(
            bind = %app.server.bind_address(),
            neo4j_uri = %app.neo4j.uri,
            "Configuration loaded"
        );
        Ok(app)
    }
}
