//! Neo4j connection management and shared graph client.

use neo4rs::{ConfigBuilder, Graph, Query};
use usergraph_core::{CoreError, Neo4jConfig};

/// Errors from graph operations.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("Neo4j query error: {0}")]
    Query(#[from] neo4rs::Error),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Unknown field {field:?} for label {label}")]
    UnknownField { label: &'static str, field: String },

    #[error("{operation} on {label} returned no rows")]
    EmptyResult {
        label: &'static str,
        operation: &'static str,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Neo4jConfig::default().into()
    }
}

impl From<Neo4jConfig> for GraphConfig {
    fn from(config: Neo4jConfig) -> Self {
        Self {
            uri: config.uri,
            user: config.user,
            password: config.password,
            max_connections: config.max_connections,
            fetch_size: config.fetch_size,
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// Constructed once at startup and handed to every repository that needs
/// it. Clone is cheap (inner Arc).
///
/// Each call below checks a connection out of the pool for the duration of
/// that call only. The connection travels with the row stream and goes back
/// to the pool when the stream is dropped, on success and on error alike.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Connect to Neo4j with the given configuration.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(Self { graph })
    }

    /// Release this handle. Repositories hold their own clones, so the pool
    /// only shuts down once those are dropped as well.
    pub fn close(self) {
        drop(self.graph);
        tracing::info!("Neo4j client handle released");
    }

    /// Execute a query and discard its results.
    pub async fn run(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await?;
        Ok(())
    }

    /// Execute a query and collect all rows.
    pub async fn query_rows(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a read query and return the first row, if any.
    pub async fn query_one(&self, query: Query) -> Result<Option<neo4rs::Row>, GraphError> {
        let mut stream = self.graph.execute(query).await?;
        Ok(stream.next().await?)
    }
}
