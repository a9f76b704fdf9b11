//! Error types for the usergraph-api crate.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Config error: {0}")]
    Config(#[from] usergraph_core::CoreError),

    #[error("Graph error: {0}")]
    Graph(#[from] usergraph_graph::GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
