//! usergraph-core: Shared types, configuration, and error handling for the usergraph API.
//!
//! This crate provides the foundational types used across all usergraph components:
//! - The User entity (properties, gender codes) and node identifiers
//! - Layered configuration for the HTTP server and the Neo4j connection
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, Neo4jConfig, ServerConfig};
pub use error::CoreError;
pub use types::{Gender, NodeId, UserProps};
