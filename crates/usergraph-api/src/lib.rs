//! usergraph-api: GraphQL over HTTP for the usergraph store.
//!
//! The schema layer is a thin adapter: every resolver parses its
//! arguments and hands off to a [`usergraph_graph::Repository`] found in the
//! schema context. The server mounts the schema at a single `/graphql` path.

pub mod error;
pub mod schema;
pub mod server;

pub use error::ApiError;
pub use schema::{build_schema, sdl, AppSchema};
