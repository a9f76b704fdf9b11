//! CRUD over entity nodes.

use std::marker::PhantomData;

use async_trait::async_trait;
use usergraph_core::NodeId;

use crate::client::{GraphClient, GraphError};
use crate::cypher;
use crate::entity::{record_from_node, Entity, Record};

/// Data-access contract for one entity type.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    /// Create a node from the entity's present properties.
    async fn create(&self, entity: &E) -> Result<Record<E>, GraphError>;

    /// Fetch one node. `None` when no node has this id.
    async fn get(&self, id: NodeId) -> Result<Option<Record<E>>, GraphError>;

    /// Fetch every node of this entity's label, ordered by id.
    async fn get_all(&self) -> Result<Vec<Record<E>>, GraphError>;

    /// Overwrite the entity's present properties, leaving others untouched.
    /// `None` when no node has this id.
    async fn update(&self, id: NodeId, entity: &E) -> Result<Option<Record<E>>, GraphError>;

    /// Remove a node. Returns whether one was removed; a missing id is not an error.
    async fn delete(&self, id: NodeId) -> Result<bool, GraphError>;
}

/// Neo4j-backed repository.
pub struct NodeRepository<E> {
    client: GraphClient,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> NodeRepository<E> {
    pub fn new(client: GraphClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }
}

fn decode<E: Entity>(row: &neo4rs::Row) -> Result<Record<E>, GraphError> {
    let node: neo4rs::Node = row
        .get("n")
        .map_err(|e| GraphError::Deserialization(format!("Failed to deserialize node: {e}")))?;
    record_from_node(&node)
}

#[async_trait]
impl<E: Entity> Repository<E> for NodeRepository<E> {
    async fn create(&self, entity: &E) -> Result<Record<E>, GraphError> {
        let stmt = cypher::create(entity)?;
        let rows = self.client.query_rows(stmt.into_query()).await?;
        let row = rows.first().ok_or(GraphError::EmptyResult {
            label: E::LABEL,
            operation: "create",
        })?;
        let record = decode(row)?;
        tracing::debug!(label = E::LABEL, id = %record.id, "Created node");
        Ok(record)
    }

    async fn get(&self, id: NodeId) -> Result<Option<Record<E>>, GraphError> {
        let stmt = cypher::get::<E>(id);
        match self.client.query_one(stmt.into_query()).await? {
            Some(row) => Ok(Some(decode(&row)?)),
            None => {
                tracing::debug!(label = E::LABEL, %id, "Node not found");
                Ok(None)
            }
        }
    }

    async fn get_all(&self) -> Result<Vec<Record<E>>, GraphError> {
        let rows = self
            .client
            .query_rows(cypher::get_all::<E>().into_query())
            .await?;
        let records = rows.iter().map(decode::<E>).collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(label = E::LABEL, count = records.len(), "Listed nodes");
        Ok(records)
    }

    async fn update(&self, id: NodeId, entity: &E) -> Result<Option<Record<E>>, GraphError> {
        let stmt = cypher::update(id, entity)?;
        let rows = self.client.query_rows(stmt.into_query()).await?;
        match rows.first() {
            Some(row) => {
                tracing::debug!(label = E::LABEL, %id, "Updated node");
                Ok(Some(decode(row)?))
            }
            None => {
                tracing::debug!(label = E::LABEL, %id, "Update matched no node");
                Ok(None)
            }
        }
    }

    async fn delete(&self, id: NodeId) -> Result<bool, GraphError> {
        let rows = self
            .client
            .query_rows(cypher::delete::<E>(id).into_query())
            .await?;
        let deleted: i64 = match rows.first() {
            Some(row) => row
                .get("deleted")
                .map_err(|e| GraphError::Deserialization(format!("Failed to read count: {e}")))?,
            None => 0,
        };
        tracing::debug!(label = E::LABEL, %id, deleted, "Deleted node");
        Ok(deleted > 0)
    }
}
