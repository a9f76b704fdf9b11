//! In-memory [`Repository`] for tests that run without Neo4j.
//!
//! Ids are assigned from a counter and never reused, matching the way the
//! store hands out node identities within a test run.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use tokio::sync::RwLock;
use usergraph_core::NodeId;

use crate::client::GraphError;
use crate::cypher;
use crate::entity::{Entity, PropertyMap, Record};
use crate::repository::Repository;

#[derive(Default)]
struct Nodes {
    next_id: i64,
    by_id: BTreeMap<i64, PropertyMap>,
}

pub struct MemoryRepository<E> {
    nodes: RwLock<Nodes>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> MemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Nodes::default()),
            _entity: PhantomData,
        }
    }

    /// Number of stored nodes.
    pub async fn len(&self) -> usize {
        self.nodes.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<E: Entity> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn to_record<E: Entity>(id: i64, props: &PropertyMap) -> Result<Record<E>, GraphError> {
    Ok(Record::new(NodeId(id), E::from_properties(props)?))
}

#[async_trait]
impl<E: Entity> Repository<E> for MemoryRepository<E> {
    async fn create(&self, entity: &E) -> Result<Record<E>, GraphError> {
        // Same schema check as the Cypher path.
        let props: PropertyMap = cypher::create(entity)?.params.into_iter().collect();
        let mut nodes = self.nodes.write().await;
        let id = nodes.next_id;
        nodes.next_id += 1;
        let record = to_record(id, &props)?;
        nodes.by_id.insert(id, props);
        Ok(record)
    }

    async fn get(&self, id: NodeId) -> Result<Option<Record<E>>, GraphError> {
        let nodes = self.nodes.read().await;
        nodes
            .by_id
            .get(&id.0)
            .map(|props| to_record(id.0, props))
            .transpose()
    }

    async fn get_all(&self) -> Result<Vec<Record<E>>, GraphError> {
        let nodes = self.nodes.read().await;
        nodes
            .by_id
            .iter()
            .map(|(id, props)| to_record(*id, props))
            .collect()
    }

    async fn update(&self, id: NodeId, entity: &E) -> Result<Option<Record<E>>, GraphError> {
        let changes = cypher::update(id, entity)?.params;
        let mut nodes = self.nodes.write().await;
        let Some(props) = nodes.by_id.get_mut(&id.0) else {
            return Ok(None);
        };
        for (name, value) in changes {
            if name != cypher::ID_PARAM {
                props.insert(name, value);
            }
        }
        to_record(id.0, props).map(Some)
    }

    async fn delete(&self, id: NodeId) -> Result<bool, GraphError> {
        Ok(self.nodes.write().await.by_id.remove(&id.0).is_some())
    }
}
