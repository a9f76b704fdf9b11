//! usergraph Graph — Neo4j client and entity data-access layer.
//!
//! This crate is the single access point for the Neo4j store. Entities
//! declare a label and a closed field schema ([`Entity`]); every query is
//! generated from that schema and bound with parameters, never from
//! whatever keys a caller happens to supply.

pub mod client;
pub mod cypher;
pub mod entity;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod repository;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use entity::{Entity, Field, FieldKind, PropertyMap, PropertyValue, Record};
#[cfg(any(test, feature = "test-support"))]
pub use memory::MemoryRepository;
pub use repository::{NodeRepository, Repository};
