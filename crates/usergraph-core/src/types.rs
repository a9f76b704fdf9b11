//! Core domain types for the usergraph API.
//!
//! A user is stored as a single `User` node. Its identifier is not a node
//! property: it is the store's internal node identity, surfaced to clients
//! as a decimal string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ── Node Identity ────────────────────────────────────────────────

/// Store-assigned identity of a node (`id(n)` in Cypher).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub i64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(NodeId)
            .map_err(|_| CoreError::InvalidId(s.to_string()))
    }
}

impl From<i64> for NodeId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

// ── User ─────────────────────────────────────────────────────────

/// Gender of a user, stored on the node as its integer code.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    NonSpecified,
    Female,
    Male,
    NonBinary,
}

impl Gender {
    /// Integer code persisted in the graph.
    pub fn code(self) -> i64 {
        match self {
            Self::NonSpecified => 0,
            Self::Female => 1,
            Self::Male => 2,
            Self::NonBinary => 3,
        }
    }
}

impl TryFrom<i64> for Gender {
    type Error = CoreError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::NonSpecified),
            1 => Ok(Self::Female),
            2 => Ok(Self::Male),
            3 => Ok(Self::NonBinary),
            other => Err(CoreError::InvalidGender(other)),
        }
    }
}

/// Properties of a User node. Every field is optional; on update only the
/// fields that are `Some` are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProps {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<Gender>,
}
