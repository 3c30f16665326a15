//! Todo record and identifier types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Store-assigned todo identifier.
///
/// Wraps a MongoDB `ObjectId`. Only 24-character hex strings parse;
/// anything else is rejected before the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TodoId(ObjectId);

impl TodoId {
    /// Generate a fresh identifier (used by the in-memory store)
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a path segment into an identifier
    pub fn parse(value: &str) -> Option<Self> {
        ObjectId::parse_str(value).ok().map(Self)
    }

    /// The underlying `ObjectId`
    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for TodoId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(s).map(Self)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse().map_err(serde::de::Error::custom)
    }
}

/// A persisted todo, as returned to HTTP clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: TodoId,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Materialize a record from an insert payload and its assigned id
    pub fn from_new(id: TodoId, new: NewTodo) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            completed: new.completed,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }
}

/// A todo that has not been inserted yet (no id)
#[derive(Debug, Clone, PartialEq)]
pub struct NewTodo {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Current time truncated to the store's millisecond resolution.
///
/// Truncating up front keeps the value returned to clients identical to
/// what a round trip through BSON dates would yield.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}
