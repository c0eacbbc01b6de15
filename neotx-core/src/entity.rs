//! Nodes and relationships as the `rest` result format renders them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_type_name, NeoTxError};

/// Extract the numeric id at the end of an entity URI such as
/// `http://localhost:7474/db/data/node/42` or `.../relationship/7`.
pub fn id_from_uri(uri: &str) -> Option<u64> {
    let (prefix, id) = uri.trim_end_matches('/').rsplit_once('/')?;
    match prefix.rsplit('/').next() {
        Some("node") | Some("relationship") => id.parse().ok(),
        _ => None,
    }
}

fn required_id(uri: &str, what: &str) -> Result<u64, NeoTxError> {
    id_from_uri(uri).ok_or_else(|| NeoTxError::type_mismatch("entity URI", uri, what))
}

fn property<T: DeserializeOwned>(data: &Map<String, Value>, key: &str, owner: &str) -> Result<Option<T>, NeoTxError> {
    match data.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone()).map(Some).map_err(|e| {
            NeoTxError::type_mismatch(std::any::type_name::<T>(), json_type_name(value), &e.to_string())
                .with_context(format!("{owner} property '{key}'"))
        }),
    }
}

/// A node in `rest` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestNode {
    #[serde(rename = "self")]
    pub self_uri: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl RestNode {
    /// Decode a node from a `rest` value.
    pub fn from_value(value: &Value) -> Result<Self, NeoTxError> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
            other => Err(NeoTxError::type_mismatch("Node", json_type_name(other), "RestNode")),
        }
    }

    /// Node id, parsed from the self URI.
    pub fn id(&self) -> Result<u64, NeoTxError> {
        required_id(&self.self_uri, "node self")
    }

    /// Read a property, `None` when absent or null.
    pub fn property<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, NeoTxError> {
        property(&self.data, key, "node")
    }
}

/// A relationship in `rest` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestRelationship {
    #[serde(rename = "self")]
    pub self_uri: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl RestRelationship {
    /// Decode a relationship from a `rest` value.
    pub fn from_value(value: &Value) -> Result<Self, NeoTxError> {
        match value {
            Value::Object(_) => Ok(serde_json::from_value(value.clone())?),
            other => Err(NeoTxError::type_mismatch("Relationship", json_type_name(other), "RestRelationship")),
        }
    }

    pub fn id(&self) -> Result<u64, NeoTxError> {
        required_id(&self.self_uri, "relationship self")
    }

    pub fn start_node(&self) -> Result<u64, NeoTxError> {
        required_id(&self.start, "relationship start")
    }

    pub fn end_node(&self) -> Result<u64, NeoTxError> {
        required_id(&self.end, "relationship end")
    }

    pub fn property<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, NeoTxError> {
        property(&self.data, key, "relationship")
    }
}
