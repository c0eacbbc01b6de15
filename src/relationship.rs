//! A relationship bound to the client it was loaded through.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::client::Client;
use crate::core::{IntoParamValue, NeoTxError, RestRelationship};
use crate::node::Node;
use crate::statements;

#[derive(Debug, Clone)]
pub struct Relationship {
    client: Client,
    id: u64,
    start: u64,
    end: u64,
    inner: RestRelationship,
}

impl Relationship {
    pub(crate) fn from_rest(client: Client, inner: RestRelationship) -> Result<Self, NeoTxError> {
        Ok(Self {
            id: inner.id()?,
            start: inner.start_node()?,
            end: inner.end_node()?,
            client,
            inner,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Id of the node the relationship leaves.
    pub fn start_node(&self) -> u64 {
        self.start
    }

    pub fn end_node(&self) -> u64 {
        self.end
    }

    pub fn rel_type(&self) -> &str {
        &self.inner.rel_type
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.inner.data
    }

    pub fn property<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, NeoTxError> {
        self.inner.property(key)
    }

    /// Set a property locally until [`save`](Self::save); null removes it.
    pub fn set_property(&mut self, key: impl Into<String>, value: impl IntoParamValue) -> &mut Self {
        let key = key.into();
        match value.into_param_value() {
            Value::Null => {
                self.inner.data.remove(&key);
            }
            value => {
                self.inner.data.insert(key, value);
            }
        }
        self
    }

    pub async fn save(&self) -> Result<(), NeoTxError> {
        let statement = statements::save_relationship(self.id, Value::Object(self.inner.data.clone()));
        self.client.run(statement).await?;
        Ok(())
    }

    pub async fn delete(self) -> Result<(), NeoTxError> {
        self.client.run(statements::delete_relationship(self.id)).await?;
        Ok(())
    }

    /// Load the start node.
    pub async fn load_start_node(&self) -> Result<Node, NeoTxError> {
        self.client.node_by_id(self.start).await
    }

    pub async fn load_end_node(&self) -> Result<Node, NeoTxError> {
        self.client.node_by_id(self.end).await
    }
}
