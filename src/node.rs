//! A node bound to the client it was loaded through.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::client::{rest_path, Client};
use crate::core::{IntoParamValue, Method, NeoTxError, RestNode};
use crate::relationship::Relationship;
use crate::statements::{self, Direction};

/// Property changes are local until [`save`](Self::save).
#[derive(Debug, Clone)]
pub struct Node {
    client: Client,
    id: u64,
    inner: RestNode,
}

impl Node {
    pub(crate) fn from_rest(client: Client, inner: RestNode) -> Result<Self, NeoTxError> {
        let id = inner.id()?;
        Ok(Self { client, id, inner })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn self_uri(&self) -> &str {
        &self.inner.self_uri
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.inner.data
    }

    pub fn property<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, NeoTxError> {
        self.inner.property(key)
    }

    /// Set a property locally; null removes it.
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

    /// Replace the stored properties with the local ones.
    pub async fn save(&self) -> Result<(), NeoTxError> {
        let statement = statements::set_properties(self.id, Value::Object(self.inner.data.clone()))?;
        self.client.run(statement).await?;
        Ok(())
    }

    /// Delete the node. Without `force` the server refuses while it still
    /// has relationships.
    pub async fn delete(self, force: bool) -> Result<(), NeoTxError> {
        self.client.run(statements::delete_node(self.id, force)).await?;
        Ok(())
    }

    pub async fn create_relationship_to(
        &self,
        to: &Node,
        rel_type: &str,
        props: Value,
    ) -> Result<Relationship, NeoTxError> {
        create_relationship(&self.client, self.id, to.id, rel_type, props).await
    }

    pub async fn create_relationship_from(
        &self,
        from: &Node,
        rel_type: &str,
        props: Value,
    ) -> Result<Relationship, NeoTxError> {
        create_relationship(&self.client, from.id, self.id, rel_type, props).await
    }

    pub async fn relationships(
        &self,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> Result<Vec<Relationship>, NeoTxError> {
        let statement = statements::relationships(self.id, direction, rel_type)?;
        self.client.fetch_relationships(statement, "relationships").await
    }

    pub async fn adjacent_nodes(&self, direction: Direction, rel_type: Option<&str>) -> Result<Vec<Node>, NeoTxError> {
        let statement = statements::adjacent_nodes(self.id, direction, rel_type)?;
        self.client.fetch_nodes(statement, "nodes").await
    }

    /// Add the node to legacy index `index` under `key`/`value`.
    pub async fn index(&self, index: &str, key: &str, value: impl IntoParamValue) -> Result<(), NeoTxError> {
        let index = statements::identifier(index, "index name")?;
        let key = statements::identifier(key, "index key")?;
        let body = json!({
            "uri": self.inner.self_uri,
            "key": key,
            "value": value.into_param_value(),
        });
        let path = rest_path(&["index", "node", index])?;
        self.client.request(Method::Post, &path, Some(body), &[200, 201]).await?;
        Ok(())
    }

    /// Remove the node from `index`, narrowed to a key or a key/value pair.
    pub async fn unindex(&self, index: &str, key: Option<&str>, value: Option<&str>) -> Result<(), NeoTxError> {
        let index = statements::identifier(index, "index name")?;
        let id = self.id.to_string();
        let mut segments = vec!["index", "node", index];
        match (key, value) {
            (Some(key), Some(value)) => segments.extend([key, value]),
            (Some(key), None) => segments.push(key),
            (None, Some(_)) => return Err(NeoTxError::invalid_statement("an index value needs a key")),
            (None, None) => {}
        }
        segments.push(&id);
        let path = rest_path(&segments)?;
        self.client.request(Method::Delete, &path, None, &[204]).await?;
        Ok(())
    }
}

async fn create_relationship(
    client: &Client,
    from: u64,
    to: u64,
    rel_type: &str,
    props: Value,
) -> Result<Relationship, NeoTxError> {
    let statement = statements::create_relationship(from, to, rel_type, props)?;
    client
        .fetch_relationships(statement, "relationship")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NeoTxError::missing_field("relationship", "create relationship"))
}
