//! Legacy (manual) indexes, managed through the REST endpoints under
//! `/index/node/` and `/index/relationship/` and queried through Cypher
//! `START` clauses.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::client::{rest_path, Client};
use crate::core::error::json_type_name;
use crate::core::{IntoParamValue, Method, NeoTxError};
use crate::node::Node;
use crate::relationship::Relationship;
use crate::statements;

/// Query used when none is given: everything in the index.
pub const MATCH_ALL: &str = "*:*";

const DEFAULT_PROVIDER: &str = "lucene";

/// What an index holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    Node,
    Relationship,
}

impl IndexKind {
    fn path(self) -> &'static str {
        match self {
            IndexKind::Node => "/index/node/",
            IndexKind::Relationship => "/index/relationship/",
        }
    }

    /// Entity name in REST paths and Cypher `START` lookups.
    fn start_function(self) -> &'static str {
        match self {
            IndexKind::Node => "node",
            IndexKind::Relationship => "relationship",
        }
    }
}

/// Lucene index flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Exact,
    Fulltext,
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexType::Exact => "exact",
            IndexType::Fulltext => "fulltext",
        })
    }
}

impl FromStr for IndexType {
    type Err = NeoTxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exact" => Ok(IndexType::Exact),
            "fulltext" => Ok(IndexType::Fulltext),
            other => Err(NeoTxError::invalid_statement(format!("invalid index type '{other}'"))),
        }
    }
}

/// An index as the server describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    #[serde(default)]
    pub name: String,
    pub kind: IndexKind,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default, rename = "type")]
    pub index_type: Option<String>,
}

impl IndexInfo {
    fn from_entry(name: &str, kind: IndexKind, entry: &Value) -> Self {
        let field = |key: &str| entry.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: name.to_owned(),
            kind,
            template: field("template"),
            provider: field("provider"),
            index_type: field("type"),
        }
    }
}

impl Client {
    pub async fn list_indexes(&self, kind: IndexKind) -> Result<Vec<IndexInfo>, NeoTxError> {
        let body = self.request(Method::Get, kind.path(), None, &[200, 204]).await?;
        let entries = match body {
            Value::Null => return Ok(Vec::new()),
            Value::Object(entries) => entries,
            other => return Err(NeoTxError::type_mismatch("object", json_type_name(&other), "index list")),
        };
        Ok(entries
            .iter()
            .map(|(name, entry)| IndexInfo::from_entry(name, kind, entry))
            .collect())
    }

    /// Create an index; `provider` defaults to `lucene`.
    pub async fn create_index(
        &self,
        kind: IndexKind,
        name: &str,
        index_type: IndexType,
        provider: Option<&str>,
    ) -> Result<IndexInfo, NeoTxError> {
        let name = statements::identifier(name, "index name")?;
        let body = json!({
            "name": name,
            "config": {
                "type": index_type.to_string(),
                "provider": provider.unwrap_or(DEFAULT_PROVIDER),
            },
        });
        let created = self.request(Method::Post, kind.path(), Some(body), &[200, 201]).await?;
        let mut info = IndexInfo::from_entry(name, kind, &created);
        // older servers echo only the template
        if info.index_type.is_none() {
            info.index_type = Some(index_type.to_string());
        }
        if info.provider.is_none() {
            info.provider = Some(provider.unwrap_or(DEFAULT_PROVIDER).to_owned());
        }
        Ok(info)
    }

    pub async fn delete_index(&self, kind: IndexKind, name: &str) -> Result<(), NeoTxError> {
        let name = statements::identifier(name, "index name")?;
        let path = rest_path(&["index", kind.start_function(), name])?;
        self.request(Method::Delete, &path, None, &[204]).await?;
        Ok(())
    }

    async fn query_index_values(&self, kind: IndexKind, index: &str, query: Option<&str>) -> Result<Vec<Value>, NeoTxError> {
        let statement = statements::query_index(kind.start_function(), index, query.unwrap_or(MATCH_ALL))?;
        self.fetch_rest(statement, "entities").await
    }

    async fn match_index_values(
        &self,
        kind: IndexKind,
        index: &str,
        key: &str,
        value: impl IntoParamValue,
    ) -> Result<Vec<Value>, NeoTxError> {
        let statement = statements::match_index(kind.start_function(), index, key, value)?;
        self.fetch_rest(statement, "entities").await
    }

    pub async fn list_node_indexes(&self) -> Result<Vec<IndexInfo>, NeoTxError> {
        self.list_indexes(IndexKind::Node).await
    }

    pub async fn create_node_index(
        &self,
        name: &str,
        index_type: IndexType,
        provider: Option<&str>,
    ) -> Result<IndexInfo, NeoTxError> {
        self.create_index(IndexKind::Node, name, index_type, provider).await
    }

    pub async fn delete_node_index(&self, name: &str) -> Result<(), NeoTxError> {
        self.delete_index(IndexKind::Node, name).await
    }

    /// Lucene query against a node index, e.g. `name:Tri*`; `None` matches all.
    pub async fn query_node_index(&self, index: &str, query: Option<&str>) -> Result<Vec<Node>, NeoTxError> {
        let values = self.query_index_values(IndexKind::Node, index, query).await?;
        values.iter().map(|v| self.node_from_value(v)).collect()
    }

    pub async fn match_node_index(
        &self,
        index: &str,
        key: &str,
        value: impl IntoParamValue,
    ) -> Result<Vec<Node>, NeoTxError> {
        let values = self.match_index_values(IndexKind::Node, index, key, value).await?;
        values.iter().map(|v| self.node_from_value(v)).collect()
    }

    pub async fn list_relationship_indexes(&self) -> Result<Vec<IndexInfo>, NeoTxError> {
        self.list_indexes(IndexKind::Relationship).await
    }

    pub async fn create_relationship_index(
        &self,
        name: &str,
        index_type: IndexType,
        provider: Option<&str>,
    ) -> Result<IndexInfo, NeoTxError> {
        self.create_index(IndexKind::Relationship, name, index_type, provider).await
    }

    pub async fn delete_relationship_index(&self, name: &str) -> Result<(), NeoTxError> {
        self.delete_index(IndexKind::Relationship, name).await
    }

    pub async fn query_relationship_index(
        &self,
        index: &str,
        query: Option<&str>,
    ) -> Result<Vec<Relationship>, NeoTxError> {
        let values = self.query_index_values(IndexKind::Relationship, index, query).await?;
        values.iter().map(|v| self.relationship_from_value(v)).collect()
    }

    pub async fn match_relationship_index(
        &self,
        index: &str,
        key: &str,
        value: impl IntoParamValue,
    ) -> Result<Vec<Relationship>, NeoTxError> {
        let values = self.match_index_values(IndexKind::Relationship, index, key, value).await?;
        values.iter().map(|v| self.relationship_from_value(v)).collect()
    }
}
