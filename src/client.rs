//! The entry point: one transport shared by every session it hands out.

use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::builder::QueryBuilder;
use crate::config::ConnectionConfig;
use crate::core::{
    Method, NeoTxError, QueryResults, Record, ResultFormat, RestNode, RestRelationship, Statement, TransactionSession,
    Transport,
};
use crate::http::HttpTransport;
use crate::node::Node;
use crate::relationship::Relationship;
use crate::statements;

/// Cheap to clone; clones share the transport.
///
/// ```rust,no_run
/// # use neotx::prelude::*;
/// # async fn example() -> Result<(), NeoTxError> {
/// let client = Client::from_env()?;
/// let alice = client.create_node(serde_json::json!({"name": "Alice"})).await?;
/// let again = client.node_by_id(alice.id()).await?;
/// assert_eq!(again.property::<String>("name")?.as_deref(), Some("Alice"));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client").finish_non_exhaustive()
    }
}

impl Client {
    /// Connect over HTTP with the given settings.
    pub fn new(config: ConnectionConfig) -> Result<Self, NeoTxError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(&config)?)))
    }

    /// Connect over HTTP with settings from `NEO4J_*` environment variables.
    pub fn from_env() -> Result<Self, NeoTxError> {
        Self::new(ConnectionConfig::from_env()?)
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// A new unopened transaction.
    pub fn transaction(&self) -> TransactionSession {
        TransactionSession::new(self.transport())
    }

    /// A query builder over a new transaction.
    pub fn query_builder(&self) -> QueryBuilder {
        QueryBuilder::new(self.transaction())
    }

    /// Run one statement in its own transaction (single-shot commit).
    pub async fn run(&self, statement: Statement) -> Result<QueryResults, NeoTxError> {
        let mut tx = self.transaction();
        tx.add_statement(statement)?;
        tx.commit()
            .await?
            .into_parsed()
            .ok_or_else(|| NeoTxError::missing_field("results", "single-shot commit"))
    }

    pub async fn create_node(&self, props: Value) -> Result<Node, NeoTxError> {
        self.fetch_nodes(statements::create_node(props)?, "node")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| NeoTxError::missing_field("node", "create node"))
    }

    pub async fn node_by_id(&self, id: u64) -> Result<Node, NeoTxError> {
        self.fetch_nodes(statements::node_by_id(id), "node")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| NeoTxError::missing_field("node", &format!("node {id}")))
    }

    pub async fn relationship_by_id(&self, id: u64) -> Result<Relationship, NeoTxError> {
        self.fetch_relationships(statements::relationship_by_id(id), "relationship")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| NeoTxError::missing_field("relationship", &format!("relationship {id}")))
    }

    /// Run `statement` for `rest` results and decode `column` of each record.
    pub(crate) async fn fetch_rest(&self, statement: Statement, column: &str) -> Result<Vec<Value>, NeoTxError> {
        let results = self.run(statement.formats(ResultFormat::Rest)).await?;
        results.rest.into_iter().map(|record| take_column(record, column)).collect()
    }

    pub(crate) async fn fetch_nodes(&self, statement: Statement, column: &str) -> Result<Vec<Node>, NeoTxError> {
        self.fetch_rest(statement, column)
            .await?
            .iter()
            .map(|value| self.node_from_value(value))
            .collect()
    }

    pub(crate) async fn fetch_relationships(
        &self,
        statement: Statement,
        column: &str,
    ) -> Result<Vec<Relationship>, NeoTxError> {
        self.fetch_rest(statement, column)
            .await?
            .iter()
            .map(|value| self.relationship_from_value(value))
            .collect()
    }

    pub(crate) fn node_from_value(&self, value: &Value) -> Result<Node, NeoTxError> {
        Node::from_rest(self.clone(), RestNode::from_value(value)?)
    }

    pub(crate) fn relationship_from_value(&self, value: &Value) -> Result<Relationship, NeoTxError> {
        Relationship::from_rest(self.clone(), RestRelationship::from_value(value)?)
    }

    /// Plain REST request outside the transactional endpoint; any status not
    /// in `expected` is a [`NeoTxError::Protocol`].
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
        expected: &[u16],
    ) -> Result<Value, NeoTxError> {
        let response = self.transport.send(method, path, body).await?;
        if !expected.contains(&response.status) {
            debug!("{method} {path} answered {}", response.status);
            return Err(NeoTxError::Protocol {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response.body)
    }
}

/// Join `segments` into a path, percent-encoding each one, so a `/`, `#`
/// or `?` inside a key or value stays part of its segment.
pub(crate) fn rest_path(segments: &[&str]) -> Result<String, NeoTxError> {
    let mut url = reqwest::Url::parse("http://localhost/").map_err(NeoTxError::transport)?;
    url.path_segments_mut()
        .map_err(|()| NeoTxError::invalid_statement("cannot build a REST path"))?
        .clear()
        .extend(segments);
    Ok(url.path().to_owned())
}

fn take_column(record: Record, column: &str) -> Result<Value, NeoTxError> {
    record
        .into_inner()
        .remove(column)
        .ok_or_else(|| NeoTxError::missing_field(column, "record"))
}
