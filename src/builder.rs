//! Common graph operations queued onto one transaction.

use serde_json::Value;

use crate::core::{IntoParamValue, NeoTxError, ResultFormats, Statement, TransactionSession, TxOutcome};
use crate::statements::{self, Direction};

/// Queues prepared statements on a [`TransactionSession`] and flushes them
/// together.
///
/// Identifiers (labels, relationship types, property names) are spliced into
/// the statement text and must come from trusted input. Missing identifiers
/// fail immediately with [`NeoTxError::InvalidStatement`] and leave the
/// batch untouched.
///
/// ```rust,no_run
/// # use neotx::prelude::*;
/// # async fn example(client: &Client) -> Result<(), NeoTxError> {
/// let mut builder = client.query_builder();
/// builder
///     .create_node(serde_json::json!({"name": "Neo"}))?
///     .set_label(42, "Person")?
///     .relationships(42, Direction::Outgoing, Some("KNOWS"))?;
/// let outcome = builder.commit().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct QueryBuilder {
    session: TransactionSession,
}

impl QueryBuilder {
    pub fn new(session: TransactionSession) -> Self {
        Self { session }
    }

    /// Set the result formats and auto-parse flag of the underlying session.
    pub fn config(&mut self, formats: impl Into<ResultFormats>, auto_parse: bool) -> &mut Self {
        self.session.set_default_formats(formats);
        self.session.set_auto_parse(auto_parse);
        self
    }

    pub fn session(&self) -> &TransactionSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut TransactionSession {
        &mut self.session
    }

    pub fn into_session(self) -> TransactionSession {
        self.session
    }

    pub fn add_statement(&mut self, statement: Statement) -> Result<&mut Self, NeoTxError> {
        self.session.add_statement(statement)?;
        Ok(self)
    }

    pub fn node_by_id(&mut self, id: u64) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::node_by_id(id))
    }

    pub fn create_node(&mut self, props: Value) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::create_node(props)?)
    }

    pub fn delete_node(&mut self, id: u64, force: bool) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::delete_node(id, force))
    }

    pub fn set_label(&mut self, id: u64, label: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::set_label(id, label)?)
    }

    pub fn remove_label(&mut self, id: u64, label: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::remove_label(id, label)?)
    }

    /// Set one property; a null value removes it instead.
    pub fn set_property(&mut self, id: u64, property: &str, value: impl IntoParamValue) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::set_property(id, property, value)?)
    }

    pub fn set_properties(&mut self, id: u64, properties: Value) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::set_properties(id, properties)?)
    }

    pub fn create_relationship(
        &mut self,
        from: u64,
        to: u64,
        rel_type: &str,
        props: Value,
    ) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::create_relationship(from, to, rel_type, props)?)
    }

    pub fn relationships(
        &mut self,
        id: u64,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::relationships(id, direction, rel_type)?)
    }

    pub fn adjacent_nodes(
        &mut self,
        id: u64,
        direction: Direction,
        rel_type: Option<&str>,
    ) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::adjacent_nodes(id, direction, rel_type)?)
    }

    pub fn create_index_on(&mut self, label: &str, property: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::create_index_on(label, property)?)
    }

    pub fn drop_index_on(&mut self, label: &str, property: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::drop_index_on(label, property)?)
    }

    pub fn use_index(&mut self, label: &str, property: &str, value: impl IntoParamValue) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::use_index(label, property, value)?)
    }

    pub fn create_constraint(&mut self, label: &str, property: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::create_constraint(label, property)?)
    }

    pub fn drop_constraint(&mut self, label: &str, property: &str) -> Result<&mut Self, NeoTxError> {
        self.add_statement(statements::drop_constraint(label, property)?)
    }

    /// Flush the queued statements, opening the transaction if needed.
    pub async fn execute(&mut self) -> Result<TxOutcome, NeoTxError> {
        self.session.execute().await
    }

    pub async fn commit(&mut self) -> Result<TxOutcome, NeoTxError> {
        self.session.commit().await
    }

    pub async fn rollback(&mut self) -> Result<(), NeoTxError> {
        self.session.rollback().await
    }
}
