use serde::de::DeserializeOwned;

use crate::client::Client;
use crate::core::{
    IntoParamValue, NeoTxError, QueryResults, Record, ResultFormat, Statement, ToParams, TransactionSession, TxOutcome,
};

/// A typed query wrapper around [`Statement`].
///
/// Provides a builder-style `.param()` API and typed fetch helpers that
/// deserialize `row` records into any `T: DeserializeOwned`, one struct
/// field per returned column. In that format nodes and relationships come
/// back as their property maps.
///
/// # Examples
///
/// ```rust,no_run
/// # use neotx::query::Query;
/// let query = Query::new("MATCH (u:User {name: {name}}) RETURN u")
///     .param("name", "Alice");
/// ```
///
/// Or use the [`cypher_query!`](crate::cypher_query) macro for parameter
/// binding at compile time:
///
/// ```rust,ignore
/// let name = "Alice";
/// let query = cypher_query! { MATCH (u:User {name: {name}}) RETURN u };
/// ```
#[derive(Debug, Clone)]
pub struct Query {
    inner: Statement,
}

impl Query {
    /// Create a new query from a Cypher string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            inner: Statement::new(query).formats(ResultFormat::Row),
        }
    }

    /// Bind a named parameter.
    ///
    /// ```rust,no_run
    /// # use neotx::query::Query;
    /// let q = Query::new("MATCH (u:User {age: {age}}) RETURN u")
    ///     .param("age", 30_i64);
    /// ```
    pub fn param(mut self, key: impl Into<String>, value: impl IntoParamValue) -> Self {
        self.inner = self.inner.param(key, value);
        self
    }

    /// Bind all fields from a [`ToParams`] struct as named parameters.
    ///
    /// ```rust,no_run
    /// # use neotx::query::Query;
    /// # #[derive(neotx::ToParams)]
    /// # struct CreateUser { name: String, age: i64 }
    /// let params = CreateUser { name: "Alice".into(), age: 30 };
    /// let q = Query::new("CREATE (u:User {name: {name}, age: {age}})")
    ///     .params_from(params);
    /// ```
    pub fn params_from(mut self, source: impl ToParams) -> Self {
        self.inner = self.inner.params_from(source);
        self
    }

    pub fn statement(&self) -> &Statement {
        &self.inner
    }

    pub fn into_statement(self) -> Statement {
        self.inner
    }

    /// Run in its own transaction and return exactly one row, mapped to `T`.
    ///
    /// Returns [`NeoTxError::MissingField`] if the result set is empty.
    pub async fn fetch_one<T: DeserializeOwned>(self, client: &Client) -> Result<T, NeoTxError> {
        let results = client.run(self.inner).await?;
        let row = first_row(results).ok_or_else(|| NeoTxError::missing_field("row", "fetch_one"))?;
        row.deserialize()
    }

    /// Run in its own transaction and collect all rows into `Vec<T>`.
    pub async fn fetch_all<T: DeserializeOwned>(self, client: &Client) -> Result<Vec<T>, NeoTxError> {
        let results = client.run(self.inner).await?;
        map_rows(results)
    }

    /// Run in its own transaction and return zero or one row, mapped to `T`.
    ///
    /// ```rust,no_run
    /// # use neotx::query::Query;
    /// # use neotx::{Client, NeoTxError};
    /// # #[derive(serde::Deserialize)] struct UserRow { name: String }
    /// # async fn example(client: &Client) -> Result<(), NeoTxError> {
    /// let user: Option<UserRow> = Query::new("START u = node({id}) RETURN u.name AS name")
    ///     .param("id", 1_u64)
    ///     .fetch_optional(client)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_optional<T: DeserializeOwned>(self, client: &Client) -> Result<Option<T>, NeoTxError> {
        let results = client.run(self.inner).await?;
        first_row(results).map(|row| row.deserialize()).transpose()
    }

    /// Execute within an open (or new) transaction and return zero or one
    /// row, mapped to `T`.
    pub async fn fetch_optional_in<T: DeserializeOwned>(
        self,
        tx: &mut TransactionSession,
    ) -> Result<Option<T>, NeoTxError> {
        let results = execute_in(self.inner, tx).await?;
        first_row(results).map(|row| row.deserialize()).transpose()
    }

    /// Execute within a transaction and return exactly one row, mapped to `T`.
    ///
    /// ```rust,no_run
    /// # use neotx::query::Query;
    /// # use neotx::{Client, NeoTxError};
    /// # async fn example(client: &Client) -> Result<(), NeoTxError> {
    /// # #[derive(serde::Deserialize)] struct UserRow { name: String }
    /// let mut tx = client.transaction();
    /// let row: UserRow = Query::new("CREATE (u {props}) RETURN u.name AS name")
    ///     .param("props", serde_json::json!({"name": "Alice"}))
    ///     .fetch_one_in(&mut tx)
    ///     .await?;
    /// tx.commit().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn fetch_one_in<T: DeserializeOwned>(self, tx: &mut TransactionSession) -> Result<T, NeoTxError> {
        let results = execute_in(self.inner, tx).await?;
        let row = first_row(results).ok_or_else(|| NeoTxError::missing_field("row", "fetch_one_in"))?;
        row.deserialize()
    }

    /// Execute within a transaction and collect all rows into `Vec<T>`.
    pub async fn fetch_all_in<T: DeserializeOwned>(self, tx: &mut TransactionSession) -> Result<Vec<T>, NeoTxError> {
        let results = execute_in(self.inner, tx).await?;
        map_rows(results)
    }
}

async fn execute_in(statement: Statement, tx: &mut TransactionSession) -> Result<QueryResults, NeoTxError> {
    match tx.execute_with(statement).await? {
        TxOutcome::Parsed(results) => Ok(results),
        TxOutcome::Raw(_) => Err(NeoTxError::invalid_statement(
            "typed fetches need a session with auto-parse enabled",
        )),
    }
}

fn first_row(results: QueryResults) -> Option<Record> {
    results.rows.into_iter().next()
}

fn map_rows<T: DeserializeOwned>(results: QueryResults) -> Result<Vec<T>, NeoTxError> {
    results
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| row.deserialize().map_err(|e| e.with_context(format!("row {i}"))))
        .collect()
}

/// Convenience constructor, equivalent to [`Query::new`].
///
/// ```rust,no_run
/// # use neotx::query;
/// let q = query::query("START n = node(*) RETURN n");
/// ```
pub fn query(q: impl Into<String>) -> Query {
    Query::new(q)
}
