//! The transaction lifecycle state machine.
//!
//! A [`TransactionSession`] accumulates statements and flushes them to the
//! transactional endpoint on `begin`, `execute` and `commit`. Every flush
//! drains the pending batch before the request goes out: if the request
//! fails, those statements are gone and must be added again. Nothing is ever
//! retried or rolled back automatically.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use crate::batch::StatementBatch;
use crate::error::NeoTxError;
use crate::format::ResultFormats;
use crate::normalize::{normalize, QueryResults};
use crate::statement::Statement;
use crate::traits::Params;
use crate::transport::{Method, Transport, TransportResponse};
use crate::wire::{TxRequest, TxResponse};

/// Where a transaction stands. The handle only exists while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Unopened,
    Open { handle: u64 },
    Committed,
    RolledBack,
}

impl TxState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TxState::Committed | TxState::RolledBack)
    }
}

impl fmt::Display for TxState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxState::Unopened => f.write_str("unopened"),
            TxState::Open { handle } => write!(f, "open ({handle})"),
            TxState::Committed => f.write_str("committed"),
            TxState::RolledBack => f.write_str("rolled back"),
        }
    }
}

/// What a flush returns.
#[derive(Debug, Clone, PartialEq)]
pub enum TxOutcome {
    /// Normalized results (auto-parse on).
    Parsed(QueryResults),
    /// The response body exactly as the server sent it (auto-parse off).
    Raw(Value),
}

impl TxOutcome {
    pub fn parsed(&self) -> Option<&QueryResults> {
        match self {
            TxOutcome::Parsed(results) => Some(results),
            TxOutcome::Raw(_) => None,
        }
    }

    pub fn into_parsed(self) -> Option<QueryResults> {
        match self {
            TxOutcome::Parsed(results) => Some(results),
            TxOutcome::Raw(_) => None,
        }
    }

    pub fn raw(&self) -> Option<&Value> {
        match self {
            TxOutcome::Raw(body) => Some(body),
            TxOutcome::Parsed(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum FlushTarget {
    Begin,
    Execute(u64),
    Commit(Option<u64>),
}

impl FlushTarget {
    fn path(self) -> String {
        match self {
            FlushTarget::Begin => "/transaction/".to_owned(),
            FlushTarget::Execute(handle) => format!("/transaction/{handle}"),
            FlushTarget::Commit(Some(handle)) => format!("/transaction/{handle}/commit"),
            FlushTarget::Commit(None) => "/transaction/commit".to_owned(),
        }
    }
}

/// A decoded successful response plus what is needed to build the outcome.
struct Flushed {
    response: TxResponse,
    body: Value,
    formats: Vec<ResultFormats>,
}

/// One server-side transaction and the statements waiting to join it.
///
/// Not meant for concurrent use: every operation takes `&mut self`, so the
/// borrow checker serializes accumulation and flushes. Each session holds its
/// own transport handle.
///
/// ```rust,ignore
/// let mut tx = TransactionSession::new(transport);
/// tx.add_statement(Statement::new("CREATE (n {props}) RETURN n").param("props", json!({"name": "X"})))?;
/// let created = tx.begin().await?;
/// tx.keep_alive().await?;
/// tx.commit().await?;
/// ```
pub struct TransactionSession {
    transport: Arc<dyn Transport>,
    batch: StatementBatch,
    state: TxState,
    expires_at: Option<DateTime<FixedOffset>>,
    default_formats: ResultFormats,
    auto_parse: bool,
}

impl fmt::Debug for TransactionSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransactionSession")
            .field("state", &self.state)
            .field("pending", &self.batch.len())
            .field("expires_at", &self.expires_at)
            .field("default_formats", &self.default_formats)
            .field("auto_parse", &self.auto_parse)
            .finish()
    }
}

impl TransactionSession {
    /// A fresh, unopened session requesting `row` results with auto-parse on.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            batch: StatementBatch::new(),
            state: TxState::Unopened,
            expires_at: None,
            default_formats: ResultFormats::row(),
            auto_parse: true,
        }
    }

    /// Set the formats used by statements that do not choose their own.
    pub fn with_default_formats(mut self, formats: impl Into<ResultFormats>) -> Self {
        self.set_default_formats(formats);
        self
    }

    pub fn with_auto_parse(mut self, auto_parse: bool) -> Self {
        self.auto_parse = auto_parse;
        self
    }

    pub fn set_default_formats(&mut self, formats: impl Into<ResultFormats>) {
        self.default_formats = formats.into();
    }

    /// When off, flushes return the raw response body instead of normalized results.
    pub fn set_auto_parse(&mut self, auto_parse: bool) {
        self.auto_parse = auto_parse;
    }

    pub fn state(&self) -> TxState {
        self.state
    }

    /// The server-assigned handle; `Some` exactly while the transaction is open.
    pub fn handle(&self) -> Option<u64> {
        match self.state {
            TxState::Open { handle } => Some(handle),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle().is_some()
    }

    /// Lease expiry last reported by the server.
    pub fn expires_at(&self) -> Option<DateTime<FixedOffset>> {
        self.expires_at
    }

    pub fn default_formats(&self) -> &ResultFormats {
        &self.default_formats
    }

    pub fn auto_parse(&self) -> bool {
        self.auto_parse
    }

    /// Statements waiting for the next flush.
    pub fn pending(&self) -> &StatementBatch {
        &self.batch
    }

    /// Queue a statement for the next flush.
    pub fn add_statement(&mut self, statement: Statement) -> Result<&mut Self, NeoTxError> {
        self.batch.push(statement)?;
        Ok(self)
    }

    /// Queue a statement from its text and optional parameters.
    pub fn add(&mut self, text: impl Into<String>, parameters: Option<Params>) -> Result<&mut Self, NeoTxError> {
        self.batch.add(text, parameters, None)?;
        Ok(self)
    }

    /// Open the transaction with the pending statements.
    ///
    /// Fails with [`NeoTxError::AlreadyOpen`] if it is already open and with
    /// [`NeoTxError::TransactionClosed`] once it is finished, in both cases
    /// before touching the batch.
    pub async fn begin(&mut self) -> Result<TxOutcome, NeoTxError> {
        self.ensure_can_begin()?;
        self.open(FlushTarget::Begin).await
    }

    /// Add `statement`, then [`begin`](Self::begin).
    pub async fn begin_with(&mut self, statement: Statement) -> Result<TxOutcome, NeoTxError> {
        self.ensure_can_begin()?;
        self.batch.push(statement)?;
        self.open(FlushTarget::Begin).await
    }

    /// Run the pending statements inside the open transaction.
    ///
    /// Without a handle this is a fresh begin.
    pub async fn execute(&mut self) -> Result<TxOutcome, NeoTxError> {
        let target = self.execute_target()?;
        self.open(target).await
    }

    /// Add `statement`, then [`execute`](Self::execute).
    pub async fn execute_with(&mut self, statement: Statement) -> Result<TxOutcome, NeoTxError> {
        let target = self.execute_target()?;
        self.batch.push(statement)?;
        self.open(target).await
    }

    /// Extend the lease of the open transaction without running anything.
    pub async fn keep_alive(&mut self) -> Result<(), NeoTxError> {
        let TxState::Open { handle } = self.state else {
            return Err(NeoTxError::TransactionClosed { state: self.state });
        };
        let path = FlushTarget::Execute(handle).path();
        let body = serde_json::to_value(TxRequest::empty())?;
        debug!("keep-alive for transaction {handle}");
        let response = self.transport.send(Method::Post, &path, Some(body)).await?;
        let flushed = decode(response, Vec::new())?;
        if let Some(expires_at) = flushed.response.expires_at() {
            self.expires_at = Some(expires_at);
        }
        Ok(())
    }

    /// Commit the pending statements and finish the transaction.
    ///
    /// Without a handle this is a single-shot commit with no prior begin.
    pub async fn commit(&mut self) -> Result<TxOutcome, NeoTxError> {
        self.ensure_not_finished()?;
        self.close().await
    }

    /// Add `statement`, then [`commit`](Self::commit).
    pub async fn commit_with(&mut self, statement: Statement) -> Result<TxOutcome, NeoTxError> {
        self.ensure_not_finished()?;
        self.batch.push(statement)?;
        self.close().await
    }

    /// Abandon the transaction without committing.
    ///
    /// Pending statements are discarded. An unopened session just moves to
    /// [`TxState::RolledBack`]. An open one asks the server to delete the
    /// transaction; the local state becomes `RolledBack` whatever the server
    /// answers, so no later flush can reach it. If the server does not support
    /// deletion (404/405) the transaction is left to expire with its lease and
    /// the call succeeds. Any other failure is returned after the transition.
    pub async fn rollback(&mut self) -> Result<(), NeoTxError> {
        self.ensure_not_finished()?;
        self.batch.clear();
        let previous = std::mem::replace(&mut self.state, TxState::RolledBack);
        self.expires_at = None;

        let TxState::Open { handle } = previous else {
            debug!("rolled back unopened transaction");
            return Ok(());
        };

        debug!("rolling back transaction {handle}");
        let response = match self.transport.send(Method::Delete, &format!("/transaction/{handle}"), None).await {
            Ok(response) => response,
            Err(e) => {
                warn!("rollback of transaction {handle} failed, leaving it to expire: {e}");
                return Err(e);
            }
        };
        if matches!(response.status, 404 | 405) {
            warn!(
                "server does not support deleting transaction {handle} (status {}), leaving it to expire",
                response.status
            );
            return Ok(());
        }
        let response = response.error_for_status()?;
        if response.body.is_null() {
            return Ok(());
        }
        let decoded = TxResponse::deserialize(&response.body)?;
        if !decoded.errors.is_empty() {
            return Err(NeoTxError::Transaction { errors: decoded.errors });
        }
        Ok(())
    }

    fn ensure_can_begin(&self) -> Result<(), NeoTxError> {
        match self.state {
            TxState::Unopened => Ok(()),
            TxState::Open { handle } => Err(NeoTxError::AlreadyOpen { handle }),
            state => Err(NeoTxError::TransactionClosed { state }),
        }
    }

    fn ensure_not_finished(&self) -> Result<(), NeoTxError> {
        if self.state.is_terminal() {
            return Err(NeoTxError::AlreadyCommitted { state: self.state });
        }
        Ok(())
    }

    fn execute_target(&self) -> Result<FlushTarget, NeoTxError> {
        match self.state {
            TxState::Unopened => Ok(FlushTarget::Begin),
            TxState::Open { handle } => Ok(FlushTarget::Execute(handle)),
            state => Err(NeoTxError::TransactionClosed { state }),
        }
    }

    /// Flush for begin/execute and keep the transaction open.
    async fn open(&mut self, target: FlushTarget) -> Result<TxOutcome, NeoTxError> {
        let flushed = self.flush(target).await?;
        let handle = match (flushed.response.handle(), target) {
            (Some(handle), _) => handle,
            (None, FlushTarget::Execute(current)) => current,
            (None, _) => return Err(NeoTxError::missing_field("commit", "transaction response")),
        };
        let expires_at = flushed.response.expires_at();
        // state only moves once the response decoded completely
        let outcome = self.outcome(flushed)?;
        debug!("transaction {} -> open ({handle})", self.state);
        self.state = TxState::Open { handle };
        if expires_at.is_some() {
            self.expires_at = expires_at;
        }
        Ok(outcome)
    }

    /// Flush for commit and finish the transaction.
    async fn close(&mut self) -> Result<TxOutcome, NeoTxError> {
        let flushed = self.flush(FlushTarget::Commit(self.handle())).await?;
        let outcome = self.outcome(flushed)?;
        debug!("transaction {} -> committed", self.state);
        self.state = TxState::Committed;
        self.expires_at = None;
        Ok(outcome)
    }

    async fn flush(&mut self, target: FlushTarget) -> Result<Flushed, NeoTxError> {
        let statements = self.batch.drain();
        let formats = statements
            .iter()
            .map(|s| s.effective_formats(&self.default_formats).clone())
            .collect();
        let body = serde_json::to_value(TxRequest::new(&statements, &self.default_formats))?;
        let path = target.path();
        debug!("POST {path} with {} statement(s)", statements.len());
        let response = self.transport.send(Method::Post, &path, Some(body)).await?;
        decode(response, formats)
    }

    /// Build the caller's view of a flush. With auto-parse on, a payload that
    /// does not normalize fails here, before any state change.
    fn outcome(&self, flushed: Flushed) -> Result<TxOutcome, NeoTxError> {
        if !self.auto_parse {
            return Ok(TxOutcome::Raw(flushed.body));
        }
        Ok(TxOutcome::Parsed(normalize(flushed.response.results, &flushed.formats)?))
    }
}

/// Check status and server errors of a flush response.
fn decode(response: TransportResponse, formats: Vec<ResultFormats>) -> Result<Flushed, NeoTxError> {
    let body = response.error_for_status()?.body;
    let decoded = TxResponse::deserialize(&body)?;
    if !decoded.errors.is_empty() {
        return Err(NeoTxError::Transaction { errors: decoded.errors });
    }
    Ok(Flushed {
        response: decoded,
        body,
        formats,
    })
}
