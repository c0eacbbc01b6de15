//! Error types for neotx.

use thiserror::Error;

use crate::session::TxState;
use crate::wire::ServerError;

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Unified error type for all neotx operations.
///
/// Lifecycle errors ([`TransactionClosed`](NeoTxError::TransactionClosed),
/// [`AlreadyOpen`](NeoTxError::AlreadyOpen),
/// [`AlreadyCommitted`](NeoTxError::AlreadyCommitted)) and
/// [`InvalidStatement`](NeoTxError::InvalidStatement) are raised before any
/// request is sent. The remaining variants describe what went wrong on the
/// wire; none of them are retried.
#[derive(Error, Debug)]
pub enum NeoTxError {
    /// Malformed caller input: empty statement text or a missing identifier
    /// required by a statement template.
    #[error("invalid statement: {0}")]
    InvalidStatement(String),

    /// The server could not be reached.
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {status} from server")]
    Protocol {
        status: u16,
        body: serde_json::Value,
    },

    /// The server accepted the request but reported errors for it.
    #[error("transaction failed: {}", format_server_errors(.errors))]
    Transaction { errors: Vec<ServerError> },

    /// A lifecycle call that needs an open transaction was made on a session
    /// that is not open.
    #[error("transaction is not open (state: {state})")]
    TransactionClosed { state: TxState },

    /// `begin` was called on a session whose transaction is already open.
    #[error("transaction {handle} is already open, use execute or commit")]
    AlreadyOpen { handle: u64 },

    /// The session already reached a terminal state.
    #[error("transaction already finished (state: {state})")]
    AlreadyCommitted { state: TxState },

    /// Connection settings could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// A JSON payload could not be (de)serialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A required field was not found in a server payload or a record.
    #[error("missing field '{field}' on {owner}")]
    MissingField { field: String, owner: String },

    /// A JSON value did not have the expected shape.
    #[error("type mismatch: expected {expected}, got {got} ({context})")]
    TypeMismatch {
        expected: String,
        got: String,
        context: String,
    },

    /// Wraps an inner error with additional context.
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<NeoTxError>,
    },
}

fn format_server_errors(errors: &[ServerError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.code, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl NeoTxError {
    /// Create an [`InvalidStatement`](NeoTxError::InvalidStatement) error.
    pub fn invalid_statement(reason: impl Into<String>) -> Self {
        NeoTxError::InvalidStatement(reason.into())
    }

    /// Wrap any transport failure into a [`Transport`](NeoTxError::Transport) error.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        NeoTxError::Transport(err.into())
    }

    /// Create a [`TypeMismatch`](NeoTxError::TypeMismatch) error.
    pub fn type_mismatch(expected: &str, got: &str, context: &str) -> Self {
        NeoTxError::TypeMismatch {
            expected: expected.to_owned(),
            got: got.to_owned(),
            context: context.to_owned(),
        }
    }

    /// Create a [`MissingField`](NeoTxError::MissingField) error.
    pub fn missing_field(field: &str, owner: &str) -> Self {
        NeoTxError::MissingField {
            field: field.to_owned(),
            owner: owner.to_owned(),
        }
    }

    /// Wrap this error with additional context, producing a [`Context`](NeoTxError::Context) variant.
    ///
    /// ```rust
    /// # use neotx_core::NeoTxError;
    /// let err = NeoTxError::missing_field("self", "node");
    /// let wrapped = err.with_context("result 0, column 'n'");
    /// assert!(wrapped.to_string().contains("column 'n'"));
    /// ```
    pub fn with_context(self, ctx: impl Into<String>) -> Self {
        NeoTxError::Context {
            context: ctx.into(),
            source: Box::new(self),
        }
    }

    /// The server-reported errors, if this is a [`Transaction`](NeoTxError::Transaction) error.
    pub fn server_errors(&self) -> &[ServerError] {
        match self {
            NeoTxError::Transaction { errors } => errors,
            NeoTxError::Context { source, .. } => source.server_errors(),
            _ => &[],
        }
    }
}

/// Returns a human-readable name for a JSON value's kind.
pub fn json_type_name(v: &serde_json::Value) -> &'static str {
    match v {
        serde_json::Value::Null => "Null",
        serde_json::Value::Bool(_) => "Boolean",
        serde_json::Value::Number(_) => "Number",
        serde_json::Value::String(_) => "String",
        serde_json::Value::Array(_) => "List",
        serde_json::Value::Object(_) => "Map",
    }
}
