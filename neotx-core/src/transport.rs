//! The network capability the session is built on.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NeoTxError;

/// HTTP verbs used against the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        })
    }
}

/// Status code and parsed JSON body of a response.
///
/// An empty body is represented as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Value,
}

impl TransportResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into a [`NeoTxError::Protocol`].
    pub fn error_for_status(self) -> Result<Self, NeoTxError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(NeoTxError::Protocol {
                status: self.status,
                body: self.body,
            })
        }
    }
}

/// Sends one request and returns the server's answer.
///
/// `path` is relative to the server's data root (for example
/// `/transaction/12/commit`). Implementations report unreachable servers as
/// [`NeoTxError::Transport`] and must not retry. A non-2xx status is not an
/// error at this level; callers decide which statuses they accept.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<TransportResponse, NeoTxError>;
}
