//! Request and response payloads of the transactional endpoint.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::ResultFormats;
use crate::statement::Statement;
use crate::traits::Params;

/// Body of every flush: `{"statements": [...]}`.
#[derive(Debug, Serialize)]
pub struct TxRequest<'a> {
    pub statements: Vec<WireStatement<'a>>,
}

/// One statement as the server expects it.
#[derive(Debug, Serialize)]
pub struct WireStatement<'a> {
    pub statement: &'a str,
    pub parameters: &'a Params,
    #[serde(rename = "resultDataContents")]
    pub result_data_contents: &'a ResultFormats,
}

impl<'a> TxRequest<'a> {
    /// Build the body for `statements`, resolving each statement's formats
    /// against `default`.
    pub fn new(statements: &'a [Statement], default: &'a ResultFormats) -> Self {
        let statements = statements
            .iter()
            .map(|s| WireStatement {
                statement: s.text(),
                parameters: s.parameters(),
                result_data_contents: s.effective_formats(default),
            })
            .collect();
        Self { statements }
    }

    /// The keep-alive body, `{"statements": []}`.
    pub fn empty() -> Self {
        Self { statements: Vec::new() }
    }
}

/// An error reported by the server inside an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerError {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Lease information attached to an open transaction.
#[derive(Debug, Clone, Deserialize)]
pub struct TxInfo {
    pub expires: String,
}

/// The results of one statement, before normalization.
///
/// Each entry of `data` is an object keyed by format (`row`, `rest`,
/// `graph`); which keys are present depends on the formats requested.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatementResult {
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data: Vec<serde_json::Map<String, Value>>,
}

/// A decoded response from any flush.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TxResponse {
    #[serde(default)]
    pub commit: Option<String>,
    #[serde(default)]
    pub results: Vec<RawStatementResult>,
    #[serde(default)]
    pub transaction: Option<TxInfo>,
    #[serde(default)]
    pub errors: Vec<ServerError>,
}

impl TxResponse {
    /// Handle parsed from the `commit` URI, if any.
    pub fn handle(&self) -> Option<u64> {
        self.commit.as_deref().and_then(handle_from_commit_uri)
    }

    /// Lease expiry parsed from `transaction.expires`, if any.
    pub fn expires_at(&self) -> Option<DateTime<FixedOffset>> {
        self.transaction.as_ref().and_then(|t| parse_expiry(&t.expires))
    }
}

/// Extract the transaction handle from a commit URI.
///
/// The handle is the numeric path segment right before `/commit`, e.g. `7`
/// in `http://localhost:7474/db/data/transaction/7/commit`.
pub fn handle_from_commit_uri(uri: &str) -> Option<u64> {
    let trimmed = uri.trim_end_matches('/');
    let base = trimmed.strip_suffix("/commit")?;
    base.rsplit('/').next()?.parse().ok()
}

/// Parse the lease expiry the server reports, e.g. `Tue, 24 Jun 2014 13:06:32 +0000`.
pub fn parse_expiry(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
}
