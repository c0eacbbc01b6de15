//! A single unit of work sent to the transactional endpoint.

use serde_json::Value;

use crate::error::NeoTxError;
use crate::format::ResultFormats;
use crate::traits::{IntoParamValue, Params, ToParams};

/// Query text plus its bind values and, optionally, its own result formats.
///
/// The text is opaque: it is never parsed or validated beyond being
/// non-empty. Statements without their own formats use the session default
/// at flush time.
///
/// ```rust
/// # use neotx_core::{Statement, ResultFormat};
/// let statement = Statement::new("CREATE (n {props}) RETURN n")
///     .param("props", serde_json::json!({"name": "X"}))
///     .formats([ResultFormat::Rest]);
/// assert_eq!(statement.parameters()["props"]["name"], "X");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    text: String,
    parameters: Params,
    formats: Option<ResultFormats>,
}

impl Statement {
    /// Create a statement with no parameters.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            parameters: Params::new(),
            formats: None,
        }
    }

    /// Bind a named parameter, replacing any earlier value under `key`.
    pub fn param(mut self, key: impl Into<String>, value: impl IntoParamValue) -> Self {
        self.parameters.insert(key.into(), value.into_param_value());
        self
    }

    /// Bind all entries of a [`ToParams`] source as named parameters.
    pub fn params_from(mut self, source: impl ToParams) -> Self {
        self.parameters.extend(source.to_params());
        self
    }

    /// Override the session's default result formats for this statement.
    pub fn formats(mut self, formats: impl Into<ResultFormats>) -> Self {
        self.formats = Some(formats.into());
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parameters(&self) -> &Params {
        &self.parameters
    }

    /// The formats requested by this statement itself, if any.
    pub fn own_formats(&self) -> Option<&ResultFormats> {
        self.formats.as_ref()
    }

    /// The formats this statement resolves to given a session default.
    pub fn effective_formats<'a>(&'a self, default: &'a ResultFormats) -> &'a ResultFormats {
        self.formats.as_ref().unwrap_or(default)
    }

    /// Reject statements that cannot be sent.
    pub fn validate(&self) -> Result<(), NeoTxError> {
        if self.text.trim().is_empty() {
            return Err(NeoTxError::invalid_statement("statement text must be a non-empty string"));
        }
        Ok(())
    }

    /// Look up a bound parameter.
    pub fn get_param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key)
    }
}
