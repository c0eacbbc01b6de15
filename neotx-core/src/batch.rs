//! Ordered accumulation of statements awaiting a flush.

use crate::error::NeoTxError;
use crate::format::ResultFormats;
use crate::statement::Statement;
use crate::traits::Params;

/// Pending statements in insertion order.
///
/// The server executes statements in the order they are sent and returns one
/// result per statement in the same order, so insertion order is preserved
/// exactly. [`drain`](StatementBatch::drain) hands out everything at once and
/// leaves the batch empty.
#[derive(Debug, Clone, Default)]
pub struct StatementBatch {
    pending: Vec<Statement>,
}

impl StatementBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a statement from its parts.
    ///
    /// `parameters` defaults to an empty map and `formats` to the session
    /// default when `None`.
    pub fn add(
        &mut self,
        text: impl Into<String>,
        parameters: Option<Params>,
        formats: Option<ResultFormats>,
    ) -> Result<(), NeoTxError> {
        let mut statement = Statement::new(text);
        if let Some(parameters) = parameters {
            statement = statement.params_from(parameters);
        }
        if let Some(formats) = formats {
            statement = statement.formats(formats);
        }
        self.push(statement)
    }

    /// Add an already built statement.
    pub fn push(&mut self, statement: Statement) -> Result<(), NeoTxError> {
        statement.validate()?;
        self.pending.push(statement);
        Ok(())
    }

    /// Take every pending statement, leaving the batch empty.
    pub fn drain(&mut self) -> Vec<Statement> {
        std::mem::take(&mut self.pending)
    }

    /// Drop every pending statement.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.pending.iter()
    }
}
