//! Convenience re-exports for common neotx usage.
//!
//! ```rust
//! use neotx::prelude::*;
//! ```
//!
//! This imports the macros (`cypher!`, `cypher_query!`, `ToParams`), the
//! parameter traits, the client and session types, the statement and
//! result types, the convenience wrappers and the error type.

pub use crate::{cypher, cypher_query, ToParams};
pub use crate::{Client, ConnectionConfig, Direction, Node, QueryBuilder, Relationship};
pub use crate::query::Query;
pub use neotx_core::traits::{IntoParamValue, ToParams as ToParamsTrait};
pub use neotx_core::{
    NeoTxError, QueryResults, Record, ResultFormat, ResultFormats, Statement, TransactionSession, TxOutcome, TxState,
};
