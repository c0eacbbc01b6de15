//! Statement batching, the transaction state machine and result
//! normalization for neotx.
//!
//! This crate performs no I/O of its own: the session talks to the server
//! through the [`Transport`] trait. Use the [`neotx`] facade crate for an
//! HTTP transport, configuration and the convenience layers.

pub mod error;
pub mod traits;

pub mod batch;
pub mod entity;
pub mod format;
pub mod normalize;
pub mod record;
pub mod session;
pub mod statement;
pub mod transport;
pub mod wire;

pub use batch::StatementBatch;
pub use entity::{id_from_uri, RestNode, RestRelationship};
pub use error::NeoTxError;
pub use format::{ResultFormat, ResultFormats};
pub use normalize::{FormatData, GraphNode, GraphRelationship, QueryResults, Subgraph};
pub use record::Record;
pub use session::{TransactionSession, TxOutcome, TxState};
pub use statement::Statement;
pub use traits::{IntoParamValue, Params, ToParams};
pub use transport::{Method, Transport, TransportResponse};

pub use serde_json::Value;
