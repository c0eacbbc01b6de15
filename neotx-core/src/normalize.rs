//! Normalization of per-statement, per-format result payloads.
//!
//! The server renders each data row once per requested format, under the
//! format's key (`row`, `rest`, `graph`). Each requested key is decoded
//! explicitly into a [`FormatData`] variant; nothing is inferred from which
//! fields happen to be present.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_type_name, NeoTxError};
use crate::format::{ResultFormat, ResultFormats};
use crate::record::Record;
use crate::wire::RawStatementResult;

/// A node as rendered by the `graph` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A relationship as rendered by the `graph` format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphRelationship {
    pub id: String,
    #[serde(rename = "type")]
    pub rel_type: String,
    #[serde(rename = "startNode")]
    pub start_node: String,
    #[serde(rename = "endNode")]
    pub end_node: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// The subgraph touched by one result row.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Subgraph {
    #[serde(default)]
    pub nodes: Vec<GraphNode>,
    #[serde(default)]
    pub relationships: Vec<GraphRelationship>,
}

/// One data row rendered in one format.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatData {
    Row(Vec<Value>),
    Rest(Vec<Value>),
    Graph(Subgraph),
}

impl FormatData {
    /// Decode the part of `entry` that belongs to `format`.
    ///
    /// Returns `Ok(None)` when the server did not render that format for the
    /// row.
    pub fn decode(format: ResultFormat, entry: &mut Map<String, Value>) -> Result<Option<Self>, NeoTxError> {
        let Some(value) = entry.remove(format.data_key()) else {
            return Ok(None);
        };
        let data = match format {
            ResultFormat::Row => FormatData::Row(expect_list(value, format)?),
            ResultFormat::Rest => FormatData::Rest(expect_list(value, format)?),
            ResultFormat::Graph => FormatData::Graph(serde_json::from_value(value).map_err(|e| {
                NeoTxError::from(e).with_context("decoding graph result")
            })?),
        };
        Ok(Some(data))
    }
}

fn expect_list(value: Value, format: ResultFormat) -> Result<Vec<Value>, NeoTxError> {
    match value {
        Value::Array(values) => Ok(values),
        other => Err(NeoTxError::type_mismatch("List", json_type_name(&other), format.data_key())),
    }
}

/// A row whose first value is null is an optional match that found nothing.
fn is_empty_match(values: &[Value]) -> bool {
    matches!(values.first(), Some(Value::Null))
}

/// Results of a flush, flattened across statements in request order.
///
/// Each list is filled only from statements that requested the matching
/// format.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResults {
    /// `row` results, one record per data row.
    pub rows: Vec<Record>,
    /// `rest` results, one record per data row.
    pub rest: Vec<Record>,
    /// `graph` results, one subgraph per data row.
    pub graph: Vec<Subgraph>,
}

impl QueryResults {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.rest.is_empty() && self.graph.is_empty()
    }

    /// The records of `format`; empty for [`ResultFormat::Graph`].
    pub fn records(&self, format: ResultFormat) -> &[Record] {
        match format {
            ResultFormat::Row => &self.rows,
            ResultFormat::Rest => &self.rest,
            ResultFormat::Graph => &[],
        }
    }

    fn push(&mut self, columns: &[String], data: FormatData) {
        match data {
            FormatData::Row(values) if !is_empty_match(&values) => {
                self.rows.push(Record::from_columns(columns, values))
            }
            FormatData::Rest(values) if !is_empty_match(&values) => {
                self.rest.push(Record::from_columns(columns, values))
            }
            FormatData::Graph(subgraph) => self.graph.push(subgraph),
            _ => {}
        }
    }
}

/// Normalize the raw `results` of a response.
///
/// `formats[i]` is the format set that was sent with statement `i`; results
/// without a matching entry fall back to `row`.
pub fn normalize(results: Vec<RawStatementResult>, formats: &[ResultFormats]) -> Result<QueryResults, NeoTxError> {
    let fallback = ResultFormats::row();
    let mut out = QueryResults::default();

    for (i, result) in results.into_iter().enumerate() {
        let requested = formats.get(i).unwrap_or(&fallback);
        let requested = if requested.is_empty() { &fallback } else { requested };
        for mut entry in result.data {
            for format in requested.iter() {
                let decoded = FormatData::decode(format, &mut entry)
                    .map_err(|e| e.with_context(format!("statement {i}")))?;
                if let Some(data) = decoded {
                    out.push(&result.columns, data);
                }
            }
        }
    }

    Ok(out)
}
