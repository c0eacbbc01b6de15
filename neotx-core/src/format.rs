//! Result formats the server can render statement results in.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One shape the server can emit for a statement's results.
///
/// Serialized with the exact names the transactional endpoint expects in
/// `resultDataContents`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ResultFormat {
    /// Plain arrays of column values.
    #[serde(rename = "row")]
    Row,
    /// Values rendered the way the REST API renders them (nodes carry `self`
    /// URIs and a `data` map).
    #[serde(rename = "REST")]
    Rest,
    /// A `{nodes, relationships}` subgraph per result row.
    #[serde(rename = "graph")]
    Graph,
}

impl ResultFormat {
    /// Key under which this format appears in each entry of a result's `data`.
    pub fn data_key(self) -> &'static str {
        match self {
            ResultFormat::Row => "row",
            ResultFormat::Rest => "rest",
            ResultFormat::Graph => "graph",
        }
    }
}

impl fmt::Display for ResultFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.data_key())
    }
}

/// An ordered, duplicate-free set of [`ResultFormat`]s.
///
/// An empty set is legal on the wire; the server then falls back to `row`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultFormats(BTreeSet<ResultFormat>);

impl ResultFormats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row() -> Self {
        Self::from_iter([ResultFormat::Row])
    }

    pub fn rest() -> Self {
        Self::from_iter([ResultFormat::Rest])
    }

    pub fn graph() -> Self {
        Self::from_iter([ResultFormat::Graph])
    }

    /// Add a format, returning `self` for chaining.
    pub fn with(mut self, format: ResultFormat) -> Self {
        self.0.insert(format);
        self
    }

    pub fn contains(&self, format: ResultFormat) -> bool {
        self.0.contains(&format)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ResultFormat> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<ResultFormat> for ResultFormats {
    fn from_iter<I: IntoIterator<Item = ResultFormat>>(iter: I) -> Self {
        ResultFormats(iter.into_iter().collect())
    }
}

impl From<ResultFormat> for ResultFormats {
    fn from(format: ResultFormat) -> Self {
        Self::from_iter([format])
    }
}

impl<const N: usize> From<[ResultFormat; N]> for ResultFormats {
    fn from(formats: [ResultFormat; N]) -> Self {
        Self::from_iter(formats)
    }
}
