//! Column-keyed access to normalized result rows.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{json_type_name, NeoTxError};

/// One result row, keyed by column name.
///
/// Produced by normalization for the `row` and `rest` formats. Values keep
/// the shape the server rendered them in: with `rest`, a node is an object
/// carrying `self` and `data`; with `row`, it is its property map.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Zip `columns` with `values`. Extra values without a column are dropped
    /// and missing values become null.
    pub fn from_columns(columns: &[String], values: Vec<Value>) -> Self {
        let mut values = values.into_iter();
        let map = columns
            .iter()
            .map(|c| (c.clone(), values.next().unwrap_or(Value::Null)))
            .collect();
        Record(map)
    }

    /// Read a value by column name.
    ///
    /// Returns `None` if the column does not exist in the row.
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Check whether a column exists in the row.
    pub fn has_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Deserialize one column into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, NeoTxError> {
        let value = self
            .get_value(key)
            .ok_or_else(|| NeoTxError::missing_field(key, "record"))?;
        serde_json::from_value(value.clone()).map_err(|e| {
            NeoTxError::type_mismatch(std::any::type_name::<T>(), json_type_name(value), &e.to_string())
                .with_context(format!("column '{key}'"))
        })
    }

    /// Deserialize the whole row, treating columns as struct fields.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, NeoTxError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Record(map)
    }
}
