//! Statement templates used by the convenience layers.
//!
//! Ids and values are always bound as parameters. Labels, relationship
//! types, property names and index names cannot be parameters in Cypher, so
//! they are spliced into the statement text. That makes them an injection
//! point: only pass identifiers you control. Identifiers are checked to be
//! non-empty and free of backticks, nothing more.

use serde_json::Value;

use crate::core::{IntoParamValue, NeoTxError, Statement};

/// Which relationships of a node to follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Both,
    Incoming,
    Outgoing,
}

impl Direction {
    /// The relationship pattern between `(node)` and the other end, with
    /// `inner` as the bracketed part.
    fn pattern(self, inner: &str) -> String {
        match self {
            Direction::Both => format!("-[{inner}]-"),
            Direction::Incoming => format!("<-[{inner}]-"),
            Direction::Outgoing => format!("-[{inner}]->"),
        }
    }
}

/// Check an identifier that will be spliced into statement text.
pub fn identifier<'a>(value: &'a str, what: &str) -> Result<&'a str, NeoTxError> {
    if value.trim().is_empty() {
        return Err(NeoTxError::invalid_statement(format!("{what} is required")));
    }
    if value.contains('`') {
        return Err(NeoTxError::invalid_statement(format!("{what} must not contain a backtick")));
    }
    Ok(value)
}

fn rel_type_clause(rel_type: Option<&str>) -> Result<String, NeoTxError> {
    match rel_type {
        Some(t) => Ok(format!(":`{}`", identifier(t, "relationship type")?)),
        None => Ok(String::new()),
    }
}

pub fn node_by_id(id: u64) -> Statement {
    Statement::new("START node = node({id})\nRETURN node").param("id", id)
}

pub fn create_node(props: Value) -> Result<Statement, NeoTxError> {
    let props = match props {
        Value::Null => Value::Object(Default::default()),
        Value::Object(map) => Value::Object(map),
        _ => return Err(NeoTxError::invalid_statement("node properties must be an object")),
    };
    Ok(Statement::new("CREATE (node {props})\nRETURN node").param("props", props))
}

/// Delete a node; with `force`, its relationships go first.
pub fn delete_node(id: u64, force: bool) -> Statement {
    let text = if force {
        "START node = node({id})\nOPTIONAL MATCH (node) -[relationships]- ()\nDELETE relationships, node"
    } else {
        "START node = node({id})\nDELETE node"
    };
    Statement::new(text).param("id", id)
}

pub fn set_label(id: u64, label: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    Ok(Statement::new(format!("START node = node({{id}})\nSET node:`{label}`")).param("id", id))
}

pub fn remove_label(id: u64, label: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    Ok(Statement::new(format!("START node = node({{id}})\nREMOVE node:`{label}`")).param("id", id))
}

/// Set one property; a null value removes it.
pub fn set_property(id: u64, property: &str, value: impl IntoParamValue) -> Result<Statement, NeoTxError> {
    let property = identifier(property, "property name")?;
    let value = value.into_param_value();
    if value.is_null() {
        return Ok(Statement::new(format!("START node = node({{id}})\nREMOVE node.`{property}`")).param("id", id));
    }
    Ok(Statement::new(format!("START node = node({{id}})\nSET node.`{property}` = {{value}}"))
        .param("id", id)
        .param("value", value))
}

/// Replace all properties of a node.
pub fn set_properties(id: u64, properties: Value) -> Result<Statement, NeoTxError> {
    if !properties.is_object() {
        return Err(NeoTxError::invalid_statement("properties must be an object"));
    }
    Ok(Statement::new("START node = node({id})\nSET node = {properties}")
        .param("id", id)
        .param("properties", properties))
}

pub fn create_relationship(from: u64, to: u64, rel_type: &str, props: Value) -> Result<Statement, NeoTxError> {
    let rel_type = identifier(rel_type, "relationship type")?;
    let props = if props.is_null() { Value::Object(Default::default()) } else { props };
    Ok(Statement::new(format!(
        "START fromNode = node({{fromId}}), toNode = node({{toId}})\n\
         CREATE (fromNode) -[relationship:`{rel_type}` {{props}}]-> (toNode)\n\
         RETURN relationship"
    ))
    .param("fromId", from)
    .param("toId", to)
    .param("props", props))
}

pub fn relationships(id: u64, direction: Direction, rel_type: Option<&str>) -> Result<Statement, NeoTxError> {
    let pattern = direction.pattern(&format!("relationships{}", rel_type_clause(rel_type)?));
    Ok(Statement::new(format!(
        "START node = node({{id}})\nOPTIONAL MATCH (node) {pattern} ()\nRETURN relationships"
    ))
    .param("id", id))
}

pub fn adjacent_nodes(id: u64, direction: Direction, rel_type: Option<&str>) -> Result<Statement, NeoTxError> {
    let pattern = direction.pattern(&rel_type_clause(rel_type)?);
    Ok(Statement::new(format!(
        "START node = node({{id}})\nOPTIONAL MATCH (node) {pattern} (nodes)\nRETURN nodes"
    ))
    .param("id", id))
}

pub fn relationship_by_id(id: u64) -> Statement {
    Statement::new("START relationship = relationship({id})\nRETURN relationship").param("id", id)
}

pub fn save_relationship(id: u64, props: Value) -> Statement {
    Statement::new("START relationship = relationship({id})\nSET relationship = {props}")
        .param("id", id)
        .param("props", props)
}

pub fn delete_relationship(id: u64) -> Statement {
    Statement::new("START relationship = relationship({id})\nDELETE relationship").param("id", id)
}

pub fn create_index_on(label: &str, property: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    let property = identifier(property, "indexed property")?;
    Ok(Statement::new(format!("CREATE INDEX ON :`{label}`(`{property}`)")))
}

pub fn drop_index_on(label: &str, property: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    let property = identifier(property, "indexed property")?;
    Ok(Statement::new(format!("DROP INDEX ON :`{label}`(`{property}`)")))
}

/// Look nodes up by an indexed label property.
pub fn use_index(label: &str, property: &str, value: impl IntoParamValue) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    let property = identifier(property, "indexed property")?;
    Ok(Statement::new(format!(
        "MATCH (nodes:`{label}`)\nWHERE nodes.`{property}` = {{value}}\nRETURN nodes"
    ))
    .param("value", value))
}

pub fn create_constraint(label: &str, property: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    let property = identifier(property, "property")?;
    Ok(Statement::new(format!(
        "CREATE CONSTRAINT ON (node:`{label}`) ASSERT node.`{property}` IS UNIQUE"
    )))
}

pub fn drop_constraint(label: &str, property: &str) -> Result<Statement, NeoTxError> {
    let label = identifier(label, "label")?;
    let property = identifier(property, "property")?;
    Ok(Statement::new(format!(
        "DROP CONSTRAINT ON (node:`{label}`) ASSERT node.`{property}` IS UNIQUE"
    )))
}

/// Full-text style lookup in a legacy index, e.g. `name:Tri*`.
pub fn query_index(kind: &str, index: &str, query: &str) -> Result<Statement, NeoTxError> {
    let index = identifier(index, "index name")?;
    Ok(Statement::new(format!("START entities = {kind}:`{index}`({{query}})\nRETURN entities")).param("query", query))
}

/// Exact key/value lookup in a legacy index.
pub fn match_index(kind: &str, index: &str, key: &str, value: impl IntoParamValue) -> Result<Statement, NeoTxError> {
    let index = identifier(index, "index name")?;
    let key = identifier(key, "index key")?;
    Ok(Statement::new(format!("START entities = {kind}:`{index}`(`{key}` = {{value}})\nRETURN entities"))
        .param("value", value))
}
