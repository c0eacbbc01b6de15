use neotx_core::normalize::normalize;
use neotx_core::wire::RawStatementResult;
use neotx_core::{FormatData, NeoTxError, ResultFormat, ResultFormats};
use serde_json::{json, Value};

fn raw(value: Value) -> Vec<RawStatementResult> {
    serde_json::from_value(value).unwrap()
}

#[test]
fn test_row_records_are_keyed_by_column() {
    let results = raw(json!([
        {"columns": ["name", "age"], "data": [{"row": ["Neo", 29]}, {"row": ["Trinity", 31]}]}
    ]));
    let normalized = normalize(results, &[ResultFormats::row()]).unwrap();
    assert_eq!(normalized.rows.len(), 2);
    assert_eq!(normalized.rows[0].get::<String>("name").unwrap(), "Neo");
    assert_eq!(normalized.rows[1].get::<i64>("age").unwrap(), 31);
    assert!(normalized.rest.is_empty());
    assert!(normalized.graph.is_empty());
}

#[test]
fn test_null_first_value_rows_are_dropped() {
    let results = raw(json!([
        {"columns": ["relationships"], "data": [{"rest": [null]}]}
    ]));
    let normalized = normalize(results, &[ResultFormats::rest()]).unwrap();
    assert!(normalized.rest.is_empty());
    assert!(normalized.is_empty());
}

#[test]
fn test_results_concatenate_in_statement_order() {
    let results = raw(json!([
        {"columns": ["n"], "data": [{"rest": [{"self": "http://h/db/data/node/1", "data": {}}]}]},
        {"columns": ["x"], "data": [{"row": [7]}]},
        {"columns": ["n"], "data": [{"rest": [{"self": "http://h/db/data/node/2", "data": {}}]}]}
    ]));
    let formats = [ResultFormats::rest(), ResultFormats::row(), ResultFormats::rest()];
    let normalized = normalize(results, &formats).unwrap();
    assert_eq!(normalized.rest.len(), 2);
    assert_eq!(normalized.rows.len(), 1);
    let first: Value = normalized.rest[0].get("n").unwrap();
    let second: Value = normalized.rest[1].get("n").unwrap();
    assert_eq!(first["self"], "http://h/db/data/node/1");
    assert_eq!(second["self"], "http://h/db/data/node/2");
}

#[test]
fn test_graph_and_rest_from_one_statement() {
    let results = raw(json!([{
        "columns": ["node", "r"],
        "data": [{
            "rest": [{"self": "http://h/db/data/node/59", "data": {"name": "Neo"}}, null],
            "graph": {
                "nodes": [{"id": "59", "labels": ["Person"], "properties": {"name": "Neo"}}],
                "relationships": [{
                    "id": "3", "type": "KNOWS", "startNode": "59", "endNode": "60", "properties": {}
                }]
            }
        }]
    }]));
    let formats = [ResultFormats::from([ResultFormat::Rest, ResultFormat::Graph])];
    let normalized = normalize(results, &formats).unwrap();
    assert_eq!(normalized.rest.len(), 1);
    assert_eq!(normalized.graph.len(), 1);
    let subgraph = &normalized.graph[0];
    assert_eq!(subgraph.nodes[0].labels, vec!["Person"]);
    assert_eq!(subgraph.relationships[0].rel_type, "KNOWS");
    assert_eq!(subgraph.relationships[0].end_node, "60");
}

#[test]
fn test_unrequested_formats_are_ignored() {
    let results = raw(json!([
        {"columns": ["x"], "data": [{"row": [1], "rest": [1]}]}
    ]));
    let normalized = normalize(results, &[ResultFormats::rest()]).unwrap();
    assert!(normalized.rows.is_empty());
    assert_eq!(normalized.rest.len(), 1);
}

#[test]
fn test_wrong_shape_is_a_type_mismatch() {
    let mut entry = serde_json::Map::new();
    entry.insert("row".into(), json!({"not": "a list"}));
    let err = FormatData::decode(ResultFormat::Row, &mut entry).unwrap_err();
    match err {
        NeoTxError::TypeMismatch { expected, got, .. } => {
            assert_eq!(expected, "List");
            assert_eq!(got, "Map");
        }
        other => panic!("expected TypeMismatch, got: {other}"),
    }
}

#[test]
fn test_record_deserializes_into_struct() {
    #[derive(serde::Deserialize)]
    struct Person {
        name: String,
        age: Option<i64>,
    }

    let results = raw(json!([
        {"columns": ["name", "age"], "data": [{"row": ["Smith", null]}]}
    ]));
    let normalized = normalize(results, &[ResultFormats::row()]).unwrap();
    let person: Person = normalized.rows[0].deserialize().unwrap();
    assert_eq!(person.name, "Smith");
    assert_eq!(person.age, None);
    assert!(normalized.rows[0].get::<String>("missing").is_err());
}
