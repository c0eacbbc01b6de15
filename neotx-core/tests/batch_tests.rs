use neotx_core::{NeoTxError, Params, ResultFormat, ResultFormats, Statement, StatementBatch};
use serde_json::json;

#[test]
fn test_drain_preserves_insertion_order() {
    let mut batch = StatementBatch::new();
    for i in 0..5 {
        batch.push(Statement::new(format!("RETURN {i}"))).unwrap();
    }
    let drained = batch.drain();
    let texts: Vec<&str> = drained.iter().map(|s| s.text()).collect();
    assert_eq!(texts, vec!["RETURN 0", "RETURN 1", "RETURN 2", "RETURN 3", "RETURN 4"]);
    assert!(batch.is_empty());
    assert!(batch.drain().is_empty());
}

#[test]
fn test_add_defaults_parameters_to_empty_map() {
    let mut batch = StatementBatch::new();
    batch.add("MATCH (n) RETURN n", None, None).unwrap();
    let drained = batch.drain();
    assert!(drained[0].parameters().is_empty());
    assert!(drained[0].own_formats().is_none());
}

#[test]
fn test_add_keeps_parameters_and_formats() {
    let mut params = Params::new();
    params.insert("props".into(), json!({"name": "My Node"}));
    let mut batch = StatementBatch::new();
    batch
        .add("CREATE (n {props}) RETURN n", Some(params.clone()), Some(ResultFormats::rest()))
        .unwrap();
    let drained = batch.drain();
    assert_eq!(drained[0].text(), "CREATE (n {props}) RETURN n");
    assert_eq!(drained[0].parameters(), &params);
    assert_eq!(drained[0].own_formats(), Some(&ResultFormats::rest()));
}

#[test]
fn test_empty_text_is_rejected() {
    let mut batch = StatementBatch::new();
    let err = batch.add("", None, None).unwrap_err();
    assert!(matches!(err, NeoTxError::InvalidStatement(_)));
    let err = batch.push(Statement::new("   \n")).unwrap_err();
    assert!(matches!(err, NeoTxError::InvalidStatement(_)));
    assert!(batch.is_empty());
}

#[test]
fn test_statement_params_replace_earlier_values() {
    let statement = Statement::new("START node = node({id}) RETURN node")
        .param("id", 1)
        .param("id", 2);
    assert_eq!(statement.get_param("id"), Some(&json!(2)));
}

#[test]
fn test_effective_formats_fall_back_to_default() {
    let default = ResultFormats::row();
    let own = Statement::new("RETURN 1").formats([ResultFormat::Rest, ResultFormat::Graph]);
    let inherited = Statement::new("RETURN 1");
    assert_eq!(inherited.effective_formats(&default), &default);
    assert!(own.effective_formats(&default).contains(ResultFormat::Graph));
    assert!(!own.effective_formats(&default).contains(ResultFormat::Row));
}

#[test]
fn test_formats_serialize_with_wire_names() {
    let formats = ResultFormats::from([ResultFormat::Graph, ResultFormat::Row, ResultFormat::Rest]);
    assert_eq!(serde_json::to_value(&formats).unwrap(), json!(["row", "REST", "graph"]));
}
