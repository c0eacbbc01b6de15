use neotx_core::wire::{handle_from_commit_uri, parse_expiry, TxRequest, TxResponse};
use neotx_core::{id_from_uri, ResultFormats, RestNode, RestRelationship, Statement};
use serde_json::json;

#[test]
fn test_handle_from_commit_uri() {
    assert_eq!(handle_from_commit_uri("http://localhost:7474/db/data/transaction/7/commit"), Some(7));
    assert_eq!(handle_from_commit_uri("/transaction/123/commit/"), Some(123));
    assert_eq!(handle_from_commit_uri("http://localhost:7474/db/data/transaction/7"), None);
    assert_eq!(handle_from_commit_uri("http://localhost:7474/db/data/transaction/commit"), None);
}

#[test]
fn test_parse_expiry() {
    let expires = parse_expiry("Tue, 24 Jun 2014 13:06:32 +0000").unwrap();
    assert_eq!(expires.to_rfc3339(), "2014-06-24T13:06:32+00:00");
    assert!(parse_expiry("tomorrow").is_none());
}

#[test]
fn test_request_body_shape() {
    let statements = vec![
        Statement::new("CREATE (n {props}) RETURN n").param("props", json!({"name": "X"})),
        Statement::new("MATCH (n) RETURN n").formats(ResultFormats::graph()),
    ];
    let default = ResultFormats::rest();
    let body = serde_json::to_value(TxRequest::new(&statements, &default)).unwrap();
    assert_eq!(
        body,
        json!({
            "statements": [
                {
                    "statement": "CREATE (n {props}) RETURN n",
                    "parameters": {"props": {"name": "X"}},
                    "resultDataContents": ["REST"]
                },
                {
                    "statement": "MATCH (n) RETURN n",
                    "parameters": {},
                    "resultDataContents": ["graph"]
                }
            ]
        })
    );
    assert_eq!(serde_json::to_value(TxRequest::empty()).unwrap(), json!({"statements": []}));
}

#[test]
fn test_response_decoding() {
    let response: TxResponse = serde_json::from_value(json!({
        "commit": "http://localhost:7474/db/data/transaction/9/commit",
        "results": [{"columns": ["n"], "data": [{"row": [{"name": "X"}]}]}],
        "transaction": {"expires": "Tue, 24 Jun 2014 13:06:32 +0000"},
        "errors": []
    }))
    .unwrap();
    assert_eq!(response.handle(), Some(9));
    assert!(response.expires_at().is_some());
    assert_eq!(response.results[0].columns, vec!["n"]);

    let failed: TxResponse = serde_json::from_value(json!({
        "results": [],
        "errors": [{"code": "Neo.ClientError.Statement.InvalidSyntax", "message": "Invalid input"}]
    }))
    .unwrap();
    assert_eq!(failed.errors[0].code, "Neo.ClientError.Statement.InvalidSyntax");
    assert_eq!(failed.handle(), None);
}

#[test]
fn test_entity_ids() {
    assert_eq!(id_from_uri("http://localhost:7474/db/data/node/42"), Some(42));
    assert_eq!(id_from_uri("http://localhost:7474/db/data/relationship/7"), Some(7));
    assert_eq!(id_from_uri("http://localhost:7474/db/data/transaction/7"), None);
    assert_eq!(id_from_uri("http://localhost:7474/db/data/node/abc"), None);

    let node = RestNode::from_value(&json!({
        "self": "http://localhost:7474/db/data/node/3",
        "data": {"name": "Trinity", "age": 29}
    }))
    .unwrap();
    assert_eq!(node.id().unwrap(), 3);
    assert_eq!(node.property::<String>("name").unwrap().as_deref(), Some("Trinity"));
    assert_eq!(node.property::<i64>("missing").unwrap(), None);
    assert!(node.property::<i64>("name").is_err());

    let rel = RestRelationship::from_value(&json!({
        "self": "http://localhost:7474/db/data/relationship/11",
        "start": "http://localhost:7474/db/data/node/3",
        "end": "http://localhost:7474/db/data/node/4",
        "type": "LOVES",
        "data": {"since": "1998"}
    }))
    .unwrap();
    assert_eq!(rel.id().unwrap(), 11);
    assert_eq!(rel.start_node().unwrap(), 3);
    assert_eq!(rel.end_node().unwrap(), 4);
    assert_eq!(rel.rel_type, "LOVES");
}

#[test]
fn test_entity_from_non_object_fails() {
    assert!(RestNode::from_value(&json!(null)).is_err());
    assert!(RestRelationship::from_value(&json!([1, 2])).is_err());
}
