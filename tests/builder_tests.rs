mod common;

use common::{client, FakeServer};
use neotx::core::Method;
use neotx::{Direction, NeoTxError, ResultFormat, TxState};
use serde_json::{json, Value};

fn statements(body: &Value) -> Vec<String> {
    body["statements"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["statement"].as_str().unwrap().to_owned())
        .collect()
}

#[tokio::test]
async fn test_queued_operations_flush_in_one_commit() {
    let server = FakeServer::new();
    server.reply(200, json!({"results": [], "errors": []}));
    let mut builder = client(&server).query_builder();

    builder
        .create_node(json!({"name": "Neo"}))
        .unwrap()
        .set_label(1, "Person")
        .unwrap()
        .set_property(1, "age", 29)
        .unwrap()
        .delete_node(2, true)
        .unwrap();
    assert_eq!(builder.session().pending().len(), 4);
    builder.commit().await.unwrap();

    let request = server.last();
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.path, "/transaction/commit");
    let body = request.body.unwrap();
    let sent = statements(&body);
    assert_eq!(sent[0], "CREATE (node {props})\nRETURN node");
    assert_eq!(sent[1], "START node = node({id})\nSET node:`Person`");
    assert_eq!(sent[2], "START node = node({id})\nSET node.`age` = {value}");
    assert!(sent[3].contains("OPTIONAL MATCH (node) -[relationships]- ()"));
    assert_eq!(body["statements"][2]["parameters"], json!({"id": 1, "value": 29}));
    assert_eq!(builder.session().state(), TxState::Committed);
}

#[test]
fn test_missing_identifiers_are_rejected_before_queueing() {
    let server = FakeServer::new();
    let mut builder = client(&server).query_builder();

    let err = builder.set_label(1, "").unwrap_err();
    assert!(matches!(err, NeoTxError::InvalidStatement(_)));
    assert!(builder.create_relationship(1, 2, " ", Value::Null).is_err());
    assert!(builder.create_index_on("Person", "").is_err());
    assert!(builder.use_index("", "name", "Neo").is_err());
    assert!(builder.set_property(1, "na`me", "x").is_err());
    assert!(builder.session().pending().is_empty());
    assert!(server.requests().is_empty());
}

#[test]
fn test_null_property_value_removes_the_property() {
    let server = FakeServer::new();
    let mut builder = client(&server).query_builder();

    builder.set_property(9, "nickname", Value::Null).unwrap();

    let queued = builder.session().pending().iter().next().unwrap();
    assert_eq!(queued.text(), "START node = node({id})\nREMOVE node.`nickname`");
    assert!(queued.get_param("value").is_none());
}

#[test]
fn test_direction_and_type_shape_the_pattern() {
    let server = FakeServer::new();
    let mut builder = client(&server).query_builder();

    builder
        .relationships(3, Direction::Outgoing, Some("KNOWS"))
        .unwrap()
        .relationships(3, Direction::Incoming, None)
        .unwrap()
        .adjacent_nodes(3, Direction::Both, Some("LIKES"))
        .unwrap();

    let texts: Vec<&str> = builder.session().pending().iter().map(|s| s.text()).collect();
    assert!(texts[0].contains("(node) -[relationships:`KNOWS`]-> ()"));
    assert!(texts[1].contains("(node) <-[relationships]- ()"));
    assert!(texts[2].contains("(node) -[:`LIKES`]- (nodes)"));
}

#[test]
fn test_schema_statements() {
    let server = FakeServer::new();
    let mut builder = client(&server).query_builder();

    builder
        .create_index_on("Person", "name")
        .unwrap()
        .drop_index_on("Person", "name")
        .unwrap()
        .create_constraint("Person", "email")
        .unwrap()
        .drop_constraint("Person", "email")
        .unwrap()
        .use_index("Person", "name", "Neo")
        .unwrap();

    let texts: Vec<&str> = builder.session().pending().iter().map(|s| s.text()).collect();
    assert_eq!(texts[0], "CREATE INDEX ON :`Person`(`name`)");
    assert_eq!(texts[1], "DROP INDEX ON :`Person`(`name`)");
    assert_eq!(texts[2], "CREATE CONSTRAINT ON (node:`Person`) ASSERT node.`email` IS UNIQUE");
    assert_eq!(texts[3], "DROP CONSTRAINT ON (node:`Person`) ASSERT node.`email` IS UNIQUE");
    assert_eq!(texts[4], "MATCH (nodes:`Person`)\nWHERE nodes.`name` = {value}\nRETURN nodes");
}

#[tokio::test]
async fn test_execute_keeps_transaction_open_until_commit() {
    let server = FakeServer::new();
    server
        .reply(
            201,
            json!({
                "commit": "http://localhost:7474/db/data/transaction/12/commit",
                "results": [{"columns": ["node"], "data": [{"rest": [common::rest_node(5, json!({"name": "Neo"}))]}]}],
                "transaction": {"expires": "Tue, 24 Jun 2014 13:06:32 +0000"},
                "errors": []
            }),
        )
        .reply(200, json!({"results": [], "errors": []}));
    let mut builder = client(&server).query_builder();
    builder.config(ResultFormat::Rest, true);

    let outcome = builder.node_by_id(5).unwrap().execute().await.unwrap();
    let results = outcome.into_parsed().unwrap();
    assert_eq!(results.rest.len(), 1);
    assert_eq!(builder.session().handle(), Some(12));

    builder.remove_label(5, "Person").unwrap();
    builder.commit().await.unwrap();

    let paths: Vec<String> = server.requests().into_iter().map(|r| r.path).collect();
    assert_eq!(paths, ["/transaction/", "/transaction/12/commit"]);
}

#[tokio::test]
async fn test_rollback_of_unopened_builder_sends_nothing() {
    let server = FakeServer::new();
    let mut builder = client(&server).query_builder();
    builder.node_by_id(1).unwrap();

    builder.rollback().await.unwrap();

    assert_eq!(builder.session().state(), TxState::RolledBack);
    assert!(builder.session().pending().is_empty());
    assert!(server.requests().is_empty());
}
