use neotx::cypher_query;
use serde_json::json;

#[test]
fn test_cypher_query_with_params() {
    let name = "Alice";
    let age: i64 = 30;
    let q = cypher_query! {
        MATCH (u:User {name: $name, age: $age}) RETURN u
    };

    let statement = q.statement();
    assert_eq!(statement.get_param("name"), Some(&json!("Alice")));
    assert_eq!(statement.get_param("age"), Some(&json!(30)));
    assert!(statement.text().starts_with("MATCH"));
}

#[test]
fn test_cypher_query_no_params() {
    let q = cypher_query! {
        START n = node(*) RETURN n
    };

    assert!(q.statement().parameters().is_empty());
}

#[test]
fn test_cypher_query_dedup_params() {
    let name = "Alice";
    // $name appears twice but should only generate one .param() call
    let q = cypher_query! {
        MATCH (u:User {name: $name}) WHERE u.name = $name RETURN u
    };

    assert_eq!(q.statement().parameters().len(), 1);
}

#[test]
fn test_cypher_query_binds_legacy_placeholders() {
    let id = 42_u64;
    let props = json!({"name": "Neo"});
    let q = cypher_query! {
        START node = node({id}) SET node = {props} RETURN node
    };

    let statement = q.statement();
    assert_eq!(statement.get_param("id"), Some(&json!(42)));
    assert_eq!(statement.get_param("props"), Some(&json!({"name": "Neo"})));
}

#[test]
fn test_cypher_query_requests_row_format() {
    let q = cypher_query! { RETURN 1 AS one };

    let formats = q.statement().own_formats().expect("typed queries pick their format");
    assert!(formats.contains(neotx::ResultFormat::Row));
}

#[derive(neotx::ToParams)]
struct Rename {
    id: u64,
    #[neotx(param = "value")]
    name: String,
}

#[test]
fn test_derived_params_resolve_through_the_facade() {
    let q = neotx::query::query("START n = node({id}) SET n.name = {value}").params_from(Rename {
        id: 3,
        name: "Morpheus".into(),
    });

    let statement = q.statement();
    assert_eq!(statement.get_param("id"), Some(&json!(3)));
    assert_eq!(statement.get_param("value"), Some(&json!("Morpheus")));
}
