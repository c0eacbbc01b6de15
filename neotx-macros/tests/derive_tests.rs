use neotx_core::traits::ToParams;
use neotx_macros::{cypher, ToParams};
use serde_json::json;

#[derive(ToParams)]
#[neotx(crate = "neotx_core")]
struct CreatePerson {
    name: String,
    age: i64,
    nickname: Option<String>,
}

#[derive(ToParams)]
#[neotx(crate = "::neotx_core")]
struct SetProperty {
    #[neotx(skip)]
    #[allow(dead_code)]
    cache_key: u64,
    id: u64,
    #[neotx(param = "value")]
    age: i64,
}

#[test]
fn test_cypher_macro() {
    let query = cypher! {
        START node = node({id}) RETURN node
    };
    // token spacing around groups is up to the compiler
    assert!(query.starts_with("START node = node"));
    assert!(query.contains("({id})"));
    assert!(query.ends_with("RETURN node"));
}

#[test]
fn test_cypher_macro_relationship_pattern() {
    let query = cypher! {
        MATCH (a:Person) -[r:KNOWS]-> (b) RETURN b.name
    };
    assert!(query.contains("(a:Person)"));
    assert!(query.contains("[r:KNOWS]"));
    assert!(query.contains("b.name"));
}

#[test]
fn test_to_params_uses_field_names() {
    let params = CreatePerson {
        name: "Trinity".into(),
        age: 31,
        nickname: None,
    }
    .to_params();
    assert_eq!(params["name"], json!("Trinity"));
    assert_eq!(params["age"], json!(31));
    assert_eq!(params["nickname"], json!(null));
}

#[test]
fn test_to_params_skip_and_rename() {
    let params = SetProperty {
        cache_key: 99,
        id: 4,
        age: 29,
    }
    .to_params();
    assert_eq!(params.len(), 2);
    assert!(!params.contains_key("cache_key"));
    assert_eq!(params["id"], json!(4));
    assert_eq!(params["value"], json!(29));
}
