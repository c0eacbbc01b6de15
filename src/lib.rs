#![doc = r#"
A client for the Neo4j transactional HTTP endpoint.

`neotx` batches Cypher statements into server-side transactions that stay
open across requests, then commits or rolls them back. Responses come back
normalized per result format (`row`, `REST`, `graph`), and typed helpers
deserialize rows into your own structs. It targets the Neo4j 2.x REST API
(`/db/data/transaction`).

# Quick start

## Connect

```rust,no_run
use neotx::prelude::*;

# fn example() -> Result<(), NeoTxError> {
// NEO4J_URL, NEO4J_PORT, NEO4J_USER, NEO4J_PASS over localhost:7474
let client = Client::from_env()?;

// Or explicitly:
let client = Client::new(ConnectionConfig::new("db.example.com", 7474).with_credentials("neo4j", "secret"))?;
# Ok(())
# }
```

## Run a transaction

```rust,no_run
use neotx::prelude::*;
use serde_json::json;

# async fn example(client: &Client) -> Result<(), NeoTxError> {
let mut tx = client.transaction().with_default_formats(ResultFormat::Rest);

tx.add_statement(Statement::new("CREATE (n {props}) RETURN n").param("props", json!({"name": "X"})))?;
let created = tx.begin().await?;          // opens the transaction, handle assigned
tx.keep_alive().await?;                    // extends the lease
tx.add("MATCH (n {name: 'X'}) RETURN n", None)?;
let matched = tx.execute().await?;         // runs inside the same transaction
tx.commit().await?;                        // finishes it; the session is now spent
# Ok(())
# }
```

A session that was never opened commits in a single request. Rolling back
an open session deletes the server transaction.

## Write Cypher

```rust
use neotx::prelude::*;

// String literal, normalized whitespace:
let q: &str = cypher! { START node = node({id}) RETURN node };

// Query with auto-bound parameters:
let id = 42_u64;
let query = cypher_query! {
    START node = node({id}) RETURN node
};
// Expands to: Query::new("...").param("id", id)
```

## Typed results

```rust,no_run
use neotx::prelude::*;
use neotx::query;

#[derive(serde::Deserialize)]
struct Person {
    name: String,
    age: Option<i64>,
}

# async fn example(client: &Client) -> Result<(), NeoTxError> {
let people: Vec<Person> = query::query("MATCH (p:Person) RETURN p.name AS name, p.age AS age")
    .fetch_all(client)
    .await?;

// Inside a transaction:
let mut tx = client.transaction();
let one: Option<Person> = query::query("MATCH (p:Person) RETURN p.name AS name, p.age AS age LIMIT 1")
    .fetch_optional_in(&mut tx)
    .await?;
tx.commit().await?;
# Ok(())
# }
```

## Parameters from structs

```rust
use neotx::prelude::*;

#[derive(ToParams)]
struct CreatePerson {
    name: String,
    age: i64,
    #[neotx(skip)]
    cache_key: u64,
}

let statement = Statement::new("CREATE (p:Person {name: {name}, age: {age}})")
    .params_from(CreatePerson { name: "Alice".into(), age: 30, cache_key: 7 });
assert!(statement.get_param("cache_key").is_none());
```

## Convenience layers

[`QueryBuilder`] queues common graph operations on one transaction;
[`Node`] and [`Relationship`] wrap REST entities with save/delete and
traversal helpers; [`Client`] also manages legacy indexes.

Labels, relationship types and property names cannot be bound as
parameters, so these layers splice them into statement text. Only pass
identifiers you trust.

# Error handling

Every operation returns [`NeoTxError`]. Server-reported failures arrive as
[`NeoTxError::Transaction`] with the server's `{code, message}` list;
unexpected statuses as [`NeoTxError::Protocol`]; network failures as
[`NeoTxError::Transport`]. Nothing is retried or rolled back automatically.
"#]

pub mod builder;
pub mod client;
pub mod config;
pub mod http;
pub mod index;
pub mod node;
pub mod prelude;
pub mod query;
pub mod relationship;
pub mod statements;

pub use neotx_core as core;
pub use neotx_macros::{cypher, cypher_query, ToParams};

pub use builder::QueryBuilder;
pub use client::Client;
pub use config::ConnectionConfig;
pub use http::HttpTransport;
pub use index::{IndexInfo, IndexKind, IndexType};
pub use node::Node;
pub use relationship::Relationship;
pub use statements::Direction;

pub use neotx_core::traits::ToParams as ToParamsTrait;
pub use neotx_core::{
    NeoTxError, QueryResults, Record, ResultFormat, ResultFormats, Statement, TransactionSession, TxOutcome, TxState,
};
