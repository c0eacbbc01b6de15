//! In-memory server double for the client tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use neotx::core::{Method, NeoTxError, Transport, TransportResponse};
use neotx::Client;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

/// Answers requests from a queue and records everything it was sent.
#[derive(Default)]
pub struct FakeServer {
    replies: Mutex<VecDeque<TransportResponse>>,
    requests: Mutex<Vec<Request>>,
}

impl FakeServer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(TransportResponse::new(status, body));
        self
    }

    /// Queue a single-shot commit answer with one statement result.
    pub fn commit(&self, columns: &[&str], data: Value) -> &Self {
        self.reply(
            200,
            json!({
                "results": [{ "columns": columns, "data": data }],
                "errors": []
            }),
        )
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> Request {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }

    /// Text of the first statement of the last request.
    pub fn last_statement(&self) -> String {
        let body = self.last().body.expect("request had no body");
        body["statements"][0]["statement"].as_str().unwrap().to_owned()
    }

    pub fn last_parameters(&self) -> Value {
        let body = self.last().body.expect("request had no body");
        body["statements"][0]["parameters"].clone()
    }
}

#[async_trait]
impl Transport for FakeServer {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<TransportResponse, NeoTxError> {
        self.requests.lock().unwrap().push(Request {
            method,
            path: path.to_owned(),
            body,
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(response) => Ok(response),
            None => panic!("unexpected request: {method} {path}"),
        }
    }
}

pub fn client(server: &Arc<FakeServer>) -> Client {
    Client::with_transport(server.clone())
}

pub fn rest_node(id: u64, data: Value) -> Value {
    json!({
        "self": format!("http://localhost:7474/db/data/node/{id}"),
        "data": data
    })
}

pub fn rest_relationship(id: u64, start: u64, end: u64, rel_type: &str, data: Value) -> Value {
    json!({
        "self": format!("http://localhost:7474/db/data/relationship/{id}"),
        "start": format!("http://localhost:7474/db/data/node/{start}"),
        "end": format!("http://localhost:7474/db/data/node/{end}"),
        "type": rel_type,
        "data": data
    })
}
