//! Scripted transport double shared by the session tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use neotx_core::{Method, NeoTxError, Transport, TransportResponse};
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

pub enum Reply {
    Response(TransportResponse),
    Unreachable(String),
}

/// Answers requests from a queue and records everything it was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Reply>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Reply::Response(TransportResponse::new(status, body)));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.replies.lock().unwrap().push_back(Reply::Unreachable(message.to_owned()));
        self
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> Request {
        self.requests.lock().unwrap().last().cloned().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<TransportResponse, NeoTxError> {
        self.requests.lock().unwrap().push(Request {
            method,
            path: path.to_owned(),
            body,
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::Unreachable(message)) => Err(NeoTxError::transport(message)),
            None => panic!("unexpected request: {method} {path}"),
        }
    }
}

pub const EXPIRES: &str = "Tue, 24 Jun 2014 13:06:32 +0000";

/// A successful response of an open transaction.
pub fn open_response(handle: u64, results: Value) -> Value {
    json!({
        "commit": format!("http://localhost:7474/db/data/transaction/{handle}/commit"),
        "results": results,
        "transaction": { "expires": EXPIRES },
        "errors": []
    })
}

/// A successful commit response.
pub fn commit_response(results: Value) -> Value {
    json!({ "results": results, "errors": [] })
}

pub fn rest_node(id: u64, data: Value) -> Value {
    json!({
        "self": format!("http://localhost:7474/db/data/node/{id}"),
        "data": data
    })
}
