//! [`Transport`] over HTTP with reqwest.

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::config::ConnectionConfig;
use crate::core::{Method, NeoTxError, Transport, TransportResponse};

/// Sends JSON requests to `base_url + path`.
///
/// Requests carry basic auth when the config has a user. A body that is not
/// JSON is kept as a string on error responses, so a proxy's HTML error page
/// still surfaces as [`NeoTxError::Protocol`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    user: Option<String>,
    pass: Option<String>,
}

impl HttpTransport {
    pub fn new(config: &ConnectionConfig) -> Result<Self, NeoTxError> {
        config.validate()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(NeoTxError::transport)?;
        Ok(Self {
            client,
            base_url: config.base_url(),
            user: config.user.clone(),
            pass: config.pass.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<TransportResponse, NeoTxError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        }
        .header(ACCEPT, "application/json; charset=UTF-8");

        if let Some(user) = &self.user {
            request = request.basic_auth(user, self.pass.as_ref());
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        debug!("{method} {url}");
        let response = request.send().await.map_err(NeoTxError::transport)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(NeoTxError::transport)?;
        debug!("{method} {url} -> {status} ({} bytes)", bytes.len());

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(_) if !(200..300).contains(&status) => Value::String(String::from_utf8_lossy(&bytes).into_owned()),
                Err(e) => return Err(e.into()),
            }
        };
        Ok(TransportResponse::new(status, body))
    }
}
