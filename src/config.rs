//! Connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::NeoTxError;

/// Where the server lives and how to authenticate.
///
/// [`from_env`](Self::from_env) layers `NEO4J_*` environment variables over
/// the defaults; the builder methods override both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConnectionConfig {
    /// Host name, optionally with an `http://` or `https://` scheme.
    pub url: String,
    pub port: u16,
    pub user: Option<String>,
    pub pass: Option<String>,
    /// Path of the data root, `/db/data` on Neo4j 2.x.
    pub base_path: String,
    pub timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: "localhost".to_string(),
            port: 7474,
            user: None,
            pass: None,
            base_path: "/db/data".to_string(),
            timeout_secs: 30,
        }
    }
}

impl ConnectionConfig {
    pub fn new(url: impl Into<String>, port: u16) -> Self {
        Self {
            url: url.into(),
            port,
            ..Self::default()
        }
    }

    /// Defaults overridden by `NEO4J_URL`, `NEO4J_PORT`, `NEO4J_USER`,
    /// `NEO4J_PASS`, `NEO4J_BASE_PATH` and `NEO4J_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, NeoTxError> {
        let defaults_json = serde_json::to_string(&Self::default())?;
        let settings = config::Config::builder()
            .add_source(config::File::from_str(&defaults_json, config::FileFormat::Json).required(false))
            .add_source(config::Environment::with_prefix("NEO4J"))
            .build()
            .map_err(|e| NeoTxError::Config(format!("failed to load configuration: {e}")))?;
        let cfg: ConnectionConfig = settings
            .try_deserialize()
            .map_err(|e| NeoTxError::Config(format!("failed to deserialize configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// `scheme://host:port/base_path`, without a trailing slash.
    pub fn base_url(&self) -> String {
        let url = self.url.trim().trim_end_matches('/');
        let (scheme, host) = match url.split_once("://") {
            Some((scheme, host)) => (scheme, host),
            None => ("http", url),
        };
        let base_path = self.base_path.trim_end_matches('/');
        if base_path.is_empty() || base_path.starts_with('/') {
            format!("{scheme}://{host}:{}{base_path}", self.port)
        } else {
            format!("{scheme}://{host}:{}/{base_path}", self.port)
        }
    }

    pub fn validate(&self) -> Result<(), NeoTxError> {
        if self.url.trim().is_empty() {
            return Err(NeoTxError::Config("url must not be empty".into()));
        }
        if self.port == 0 {
            return Err(NeoTxError::Config("port must not be 0".into()));
        }
        if self.pass.is_some() && self.user.is_none() {
            return Err(NeoTxError::Config("a password was given without a user".into()));
        }
        Ok(())
    }
}
