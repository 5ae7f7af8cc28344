//! HTTP resource client for the firewall management API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::{ensure_mutable, Collection, ResourceClient};
use crate::error::AppError;

/// Error body the management API attaches to rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// `reqwest`-backed client. No request timeout is set.
pub struct HttpResourceClient {
    client: Client,
    base: Url,
}

impl HttpResourceClient {
    /// Create a client for the API rooted at `api_base` (scheme, host and optional prefix).
    pub fn new(api_base: &str) -> Result<Self> {
        let base = Url::parse(api_base)
            .with_context(|| format!("Invalid management API base URL: {api_base}"))?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Management API base URL cannot carry a path: {api_base}");
        }
        let client = Client::builder()
            .user_agent(format!("waf-console/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self { client, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Build the URL of a collection, or of one keyed member of it.
    ///
    /// The key is pushed as a single percent-encoded path segment.
    pub fn endpoint(&self, collection: Collection, key: Option<&str>) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty();
            segments.extend(collection.path().trim_start_matches('/').split('/'));
            if let Some(key) = key {
                segments.push(key);
            }
        }
        url
    }
}

#[async_trait]
impl ResourceClient for HttpResourceClient {
    async fn list(&self, collection: Collection) -> Result<Value, AppError> {
        let url = self.endpoint(collection, None);
        debug!("GET {url}");
        let response = self.client.get(url).send().await?;
        read_body(response, Body::Json).await
    }

    async fn create(&self, collection: Collection, payload: Value) -> Result<Value, AppError> {
        ensure_mutable(collection)?;
        let url = self.endpoint(collection, None);
        debug!("POST {url}");
        let response = self.client.post(url).json(&payload).send().await?;
        read_body(response, Body::Ack).await
    }

    async fn delete(&self, collection: Collection, key: &str) -> Result<Value, AppError> {
        ensure_mutable(collection)?;
        let url = self.endpoint(collection, Some(key));
        debug!("DELETE {url}");
        let response = self.client.delete(url).send().await?;
        read_body(response, Body::Ack).await
    }
}

/// How a 2xx body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    /// Collection content: anything but JSON is a decode failure.
    Json,
    /// Mutation confirmation: the status alone decides success, and a
    /// non-JSON body is kept as text.
    Ack,
}

/// Decode a response into JSON on success, or into a tagged server rejection.
async fn read_body(response: Response, expect: Body) -> Result<Value, AppError> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if status.is_success() {
        return decode_success(&bytes, expect);
    }

    let message = serde_json::from_slice::<ErrorBody>(&bytes)
        .ok()
        .map(|body| body.error);
    Err(AppError::Server {
        status: status.as_u16(),
        message,
    })
}

fn decode_success(bytes: &[u8], expect: Body) -> Result<Value, AppError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    match serde_json::from_slice(bytes) {
        Ok(value) => Ok(value),
        Err(_) if expect == Body::Ack => Ok(Value::String(
            String::from_utf8_lossy(bytes).trim().to_string(),
        )),
        Err(e) => Err(AppError::Decode(format!("Malformed response body: {e}"))),
    }
}
