//! HTTP plumbing shared by all Neon API operations.

use crate::{BASE_URL, NeonError, Result};
use reqwest::{
    Client, Method, StatusCode,
    header::{self, HeaderMap},
};
use serde_json::{Value, json};

/// The Neon console API client.
///
/// Holds a [`reqwest::Client`] and the bearer headers, built once at
/// construction. Cheap to clone.
#[derive(Debug, Clone)]
pub struct NeonClient {
    client: Client,
    headers: HeaderMap,
    base_url: String,
}

impl NeonClient {
    /// Create a client with the given API key.
    pub fn new(client: Client, key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
        headers.insert(header::ACCEPT, "application/json".parse()?);
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
        Ok(Self {
            client,
            headers,
            base_url: BASE_URL.into(),
        })
    }

    /// Create a client from the `NEON_API_KEY` environment variable.
    ///
    /// A missing key is not rejected here; requests will simply fail
    /// authentication.
    pub fn from_env(client: Client) -> Result<Self> {
        let key = std::env::var("NEON_API_KEY").unwrap_or_default();
        Self::new(client, &key)
    }

    /// Override the base URL (tests, self-hosted consoles).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The request headers (bearer auth included).
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Perform one request and return `(status, body text)`.
    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<(StatusCode, String)> {
        let url = format!("{}{path}", self.base_url);
        let mut req = self
            .client
            .request(method.clone(), &url)
            .headers(self.headers.clone());
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            tracing::debug!(%url, body = %body, "neon request");
            req = req.json(body);
        } else {
            tracing::debug!(%url, %method, "neon request");
        }

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;
        tracing::debug!(%status, "neon response");
        Ok((status, text))
    }

    /// Fold a non-2xx status into a model-readable `{"error": ...}`
    /// value; parse the body as JSON otherwise.
    pub(crate) fn lenient(status: StatusCode, body: &str) -> Result<Value> {
        if status.is_success() {
            Ok(serde_json::from_str(body)?)
        } else {
            tracing::error!(%status, "neon api error");
            Ok(json!({ "error": format!("HTTPError: {status}: {body}") }))
        }
    }

    /// Propagate a non-2xx status as [`NeonError::Api`]; parse the body
    /// as JSON otherwise.
    pub(crate) fn strict(status: StatusCode, body: &str) -> Result<Value> {
        if status.is_success() {
            Ok(serde_json::from_str(body)?)
        } else {
            tracing::error!(%status, "neon api error");
            Err(NeonError::Api {
                status: status.as_u16(),
                body: body.to_string(),
            })
        }
    }
}
