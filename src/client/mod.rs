//! HTTP client for the attendance REST backend.
//!
//! One method per (entity, verb) pair lives in the submodules; this module
//! owns URL building and response normalization shared by all of them.

mod alunos;
mod chamadas;
mod mentores;
mod presencas;
mod relatorios;
mod turmas;

#[cfg(test)]
mod fake_server;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{AppError, Result};

const JSON: &str = "application/json";

/// Backend REST API client.
///
/// Requests carry no timeout and are never retried: a failure surfaces
/// immediately to the caller.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a new client instance.
    ///
    /// # Arguments
    /// * `base_url` - The API root including its prefix (e.g., "http://localhost:8080/api")
    pub fn new(base_url: &str) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url =
            Url::parse(trimmed).map_err(|e| AppError::config(format!("Invalid API URL '{trimmed}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::config(format!("Invalid API URL '{trimmed}'")));
        }

        let client = Client::builder().build()?;

        Ok(Self { client, base_url })
    }

    /// Base URL the client talks to.
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::config("API URL cannot be a base"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn get(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.get(self.endpoint(segments)?))
    }

    fn post<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<RequestBuilder> {
        Ok(self.client.post(self.endpoint(segments)?).body(serde_json::to_vec(body)?))
    }

    fn put<B: Serialize + ?Sized>(&self, segments: &[&str], body: &B) -> Result<RequestBuilder> {
        Ok(self.client.put(self.endpoint(segments)?).body(serde_json::to_vec(body)?))
    }

    fn put_empty(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.put(self.endpoint(segments)?))
    }

    fn delete(&self, segments: &[&str]) -> Result<RequestBuilder> {
        Ok(self.client.delete(self.endpoint(segments)?))
    }

    /// Send a request and normalize the response.
    async fn execute(&self, request: RequestBuilder) -> Result<Option<Value>> {
        let response = request
            .header(CONTENT_TYPE, HeaderValue::from_static(JSON))
            .send()
            .await
            .inspect_err(|e| tracing::warn!("API request failed: {e}"))?;

        let status = response.status();
        let url = response.url().clone();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = response.text().await?;

        tracing::debug!("{status} {url}");
        decode_response(status, content_type.as_deref(), &body)
            .inspect_err(|e| tracing::warn!("API error from {url}: {e}"))
    }

    async fn fetch_list<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Vec<T>> {
        match self.execute(request).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn fetch_one<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<Option<T>> {
        match self.execute(request).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn fetch_unit(&self, request: RequestBuilder) -> Result<()> {
        self.execute(request).await.map(|_| ())
    }

    /// Fetch a binary payload (report files).
    async fn fetch_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::api(status, body));
        }
        Ok(response.bytes().await?.to_vec())
    }

    /// Test connection to the backend by listing classes.
    pub async fn test_connection(&self) -> Result<()> {
        self.fetch_unit(self.get(&["turmas"])?).await
    }
}

/// Normalize a backend response.
///
/// Non-2xx statuses become [`AppError::Api`] carrying the body text.
/// A 2xx response without a JSON content type, with an empty body, or with a
/// literal `null` resolves to `None` instead of failing.
pub fn decode_response(status: StatusCode, content_type: Option<&str>, body: &str) -> Result<Option<Value>> {
    if !status.is_success() {
        return Err(AppError::api(status, body));
    }

    let is_json = content_type.is_some_and(|ct| ct.contains(JSON));
    if !is_json || body.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(body)? {
        Value::Null => Ok(None),
        value => Ok(Some(value)),
    }
}
