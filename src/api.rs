//! REST client for the complexes API.
//!
//! Every request carries the JSON content type and the `X-User-ID` header the
//! backend uses to scope records until real authentication exists.

use crate::complex::{Complex, ComplexInput};
use crate::config::{DEFAULT_API_URL, DEFAULT_USER_ID};
use crate::error::{Error, Result};
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

const API_PREFIX: &str = "/api/v1";
const USER_HEADER: &str = "X-User-ID";

/// API client bound to one base URL and user.
#[derive(Clone, Debug)]
pub struct Client {
    http: HttpClient,
    base_url: String,
    user_id: String,
}

impl Client {
    /// Creates a client for `base_url` (scheme and host, no trailing path).
    pub fn new(base_url: impl Into<String>, user_id: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        tracing::info!(%base_url, "creating API client");
        Ok(Self {
            http,
            base_url,
            user_id: user_id.into(),
        })
    }

    /// Client for the default local API, without a request timeout.
    pub fn local() -> Self {
        Self {
            http: HttpClient::new(),
            base_url: DEFAULT_API_URL.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }

    /// Versioned URL for `path`.
    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}/{}", self.base_url, API_PREFIX, path.trim_start_matches('/'))
    }

    /// Lists all complexes of the user.
    pub async fn fetch_complexes(&self) -> Result<Vec<Complex>> {
        let request = self.http.get(self.build_url("complexes"));
        self.execute_json(request).await
    }

    /// Fetches one complex with its goals.
    pub async fn fetch_complex(&self, id: i64) -> Result<Complex> {
        let request = self.http.get(self.build_url(&format!("complexes/{id}")));
        self.execute_json(request).await
    }

    /// Creates a complex and returns the stored record.
    pub async fn create_complex(&self, input: &ComplexInput) -> Result<Complex> {
        let request = self.http.post(self.build_url("complexes")).json(input);
        self.execute_json(request).await
    }

    /// Deletes a complex.
    pub async fn delete_complex(&self, id: i64) -> Result<()> {
        let request = self.http.delete(self.build_url(&format!("complexes/{id}")));
        self.execute(request).await.map(|_| ())
    }

    fn with_headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(USER_HEADER, &self.user_id)
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = self.with_headers(request).send().await?;
        let status = response.status();
        tracing::debug!(url = %response.url(), %status, "API response");

        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        tracing::warn!(%status, %body, "API request failed");
        Err(Error::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn execute_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let bytes = self.execute(request).await?.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url_joins_prefix() {
        let client = Client::new("http://localhost:8080/", "u").unwrap();
        assert_eq!(
            client.build_url("complexes"),
            "http://localhost:8080/api/v1/complexes"
        );
        assert_eq!(
            client.build_url("/complexes/4"),
            "http://localhost:8080/api/v1/complexes/4"
        );
    }

    #[test]
    fn test_local_client_targets_defaults() {
        let client = Client::local();
        assert_eq!(client.build_url("complexes"), "http://localhost:8080/api/v1/complexes");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_http_error() {
        // Port 9 (discard) is closed on test machines.
        let client = Client::new("http://127.0.0.1:9", "u").unwrap();
        let err = client.fetch_complexes().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
    }
}
