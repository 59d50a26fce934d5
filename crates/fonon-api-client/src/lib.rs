//! HTTP client for the Fonon backend.
//!
//! Provides a minimal client with optional bearer auth, generic JSON helpers,
//! and the two collaborator implementations the admin engine needs: a file
//! store ([`HttpMediaStore`]) and per-resource CRUD ([`RestResourceService`]).

pub mod files;
pub mod resources;

use anyhow::{Context, Result};
use fonon_core::{AdminConfig, AppError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub use files::HttpMediaStore;
pub use resources::RestResourceService;

/// Non-success HTTP status carried inside `anyhow::Error`.
#[derive(Debug)]
pub struct ApiStatusError {
    pub status: u16,
    pub body: String,
}

impl std::fmt::Display for ApiStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "API request failed with status {}: {}", self.status, self.body)
    }
}

impl std::error::Error for ApiStatusError {}

/// Convert a client failure into the engine's error taxonomy.
pub fn into_app_error(err: anyhow::Error) -> AppError {
    if let Some(status) = err.downcast_ref::<ApiStatusError>() {
        let message = if status.body.trim().is_empty() {
            format!("HTTP {}", status.status)
        } else {
            status.body.clone()
        };
        if status.status == 404 {
            return AppError::NotFound(message);
        }
        return AppError::Api {
            status: status.status,
            message,
        };
    }
    if let Some(req) = err.downcast_ref::<reqwest::Error>() {
        if req.is_connect() || req.is_timeout() || req.is_request() {
            return AppError::Transport(format!("{:#}", err));
        }
    }
    AppError::from(err)
}

/// HTTP client for the Fonon API with optional bearer auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            config.api_token.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn apply_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = self
            .apply_auth(request)
            .send()
            .await
            .context("Failed to send request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ApiStatusError {
                status: status.as_u16(),
                body,
            }
            .into());
        }
        Ok(response)
    }

    /// Deserialize a JSON body; an empty body yields `T::default()`.
    async fn read_json<T: DeserializeOwned + Default>(response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .context("Failed to read response body")?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }
        serde_json::from_slice(&bytes).context("Failed to parse response as JSON")
    }

    /// GET request with optional query parameters. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let mut request = self.client.get(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST JSON body and deserialize response.
    pub async fn post_json<T: DeserializeOwned + Default, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// PUT JSON body and deserialize response.
    pub async fn put_json<T: DeserializeOwned + Default, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.client.put(self.build_url(path)).json(body);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned + Default>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let request = self.client.post(self.build_url(path)).multipart(form);
        let response = self.send(request).await?;
        Self::read_json(response).await
    }

    /// DELETE request with optional query parameters. Returns Ok(()) on success.
    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<()> {
        let mut request = self.client.delete(self.build_url(path));
        if !query.is_empty() {
            request = request.query(query);
        }
        self.send(request).await?;
        Ok(())
    }

    /// Raw client for custom requests. Caller must apply auth.
    pub fn client(&self) -> &Client {
        &self.client
    }
}
