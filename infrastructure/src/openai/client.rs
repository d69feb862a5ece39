//! Shared HTTP client for OpenAI-compatible endpoints

use super::error::OpenAiError;
use super::wire::error_message;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Authenticated client for one OpenAI-compatible API
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, OpenAiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| OpenAiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Create a client reading the API key from `api_key_env`
    pub fn from_env(
        base_url: impl Into<String>,
        api_key_env: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, OpenAiError> {
        let api_key = std::env::var(api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| OpenAiError::MissingApiKey(api_key_env.to_string()))?;
        Self::new(base_url, api_key, timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL for an API path such as `chat/completions`
    pub fn endpoint(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.base_url.ends_with("/v1") {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/v1/{}", self.base_url, path)
        }
    }

    /// POST a JSON body and decode the JSON response
    pub async fn post<Req, Resp>(&self, path: &str, body: &Req) -> Result<Resp, OpenAiError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(OpenAiError::Status {
                status: status.as_u16(),
                message: error_message(&text),
            });
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| OpenAiError::Decode(e.to_string()))
    }
}
