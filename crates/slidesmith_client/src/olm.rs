//! Ollama-compatible HTTP generation client.

use async_stream::try_stream;
use futures_util::StreamExt;
use serde::{Deserialize, Serialize};
use slidesmith_error::{ClientError, ClientErrorKind, SlidesmithResult};
use slidesmith_interface::{SlideClient, StreamingSlideClient, TextStream};
use tracing::{debug, info, instrument};

/// Default endpoint of a local Ollama server.
const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Environment variable naming the generation endpoint.
const ENDPOINT_ENV: &str = "OLM_API_ENDPOINT";

/// Generation client for an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OlmClient {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateBody<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Deserialize, Default)]
struct GenerateReply {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    #[serde(default)]
    error: Option<String>,
}

impl OlmClient {
    /// Create a client against the default localhost endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint.
    #[instrument(name = "olm_client_new")]
    pub fn with_base_url(base_url: impl Into<String> + std::fmt::Debug) -> Self {
        let base_url = base_url.into();
        info!(url = %base_url, "Creating generation client");
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a client from the `OLM_API_ENDPOINT` environment variable,
    /// falling back to the default localhost endpoint.
    pub fn from_env() -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::with_base_url(url),
            _ => Self::new(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url.trim_end_matches('/'))
    }

    /// Classify a backend-reported error string.
    fn api_error(message: String) -> ClientError {
        if message.contains("model") && message.contains("not found") {
            ClientError::new(ClientErrorKind::InvalidModel(message))
        } else {
            ClientError::new(ClientErrorKind::Api(message))
        }
    }
}

impl Default for OlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl SlideClient for OlmClient {
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len(), model))]
    async fn generate_batch(&self, prompt: &str, model: &str) -> SlidesmithResult<String> {
        let body = GenerateBody {
            model,
            prompt,
            stream: false,
        };

        let response = self
            .http
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::new(ClientErrorKind::Connection(e.to_string())))?;

        let status = response.status();
        let reply: GenerateReply = response
            .json()
            .await
            .map_err(|e| ClientError::new(ClientErrorKind::Api(e.to_string())))?;

        if let Some(error) = reply.error {
            return Err(Self::api_error(error))?;
        }
        if !status.is_success() {
            return Err(ClientError::new(ClientErrorKind::Api(format!(
                "unexpected status {}",
                status
            ))))?;
        }

        debug!(response_chars = reply.response.len(), "Received batch response");
        Ok(reply.response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }
}

#[async_trait::async_trait]
impl StreamingSlideClient for OlmClient {
    #[instrument(skip(self, prompt), fields(prompt_chars = prompt.len(), model))]
    async fn generate_stream(&self, prompt: &str, model: &str) -> SlidesmithResult<TextStream> {
        let body = GenerateBody {
            model,
            prompt,
            stream: true,
        };

        let response = self
            .http
            .post(self.generate_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| ClientError::new(ClientErrorKind::Connection(e.to_string())))?;

        let mut bytes = response.bytes_stream();

        // The endpoint replies with one JSON object per line; fragments
        // accumulate in `buffer` until a newline completes a line.
        let stream = try_stream! {
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = chunk
                    .map_err(|e| ClientError::new(ClientErrorKind::Stream(e.to_string())))?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                while let Some(newline) = buffer.find('\n') {
                    let line: String = buffer.drain(..=newline).collect();
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let reply: GenerateReply = serde_json::from_str(line)
                        .map_err(|e| ClientError::new(ClientErrorKind::Stream(e.to_string())))?;

                    if let Some(error) = reply.error {
                        Err(Self::api_error(error))?;
                    }
                    if !reply.response.is_empty() {
                        yield reply.response;
                    }
                    if reply.done {
                        return;
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}
