//! HTTP client for the generation gateway.
//!
//! Each call to [`GatewayClient::generate`] issues exactly one request. There
//! is no retry, backoff or circuit breaking: rate limiting and quota
//! exhaustion are reported to the caller as distinct error variants and the
//! user decides whether to resubmit.

use std::time::Instant;

use lumen_core::generation::MediaType;
use reqwest::StatusCode;

use crate::config::GatewayConfig;
use crate::messages::{ChatCompletionRequest, ChatCompletionResponse};

/// Errors from the generation gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Upstream returned 429. The user should retry later.
    #[error("Rate limit exceeded. Please try again later.")]
    RateLimited,

    /// Upstream returned 402. Terminal until the workspace is topped up.
    #[error("Payment required. Please add credits to your workspace.")]
    PaymentRequired,

    /// Upstream returned another non-2xx status.
    #[error("AI gateway error ({status}): {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response decoded but carried no asset reference.
    #[error("No image generated")]
    NoAsset,

    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON of the expected shape.
    #[error("Malformed gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// What to generate.
#[derive(Debug, Clone)]
pub struct GenerationInput {
    pub prompt: String,
    /// Source image as a `data:image/...;base64,` URI.
    pub image_data_uri: Option<String>,
    pub media_type: MediaType,
}

/// A successfully generated asset.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAsset {
    /// URL (or data URI) of the generated image or video.
    pub url: String,
    /// Wall-clock time spent waiting on the gateway.
    pub generation_time_ms: i64,
    /// Display name of the model that produced the asset.
    pub model_used: String,
}

/// Client for a single gateway endpoint.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GatewayClient {
    /// Create a client with the configured request timeout.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Send one generation request and extract the first returned asset.
    pub async fn generate(&self, input: &GenerationInput) -> Result<GeneratedAsset, GatewayError> {
        let body = ChatCompletionRequest::single_turn(
            &self.config.model,
            &input.prompt,
            input.image_data_uri.as_deref(),
            input.media_type,
        );

        let started = Instant::now();

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        let parsed: ChatCompletionResponse = serde_json::from_slice(&bytes)?;

        let url = parsed
            .first_asset_url(input.media_type)
            .ok_or(GatewayError::NoAsset)?
            .to_string();

        let generation_time_ms = i64::try_from(started.elapsed().as_millis()).unwrap_or(i64::MAX);

        tracing::debug!(
            media_type = %input.media_type,
            generation_time_ms,
            "Gateway returned asset"
        );

        Ok(GeneratedAsset {
            url,
            generation_time_ms,
            model_used: self.config.model_label.clone(),
        })
    }

    // ---- private helpers ----

    /// Map non-2xx statuses to typed errors. Unexpected statuses are logged
    /// with their body.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("AI gateway rate limited the request");
                Err(GatewayError::RateLimited)
            }
            StatusCode::PAYMENT_REQUIRED => {
                tracing::warn!("AI gateway reported exhausted quota");
                Err(GatewayError::PaymentRequired)
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<unreadable body>".to_string());
                tracing::error!(status = status.as_u16(), body = %body, "AI gateway error");
                Err(GatewayError::Upstream {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
