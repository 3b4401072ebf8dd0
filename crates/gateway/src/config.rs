use std::time::Duration;

/// Default gateway base URL (chat-completions compatible).
pub const DEFAULT_GATEWAY_URL: &str = "https://ai.gateway.lovable.dev/v1";
/// Default upstream model identifier.
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-image-preview";
/// Default human-readable model name recorded in history.
pub const DEFAULT_MODEL_LABEL: &str = "Gemini 2.5 Flash Image";
/// Default upstream request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for the generation gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Base URL without trailing slash, e.g. `https://host/v1`.
    pub base_url: String,
    /// Bearer token sent with every request.
    pub api_key: String,
    /// Model identifier sent upstream.
    pub model: String,
    /// Display name returned to clients as `model_used`.
    pub model_label: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl GatewayConfig {
    /// Load gateway configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                                   |
    /// |------------------------|----------|-------------------------------------------|
    /// | `GATEWAY_API_KEY`      | **yes**  | --                                        |
    /// | `GATEWAY_URL`          | no       | `https://ai.gateway.lovable.dev/v1`       |
    /// | `GATEWAY_MODEL`        | no       | `google/gemini-2.5-flash-image-preview`   |
    /// | `GATEWAY_MODEL_LABEL`  | no       | `Gemini 2.5 Flash Image`                  |
    /// | `GATEWAY_TIMEOUT_SECS` | no       | `120`                                     |
    ///
    /// # Panics
    ///
    /// Panics if `GATEWAY_API_KEY` is missing or empty, or if
    /// `GATEWAY_TIMEOUT_SECS` is not a valid integer.
    pub fn from_env() -> Self {
        let api_key = std::env::var("GATEWAY_API_KEY")
            .expect("GATEWAY_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "GATEWAY_API_KEY must not be empty");

        let base_url = std::env::var("GATEWAY_URL")
            .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("GATEWAY_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let model_label =
            std::env::var("GATEWAY_MODEL_LABEL").unwrap_or_else(|_| DEFAULT_MODEL_LABEL.into());

        let timeout_secs: u64 = std::env::var("GATEWAY_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GATEWAY_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_key,
            model,
            model_label,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Build a config pointing at `base_url` with default model settings.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            model_label: DEFAULT_MODEL_LABEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = GatewayConfig::new("http://localhost:9000/v1/", "key");
        assert_eq!(config.base_url, "http://localhost:9000/v1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }
}
