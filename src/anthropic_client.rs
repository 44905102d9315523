use std::collections::HashMap;

use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::GenerateError;

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_MAX_TOKENS: u32 = 4096;
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Per-call configuration for the Anthropic messages client.
///
/// `model` and `max_tokens` fall back to defaults when unset; `system` is
/// only serialized when present and non-empty.
#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: String,
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub system: Option<String>,
    pub dangerously_allow_browser: bool,
    pub base_url: Option<String>,
}

impl AnthropicConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            model: None,
            max_tokens: None,
            system: None,
            dangerously_allow_browser: false,
            base_url: None,
        }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_owned());
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn system(mut self, system: &str) -> Self {
        self.system = Some(system.to_owned());
        self
    }

    /// Opt in to calling the API directly from a browser context. Adds the
    /// `anthropic-dangerous-direct-browser-access` header; the remote CORS
    /// policy does the actual enforcement.
    pub fn dangerously_allow_browser(mut self, allow: bool) -> Self {
        self.dangerously_allow_browser = allow;
        self
    }

    /// Override the API origin. Used by tests and proxies; the request path
    /// is always `/v1/messages`.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_owned());
        self
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetails,
}

#[derive(Debug, Deserialize)]
struct ErrorDetails {
    message: String,
}

fn build_body(
    user_message: &str,
    model: &str,
    max_tokens: u32,
    system: Option<&str>,
) -> HashMap<&'static str, Value> {
    let mut body: HashMap<&str, Value> = HashMap::new();
    body.insert("model", json!(model));
    body.insert("max_tokens", json!(max_tokens));
    body.insert("messages", json!([{"role": "user", "content": user_message}]));

    // An unset system prompt must leave the key out entirely so the API
    // applies its own default, not see a null or empty string.
    if let Some(system) = system {
        if !system.is_empty() {
            body.insert("system", json!(system));
        }
    }

    body
}

/// Send `user_message` as a single user turn and return the first content
/// block's text.
///
/// Makes exactly one POST to `/v1/messages`. Non-2xx responses surface as
/// [`GenerateError::Api`], carrying the remote `error.message` when the body
/// parses as the Anthropic error envelope and a synthesized status message
/// otherwise. A success body with no content blocks is also an `Api` error;
/// this client does not degrade to an empty string.
pub async fn generate_text(
    user_message: &str,
    config: &AnthropicConfig,
) -> Result<String, GenerateError> {
    let model = config.model.as_deref().unwrap_or(DEFAULT_ANTHROPIC_MODEL);
    let max_tokens = config.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS);
    let base_url = config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);

    let body = build_body(user_message, model, max_tokens, config.system.as_deref());

    let mut request = ReqwestClient::new()
        .post(format!("{base_url}{MESSAGES_PATH}"))
        .header("content-type", "application/json")
        .header("x-api-key", &config.api_key)
        .header("anthropic-version", ANTHROPIC_VERSION);

    if config.dangerously_allow_browser {
        request = request.header("anthropic-dangerous-direct-browser-access", "true");
    }

    debug!(model, "sending Anthropic messages request");

    let response = request.json(&body).send().await?;

    let status = response.status();
    if !status.is_success() {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&text)
            .map(|envelope| envelope.error.message)
            .unwrap_or_else(|_| format!("Anthropic API error {}", status.as_u16()));
        return Err(GenerateError::Api(message));
    }

    let parsed: MessagesResponse = response.json().await?;
    parsed
        .content
        .into_iter()
        .next()
        .map(|block| block.text)
        .ok_or_else(|| GenerateError::Api("Anthropic response contained no content blocks".to_owned()))
}
