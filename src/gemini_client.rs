use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerateError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2000;
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const RATE_LIMIT_MESSAGE: &str =
    "Gemini free-tier quota exhausted for today; switch to an Anthropic API key to continue.";

/// Per-call configuration for the Gemini generateContent client.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: Option<String>,
    pub max_output_tokens: Option<u32>,
    pub system: Option<String>,
    pub base_url: Option<String>,
}

impl GeminiConfig {
    pub fn new(api_key: &str) -> Self {
        Self {
            api_key: api_key.to_owned(),
            model: None,
            max_output_tokens: None,
            system: None,
            base_url: None,
        }
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = Some(model.to_owned());
        self
    }

    pub fn max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn system(mut self, system: &str) -> Self {
        self.system = Some(system.to_owned());
        self
    }

    /// Override the model collection base URL. Used by tests and proxies.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_owned());
        self
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

// Every link of candidates[0].content.parts[0].text is optional on the wire;
// any absent link maps to an empty string, not an error.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

fn build_request(prompt: &str, max_output_tokens: u32, system: Option<&str>) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![RequestContent {
            parts: vec![RequestPart {
                text: prompt.to_owned(),
            }],
        }],
        generation_config: GenerationConfig { max_output_tokens },
        system_instruction: system.map(|system| RequestContent {
            parts: vec![RequestPart {
                text: system.to_owned(),
            }],
        }),
    }
}

fn extract_text(response: GenerateContentResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .unwrap_or_default()
}

/// Send `prompt` to Gemini and return the first candidate's first part text.
///
/// Makes exactly one POST to `{base}/{model}:generateContent`. The API key
/// rides in the `key` query parameter, not a header. HTTP 429 surfaces as
/// [`GenerateError::RateLimited`]; any other non-2xx status becomes an
/// [`GenerateError::Api`] embedding the status code and the raw body text.
/// A 2xx body with missing nested fields yields `Ok("")`.
pub async fn generate_text(prompt: &str, config: &GeminiConfig) -> Result<String, GenerateError> {
    let model = config.model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL);
    let max_output_tokens = config.max_output_tokens.unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS);
    let base_url = config.base_url.as_deref().unwrap_or(GEMINI_API_BASE);

    // Plain concatenation; callers are expected to supply URL-safe keys.
    let url = format!("{base_url}/{model}:generateContent?key={}", config.api_key);

    let request = build_request(prompt, max_output_tokens, config.system.as_deref());

    debug!(model, "sending Gemini generateContent request");

    let response = ReqwestClient::new()
        .post(&url)
        .header("content-type", "application/json")
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(GenerateError::RateLimited(RATE_LIMIT_MESSAGE.to_owned()));
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(GenerateError::Api(format!(
            "Gemini API error {}: {}",
            status.as_u16(),
            body
        )));
    }

    let parsed: GenerateContentResponse = response.json().await?;
    Ok(extract_text(parsed))
}
