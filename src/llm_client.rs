use crate::{AnthropicConfig, GeminiConfig, GenerateError, TextGenerator};

/// Dispatch over the two provider clients.
///
/// The clients stay fully independent; this enum only routes a prompt to
/// whichever provider the caller configured, so callers switching between
/// keys (for example on a Gemini rate limit) hold a single value.
#[derive(Debug, Clone)]
pub enum Provider {
    Anthropic(AnthropicConfig),
    Gemini(GeminiConfig),
}

impl Provider {
    pub async fn generate(&self, input: &str) -> Result<String, GenerateError> {
        match self {
            Provider::Anthropic(config) => config.generate(input).await,
            Provider::Gemini(config) => config.generate(input).await,
        }
    }
}
