use async_trait::async_trait;

use crate::error::GenerateError;

/// Common seam over the provider clients: one prompt in, one generated text
/// out. Implemented directly on the config types since each call is
/// stateless.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, input: &str) -> Result<String, GenerateError>;
}

#[cfg(feature = "anthropic")]
#[async_trait]
impl TextGenerator for crate::AnthropicConfig {
    async fn generate(&self, input: &str) -> Result<String, GenerateError> {
        crate::anthropic_client::generate_text(input, self).await
    }
}

#[cfg(feature = "gemini")]
#[async_trait]
impl TextGenerator for crate::GeminiConfig {
    async fn generate(&self, input: &str) -> Result<String, GenerateError> {
        crate::gemini_client::generate_text(input, self).await
    }
}
