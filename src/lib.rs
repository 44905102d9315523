//! Stateless text-generation clients for the Anthropic and Gemini HTTP APIs.
//!
//! Each client is a single async call: build one JSON request, send one POST,
//! branch on the status code, and map the body to a `String` or a
//! [`GenerateError`]. Retry, fallback, and timeout policy belong to the
//! caller.

// Module declarations
#[cfg(feature = "anthropic")]
mod anthropic_client;
mod error;
#[cfg(feature = "gemini")]
mod gemini_client;
#[cfg(all(feature = "anthropic", feature = "gemini"))]
mod llm_client;
mod traits;

#[cfg(feature = "anthropic")]
pub use anthropic_client::{
    generate_text as generate_anthropic_text, AnthropicConfig, DEFAULT_ANTHROPIC_MODEL,
};

pub use error::GenerateError;

#[cfg(feature = "gemini")]
pub use gemini_client::{
    generate_text as generate_gemini_text, GeminiConfig, DEFAULT_GEMINI_MODEL,
};

#[cfg(all(feature = "anthropic", feature = "gemini"))]
pub use llm_client::Provider;

pub use traits::TextGenerator;
