use thiserror::Error;

/// Failure modes shared by both provider clients.
///
/// The rate-limit case is a distinct variant rather than a message pattern so
/// callers can branch on it with a tag check.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Non-2xx provider response, or a success body that violates the
    /// provider's documented shape.
    #[error("{0}")]
    Api(String),

    /// Gemini HTTP 429. Never produced by the Anthropic client.
    #[error("{0}")]
    RateLimited(String),

    /// Connection, TLS, or body-decoding failure below the HTTP status layer.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl GenerateError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GenerateError::RateLimited(_))
    }
}
