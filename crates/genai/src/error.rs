use advocate_core::error::CoreError;

/// Errors from the external service clients.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the payload was not what we expected.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// A base64 image payload could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Client construction or configuration failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}
