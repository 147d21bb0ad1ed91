use thiserror::Error;

/// Failures on the webhook ingestion path
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("missing signature header '{0}'")]
    MissingSignature(String),

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature does not match payload")]
    SignatureMismatch,

    #[error("invalid webhook secret")]
    InvalidSecret,

    #[error("invalid signature header name '{0}'")]
    InvalidHeaderName(String),

    #[error("invalid JSON payload: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("failed to write webhook payload: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to forward webhook payload: {0}")]
    Forward(#[from] reqwest::Error),

    #[error("forward target responded with status {0}")]
    ForwardStatus(u16),
}

impl WebhookError {
    /// Whether the error means the sender could not be authenticated
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingSignature(_) | Self::MalformedSignature(_) | Self::SignatureMismatch
        )
    }
}
