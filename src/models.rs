use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

/// `{"message": ...}` acknowledgement body
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// `{"error": ...}` body returned by the webhook routes
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

/// Outcome of reading the auth callback URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AuthCallbackResult {
    Authenticated { token: String },
    Unauthenticated,
}

impl AuthCallbackResult {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}

/// A single accepted webhook delivery as handed to a sink.
///
/// The payload is kept opaque; Apify decides its shape.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct WebhookDelivery {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub payload: Value,
}

impl WebhookDelivery {
    #[must_use]
    pub fn new(payload: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            payload,
        }
    }
}
