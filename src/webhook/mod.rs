//! Apify webhook ingestion
//!
//! Every request runs through [`WebhookIngestor::ingest`] exactly once and ends in a
//! single [`WebhookOutcome`], which maps to exactly one HTTP response.

pub mod error;
pub mod signature;
pub mod sink;

use std::sync::Arc;

use actix_web::http::{header::HeaderMap, Method};
use actix_web::HttpResponse;
use log::{error, warn};
use serde_json::Value;
use uuid::Uuid;

use crate::models::WebhookDelivery;
use crate::settings::PortalSettings;
use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;

pub use error::WebhookError;
pub use signature::SignatureVerifier;
pub use sink::{create_sink, FileSink, ForwardSink, LogSink, WebhookSink};

/// Terminal state of one webhook request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Recorded by the sink and acknowledged
    Accepted { id: Uuid },
    MethodNotAllowed,
    Unauthorized,
    MalformedPayload,
    /// Accepted from the sender but the sink failed
    RecordingFailed { id: Uuid },
}

impl WebhookOutcome {
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        match self {
            Self::Accepted { .. } => ResponseBuilder::data_received(),
            Self::MethodNotAllowed => ResponseBuilder::method_not_allowed(),
            Self::Unauthorized => ResponseBuilder::invalid_signature(),
            Self::MalformedPayload => ResponseBuilder::invalid_payload(),
            Self::RecordingFailed { .. } => ResponseBuilder::recording_failed(),
        }
    }
}

/// Method check, signature check, body parsing and recording for the webhook route
#[derive(Clone)]
pub struct WebhookIngestor {
    verifier: Option<SignatureVerifier>,
    sink: Arc<dyn WebhookSink>,
}

impl WebhookIngestor {
    #[must_use]
    pub fn new(verifier: Option<SignatureVerifier>, sink: Arc<dyn WebhookSink>) -> Self {
        Self { verifier, sink }
    }

    /// Build from settings with the given sink. Verification is on when a secret is set.
    ///
    /// # Errors
    ///
    /// Returns an error if verification is on and the signature header name is invalid
    pub fn from_settings(
        settings: &PortalSettings,
        sink: Arc<dyn WebhookSink>,
    ) -> Result<Self, WebhookError> {
        let verifier = settings
            .webhook_signature_required()
            .then(|| {
                SignatureVerifier::new(&settings.webhook.secret, &settings.webhook.signature_header)
            })
            .transpose()?;
        Ok(Self::new(verifier, sink))
    }

    #[must_use]
    pub fn verifies_signatures(&self) -> bool {
        self.verifier.is_some()
    }

    #[must_use]
    pub fn sink_name(&self) -> &'static str {
        self.sink.sink_name()
    }

    /// Run one request to its terminal outcome
    pub async fn ingest(&self, method: &Method, headers: &HeaderMap, body: &[u8]) -> WebhookOutcome {
        if *method != Method::POST {
            LoggingHelper::log_webhook_rejected(&format!("method {method} not allowed"));
            return WebhookOutcome::MethodNotAllowed;
        }

        if let Some(verifier) = &self.verifier {
            let provided = headers
                .get(verifier.header_name())
                .and_then(|value| value.to_str().ok());
            if let Err(e) = verifier.verify(provided, body) {
                LoggingHelper::log_webhook_rejected(&e.to_string());
                return WebhookOutcome::Unauthorized;
            }
        }

        let payload = match parse_payload(body) {
            Ok(payload) => payload,
            Err(e) => {
                warn!("Rejecting Apify webhook: {e}");
                return WebhookOutcome::MalformedPayload;
            }
        };

        let delivery = WebhookDelivery::new(payload);
        LoggingHelper::log_webhook_received(&delivery.id, body.len());

        match self.sink.record(&delivery).await {
            Ok(()) => {
                LoggingHelper::log_webhook_recorded(&delivery.id, self.sink.sink_name());
                WebhookOutcome::Accepted { id: delivery.id }
            }
            Err(e) => {
                error!(
                    "Failed to record Apify webhook {} with {} sink: {e}",
                    delivery.id,
                    self.sink.sink_name()
                );
                WebhookOutcome::RecordingFailed { id: delivery.id }
            }
        }
    }
}

/// Parse the body as opaque JSON. A blank body is `null`.
///
/// # Errors
///
/// Returns an error if the body is not JSON
pub fn parse_payload(body: &[u8]) -> Result<Value, WebhookError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(body)?)
}
