//! HTTP response handling
//!
//! The webhook routes answer with a small fixed set of JSON bodies. They are
//! serialized once and reused.

use actix_web::{http::header, HttpResponse};
use serde_json::json;

use crate::models::{ErrorBody, HealthResponse, MessageResponse};

/// Acknowledgement sent to Apify for a recorded delivery
pub const DATA_RECEIVED: &str = "Data received";
/// Liveness message of the Apify router
pub const APIFY_ROUTE_OK: &str = "✅ Apify route is working fine!";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const INVALID_SIGNATURE: &str = "Invalid signature";
pub const INVALID_PAYLOAD: &str = "Invalid JSON payload";
pub const RECORDING_FAILED: &str = "Failed to record webhook payload";

static CACHED_RESPONSES: std::sync::LazyLock<CachedResponses> =
    std::sync::LazyLock::new(CachedResponses::new);

/// Pre-serialized response bodies
struct CachedResponses {
    data_received: String,
    apify_route_ok: String,
    method_not_allowed: String,
    invalid_signature: String,
    invalid_payload: String,
    recording_failed: String,
}

impl CachedResponses {
    fn new() -> Self {
        Self {
            data_received: Self::message_json(DATA_RECEIVED),
            apify_route_ok: Self::message_json(APIFY_ROUTE_OK),
            method_not_allowed: Self::error_json(METHOD_NOT_ALLOWED),
            invalid_signature: Self::error_json(INVALID_SIGNATURE),
            invalid_payload: Self::error_json(INVALID_PAYLOAD),
            recording_failed: Self::error_json(RECORDING_FAILED),
        }
    }

    fn message_json(message: &str) -> String {
        json!(MessageResponse::new(message)).to_string()
    }

    fn error_json(error: &str) -> String {
        json!(ErrorBody {
            error: error.to_string()
        })
        .to_string()
    }
}

fn json_body(mut builder: actix_web::HttpResponseBuilder, body: &str) -> HttpResponse {
    builder
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .body(body.to_owned())
}

pub struct ResponseBuilder;

impl ResponseBuilder {
    /// `200 {"message":"Data received"}`
    #[must_use]
    pub fn data_received() -> HttpResponse {
        json_body(HttpResponse::Ok(), &CACHED_RESPONSES.data_received)
    }

    /// `200` liveness body of the Apify router
    #[must_use]
    pub fn apify_route_ok() -> HttpResponse {
        json_body(HttpResponse::Ok(), &CACHED_RESPONSES.apify_route_ok)
    }

    /// `405 {"error":"Method not allowed"}` with `Allow: POST`
    #[must_use]
    pub fn method_not_allowed() -> HttpResponse {
        let mut builder = HttpResponse::MethodNotAllowed();
        builder.insert_header((header::ALLOW, "POST"));
        json_body(builder, &CACHED_RESPONSES.method_not_allowed)
    }

    /// `401` for a missing or wrong webhook signature
    #[must_use]
    pub fn invalid_signature() -> HttpResponse {
        json_body(HttpResponse::Unauthorized(), &CACHED_RESPONSES.invalid_signature)
    }

    /// `400` for a body that is not JSON
    #[must_use]
    pub fn invalid_payload() -> HttpResponse {
        json_body(HttpResponse::BadRequest(), &CACHED_RESPONSES.invalid_payload)
    }

    /// `500` when the delivery was accepted but could not be recorded
    #[must_use]
    pub fn recording_failed() -> HttpResponse {
        json_body(
            HttpResponse::InternalServerError(),
            &CACHED_RESPONSES.recording_failed,
        )
    }

    #[must_use]
    pub fn health() -> HttpResponse {
        HttpResponse::Ok().json(HealthResponse {
            status: "ok".to_string(),
            message: "Job portal gateway is running".to_string(),
        })
    }
}
