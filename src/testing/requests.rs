//! Request builders for the callback and webhook routes

use actix_web::http::header;
use actix_web::test::TestRequest;

use crate::webhook::SignatureVerifier;

use super::constants::TEST_WEBHOOK_SECRET;

/// Callback request as the identity provider redirect produces it
#[must_use]
pub fn callback_request(token: Option<&str>) -> TestRequest {
    let uri = match token {
        Some(token) => format!("/auth/callback?token={token}"),
        None => "/auth/callback".to_string(),
    };
    TestRequest::get().uri(&uri)
}

/// Unsigned JSON POST to the webhook route
#[must_use]
pub fn webhook_post(body: &str) -> TestRequest {
    TestRequest::post()
        .uri("/api/apify/webhook")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(body.to_owned())
}

/// JSON POST signed with [`TEST_WEBHOOK_SECRET`]
///
/// # Panics
///
/// Panics if the verifier cannot be built or signing fails
#[must_use]
pub fn signed_webhook_post(body: &str) -> TestRequest {
    let verifier = SignatureVerifier::new(TEST_WEBHOOK_SECRET, "X-Apify-Signature").unwrap();
    let signature = verifier.sign(body.as_bytes()).unwrap();
    webhook_post(body).insert_header(("X-Apify-Signature", signature))
}
