// Apify webhook routes
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::utils::logging::LoggingHelper;
use crate::utils::responses::ResponseBuilder;
use crate::webhook::{WebhookIngestor, WebhookOutcome};

/// Webhook receiver for `POST`
///
/// # Errors
/// Never fails; every outcome maps to exactly one response
pub async fn apify_webhook(
    req: HttpRequest,
    body: web::Bytes,
    ingestor: web::Data<WebhookIngestor>,
) -> Result<HttpResponse> {
    let outcome = ingestor.ingest(req.method(), req.headers(), &body).await;
    Ok(outcome.into_response())
}

/// Every other method on the webhook path. The body is never read, so the size
/// limit cannot turn this into a 413.
///
/// # Errors
/// Never fails
pub async fn apify_method_not_allowed(req: HttpRequest) -> Result<HttpResponse> {
    LoggingHelper::log_webhook_rejected(&format!("method {} not allowed", req.method()));
    Ok(WebhookOutcome::MethodNotAllowed.into_response())
}

/// Liveness probe of the Apify router
///
/// # Errors
/// Never fails
pub async fn apify_test() -> Result<HttpResponse> {
    Ok(ResponseBuilder::apify_route_ok())
}
