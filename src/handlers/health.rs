use crate::utils::responses::ResponseBuilder;
use actix_web::{HttpResponse, Result};

/// Health check endpoint
///
/// # Errors
/// Never fails
pub async fn health() -> Result<HttpResponse> {
    Ok(ResponseBuilder::health())
}
