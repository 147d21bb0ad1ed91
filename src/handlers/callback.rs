// Auth callback handler: token from the redirect URL into the session cookie
use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::auth::{extract_from_query, SessionCookieWriter};
use crate::i18n::Localization;
use crate::models::AuthCallbackResult;
use crate::utils::logging::LoggingHelper;

/// Identity provider redirect target
///
/// Responds with one `302`: `Set-Cookie: token=...` plus the landing route when the
/// URL carries a token, or just the login route when it does not.
///
/// # Errors
/// Never fails; every callback URL maps to a redirect
pub async fn auth_callback(
    req: HttpRequest,
    cookie_writer: web::Data<SessionCookieWriter>,
    localization: web::Data<Localization>,
) -> Result<HttpResponse> {
    let result = extract_from_query(req.query_string());
    let token_len = match &result {
        AuthCallbackResult::Authenticated { token } => Some(token.len()),
        AuthCallbackResult::Unauthenticated => None,
    };

    let language = localization.resolve_language(&req);
    let transition = cookie_writer
        .transition_with(result, |route| localization.localize_path(&language, route));

    LoggingHelper::log_callback_transition(token_len, &language, &transition.location);
    Ok(transition.into_response())
}
