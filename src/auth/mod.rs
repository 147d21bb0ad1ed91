//! Auth callback boundary
//!
//! The identity provider redirects the browser back with the bearer token in the
//! `token` query parameter. [`extractor`] turns that URL into an
//! [`AuthCallbackResult`](crate::models::AuthCallbackResult) and [`cookie`] turns
//! the result into the single response-level transition: store the cookie and land,
//! or go back to login.

pub mod cookie;
pub mod extractor;

pub use cookie::{CallbackTransition, SessionCookieWriter, TOKEN_COOKIE_NAME};
pub use extractor::{extract_from_query, extract_from_url, is_cookie_value, TOKEN_PARAM};
