// Credential extraction from the auth callback URL
use crate::models::AuthCallbackResult;
use url::{form_urlencoded, Url};

/// Query parameter carrying the bearer token
pub const TOKEN_PARAM: &str = "token";

/// Read the token from a full callback URL
#[must_use]
pub fn extract_from_url(url: &Url) -> AuthCallbackResult {
    from_pairs(url.query_pairs())
}

/// Read the token from a raw query string (without the leading `?`)
///
/// Percent-encoding is decoded; the first `token` occurrence wins and an empty
/// value counts as absent. A value that cannot travel in a cookie as-is counts as
/// absent too.
#[must_use]
pub fn extract_from_query(query: &str) -> AuthCallbackResult {
    from_pairs(form_urlencoded::parse(query.as_bytes()))
}

fn from_pairs<'a>(
    mut pairs: impl Iterator<Item = (std::borrow::Cow<'a, str>, std::borrow::Cow<'a, str>)>,
) -> AuthCallbackResult {
    match pairs.find(|(key, _)| key == TOKEN_PARAM) {
        Some((_, token)) if is_cookie_value(&token) => AuthCallbackResult::Authenticated {
            token: token.into_owned(),
        },
        _ => AuthCallbackResult::Unauthenticated,
    }
}

/// Non-empty and made only of RFC 6265 `cookie-octet`s
///
/// Anything else (`;`, whitespace, `"`, `,`, `\`, controls, non-ASCII) would either
/// add attributes to the `Set-Cookie` line or make it an invalid header.
#[must_use]
pub fn is_cookie_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E))
}
