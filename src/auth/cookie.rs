use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header;
use actix_web::HttpResponse;

use super::extractor::is_cookie_value;
use crate::models::AuthCallbackResult;
use crate::settings::PortalSettings;

/// Name of the session cookie carrying the bearer token
pub const TOKEN_COOKIE_NAME: &str = "token";

/// The single state transition produced for one callback request.
///
/// The cookie (if any) and the redirect travel in the same response, so the browser
/// has stored the credential before it requests the destination route.
#[derive(Debug, Clone)]
pub struct CallbackTransition {
    pub cookie: Option<Cookie<'static>>,
    pub location: String,
}

impl CallbackTransition {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.cookie.is_some()
    }

    /// Render the transition as a `302 Found`.
    ///
    /// The callback URL carries the token, so the response keeps it out of caches and
    /// out of the `Referer` of the next navigation.
    #[must_use]
    pub fn into_response(self) -> HttpResponse {
        let mut builder = HttpResponse::Found();
        if let Some(cookie) = self.cookie {
            builder.cookie(cookie);
        }
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .insert_header((header::REFERRER_POLICY, "no-referrer"))
            .insert_header((header::LOCATION, self.location))
            .finish()
    }
}

/// Writes the `token` session cookie and decides where the browser goes next
#[derive(Clone, Debug)]
pub struct SessionCookieWriter {
    cookie_secure: bool,
    cookie_http_only: bool,
    landing_route: String,
    login_route: String,
}

impl SessionCookieWriter {
    #[must_use]
    pub fn new(
        cookie_secure: bool,
        cookie_http_only: bool,
        landing_route: &str,
        login_route: &str,
    ) -> Self {
        Self {
            cookie_secure,
            cookie_http_only,
            landing_route: landing_route.to_string(),
            login_route: login_route.to_string(),
        }
    }

    #[must_use]
    pub fn from_settings(settings: &PortalSettings) -> Self {
        Self::new(
            settings.cookies.secure,
            settings.cookies.http_only,
            &settings.routes.landing,
            &settings.routes.login,
        )
    }

    #[must_use]
    pub fn landing_route(&self) -> &str {
        &self.landing_route
    }

    #[must_use]
    pub fn login_route(&self) -> &str {
        &self.login_route
    }

    /// Build the session cookie for a token.
    ///
    /// No `Max-Age`/`Expires`: the cookie lives for the browser session and a new
    /// login overwrites it.
    #[must_use]
    pub fn create_token_cookie(&self, token: &str) -> Cookie<'static> {
        Cookie::build(TOKEN_COOKIE_NAME, token.to_owned())
            .path("/")
            .same_site(SameSite::Lax)
            .secure(self.cookie_secure)
            .http_only(self.cookie_http_only)
            .finish()
    }

    /// Transition for a callback result using the configured routes as-is
    #[must_use]
    pub fn transition(&self, result: AuthCallbackResult) -> CallbackTransition {
        self.transition_with(result, str::to_string)
    }

    /// Transition for a callback result, passing the chosen route through `route`
    /// (used to prefix the language on locale-routed frontends)
    ///
    /// A token that is not a valid cookie value goes to login without a cookie.
    pub fn transition_with<F>(&self, result: AuthCallbackResult, route: F) -> CallbackTransition
    where
        F: Fn(&str) -> String,
    {
        match result {
            AuthCallbackResult::Authenticated { token } if is_cookie_value(&token) => {
                CallbackTransition {
                    cookie: Some(self.create_token_cookie(&token)),
                    location: route(&self.landing_route),
                }
            }
            AuthCallbackResult::Authenticated { .. } | AuthCallbackResult::Unauthenticated => {
                CallbackTransition {
                    cookie: None,
                    location: route(&self.login_route),
                }
            }
        }
    }
}
