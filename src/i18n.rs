//! Localization context
//!
//! Built once from settings at startup and handed to handlers as application data.
//! There is no process-wide initialization flag: whoever needs the language gets the
//! context passed in.

use actix_web::{http::header, HttpRequest};

use crate::settings::I18nSettings;

/// Cookie the frontend's i18next setup stores the chosen language in
pub const LANGUAGE_COOKIE: &str = "i18next";

#[derive(Clone, Debug)]
pub struct Localization {
    default_language: String,
    supported_languages: Vec<String>,
    prefix_routes: bool,
}

impl Localization {
    /// Create the context. The default language is always treated as supported.
    #[must_use]
    pub fn new(default_language: &str, supported_languages: &[String], prefix_routes: bool) -> Self {
        let default_language = default_language.to_ascii_lowercase();
        let mut supported: Vec<String> = supported_languages
            .iter()
            .map(|lang| lang.trim().to_ascii_lowercase())
            .filter(|lang| !lang.is_empty())
            .collect();
        if !supported.contains(&default_language) {
            supported.push(default_language.clone());
        }
        Self {
            default_language,
            supported_languages: supported,
            prefix_routes,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &I18nSettings) -> Self {
        Self::new(
            &settings.default_language,
            &settings.supported_languages,
            settings.prefix_routes,
        )
    }

    #[must_use]
    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    /// Match a language tag (`fr-CA`, `FR`) against the supported set by primary subtag
    fn supported(&self, tag: &str) -> Option<&str> {
        let primary = tag.trim().split(['-', '_']).next()?.to_ascii_lowercase();
        self.supported_languages
            .iter()
            .find(|lang| **lang == primary)
            .map(String::as_str)
    }

    /// Pick the request language: the i18next cookie, then `Accept-Language`, then the default
    #[must_use]
    pub fn resolve_language(&self, req: &HttpRequest) -> String {
        if let Some(lang) = req
            .cookie(LANGUAGE_COOKIE)
            .and_then(|cookie| self.supported(cookie.value()).map(str::to_string))
        {
            return lang;
        }

        req.headers()
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| self.match_accept_language(value))
            .unwrap_or_else(|| self.default_language.clone())
    }

    /// First supported entry of an `Accept-Language` value, honouring q-weights
    fn match_accept_language(&self, value: &str) -> Option<String> {
        let mut candidates: Vec<(&str, f32)> = value
            .split(',')
            .filter_map(|entry| {
                let mut parts = entry.split(';');
                let tag = parts.next()?.trim();
                let quality = parts
                    .find_map(|param| param.trim().strip_prefix("q="))
                    .and_then(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!tag.is_empty() && tag != "*").then_some((tag, quality))
            })
            .collect();
        // Stable sort keeps header order among equal weights
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .into_iter()
            .filter(|(_, quality)| *quality > 0.0)
            .find_map(|(tag, _)| self.supported(tag).map(str::to_string))
    }

    /// Prefix a frontend route with the language when the frontend is locale-routed.
    /// Absolute URLs (`https://app/...`, `//app/...`) are returned unchanged.
    #[must_use]
    pub fn localize_path(&self, language: &str, path: &str) -> String {
        if !self.prefix_routes || is_absolute_url(path) {
            return path.to_string();
        }
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("/{language}")
        } else {
            format!("/{language}/{path}")
        }
    }
}

fn is_absolute_url(path: &str) -> bool {
    path.starts_with("//") || url::Url::parse(path).is_ok()
}
