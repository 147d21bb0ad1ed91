//! Test fixtures providing pre-built settings and components

use std::sync::Arc;

use crate::app::AppComponents;
use crate::settings::PortalSettings;
use crate::webhook::WebhookSink;

use super::constants::{TEST_LANDING_ROUTE, TEST_LOGIN_ROUTE, TEST_WEBHOOK_SECRET};
use super::mock::RecordingSink;

/// Central fixture provider for test data
pub struct TestFixtures;

impl TestFixtures {
    /// Default settings with fixed routes and no webhook secret
    #[must_use]
    pub fn settings() -> PortalSettings {
        let mut settings = PortalSettings::default();
        settings.routes.landing = TEST_LANDING_ROUTE.to_string();
        settings.routes.login = TEST_LOGIN_ROUTE.to_string();
        settings
    }

    /// Settings that require signed webhook deliveries
    #[must_use]
    pub fn signed_webhook_settings() -> PortalSettings {
        let mut settings = Self::settings();
        settings.webhook.secret = TEST_WEBHOOK_SECRET.to_string();
        settings
    }

    /// Settings for a locale-routed frontend supporting `en` and `fr`
    #[must_use]
    pub fn localized_settings() -> PortalSettings {
        let mut settings = Self::settings();
        settings.i18n.supported_languages = vec!["en".to_string(), "fr".to_string()];
        settings.i18n.prefix_routes = true;
        settings
    }

    /// Components around the given sink
    ///
    /// # Panics
    ///
    /// Panics if the fixture settings are rejected
    #[must_use]
    pub fn components_with_sink(sink: Arc<dyn WebhookSink>) -> AppComponents {
        AppComponents::with_sink(Self::settings(), sink).unwrap()
    }

    /// Components with an in-memory recording sink
    #[must_use]
    pub fn components() -> AppComponents {
        Self::components_with_sink(Arc::new(RecordingSink::default()))
    }
}
