//! Application assembly
//!
//! Everything the handlers need is built once here from settings and shared with
//! every worker as `web::Data`.

use std::sync::Arc;

use actix_web::web;
use anyhow::Context;

use crate::auth::SessionCookieWriter;
use crate::handlers::configure_services;
use crate::i18n::Localization;
use crate::settings::PortalSettings;
use crate::utils::logging::LoggingHelper;
use crate::webhook::{create_sink, WebhookIngestor, WebhookSink};

#[derive(Clone)]
pub struct AppComponents {
    pub settings: web::Data<PortalSettings>,
    pub localization: web::Data<Localization>,
    pub cookie_writer: web::Data<SessionCookieWriter>,
    pub ingestor: web::Data<WebhookIngestor>,
}

impl AppComponents {
    /// Build all components, including the configured webhook sink
    ///
    /// # Errors
    ///
    /// Returns an error if the webhook sink cannot be created
    pub fn from_settings(settings: PortalSettings) -> anyhow::Result<Self> {
        let sink = create_sink(&settings.webhook).context("configuring webhook sink")?;
        Self::with_sink(settings, sink)
    }

    /// Build all components around an explicit webhook sink
    ///
    /// # Errors
    ///
    /// Returns an error if webhook signature verification is misconfigured
    pub fn with_sink(
        settings: PortalSettings,
        sink: Arc<dyn WebhookSink>,
    ) -> anyhow::Result<Self> {
        let localization = Localization::from_settings(&settings.i18n);
        let cookie_writer = SessionCookieWriter::from_settings(&settings);
        let ingestor = WebhookIngestor::from_settings(&settings, sink)
            .context("configuring webhook signature verification")?;
        LoggingHelper::log_webhook_configuration(ingestor.sink_name(), ingestor.verifies_signatures());

        Ok(Self {
            settings: web::Data::new(settings),
            localization: web::Data::new(localization),
            cookie_writer: web::Data::new(cookie_writer),
            ingestor: web::Data::new(ingestor),
        })
    }

    /// Register application data, the webhook body limit and all routes
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.settings.clone())
            .app_data(self.localization.clone())
            .app_data(self.cookie_writer.clone())
            .app_data(self.ingestor.clone())
            .app_data(web::PayloadConfig::new(self.settings.webhook.max_body_bytes));
        configure_services(cfg);
    }
}
