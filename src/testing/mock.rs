//! Mock webhook sinks and a stub forwarding target

use std::sync::Mutex;

use actix_web::dev::ServerHandle;
use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use async_trait::async_trait;

use crate::models::WebhookDelivery;
use crate::webhook::{WebhookError, WebhookSink};

/// Keeps every delivery in memory
#[derive(Debug, Default)]
pub struct RecordingSink {
    deliveries: Mutex<Vec<WebhookDelivery>>,
}

impl RecordingSink {
    /// Snapshot of the recorded deliveries
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned
    #[must_use]
    pub fn deliveries(&self) -> Vec<WebhookDelivery> {
        self.deliveries.lock().unwrap().clone()
    }
}

#[async_trait]
impl WebhookSink for RecordingSink {
    async fn record(&self, delivery: &WebhookDelivery) -> Result<(), WebhookError> {
        self.deliveries.lock().unwrap().push(delivery.clone());
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "recording"
    }
}

/// Fails every delivery as if the downstream store were unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingSink;

#[async_trait]
impl WebhookSink for FailingSink {
    async fn record(&self, _delivery: &WebhookDelivery) -> Result<(), WebhookError> {
        Err(WebhookError::Io(std::io::Error::other("store unavailable")))
    }

    fn sink_name(&self) -> &'static str {
        "failing"
    }
}

/// Local HTTP server answering every request with one fixed status, used as the
/// target of a forward sink
pub struct StubUpstream {
    url: String,
    handle: ServerHandle,
}

impl StubUpstream {
    /// Bind to an ephemeral loopback port and serve on the current actix runtime
    ///
    /// # Panics
    ///
    /// Panics if the loopback port cannot be bound
    #[must_use]
    pub fn start(status: StatusCode) -> Self {
        let server = HttpServer::new(move || {
            App::new().default_service(web::to(move || async move {
                HttpResponse::build(status).finish()
            }))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let url = format!("http://{}/hooks", server.addrs()[0]);

        let server = server.run();
        let handle = server.handle();
        actix_web::rt::spawn(server);
        Self { url, handle }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}
