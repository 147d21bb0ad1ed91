// Centralized logging helpers for the callback and webhook boundaries
use log::{debug, info, warn};
use uuid::Uuid;

pub struct LoggingHelper;

impl LoggingHelper {
    /// Log the callback transition. The token itself is never logged.
    pub fn log_callback_transition(token_len: Option<usize>, language: &str, location: &str) {
        match token_len {
            Some(len) => info!(
                "🔑 Auth callback carried a token ({len} chars), storing cookie and redirecting to {location} (lang: {language})"
            ),
            None => info!(
                "🚪 Auth callback without token, redirecting to {location} (lang: {language})"
            ),
        }
    }

    pub fn log_webhook_received(id: &Uuid, body_len: usize) {
        info!("📨 Apify webhook {id} accepted ({body_len} bytes)");
    }

    pub fn log_webhook_recorded(id: &Uuid, sink_name: &str) {
        debug!("Apify webhook {id} recorded by {sink_name} sink");
    }

    pub fn log_webhook_rejected(reason: &str) {
        warn!("⛔ Apify webhook rejected: {reason}");
    }

    /// Log how the webhook endpoint is set up at startup
    pub fn log_webhook_configuration(sink_name: &str, verifies_signatures: bool) {
        info!("🔧 Apify webhook sink: {sink_name}");
        if verifies_signatures {
            info!("✅ Apify webhook signature verification enabled");
        } else {
            warn!("⚠️  Apify webhook signature verification disabled; set APIFY_WEBHOOK_SECRET to require signed deliveries");
        }
    }
}
