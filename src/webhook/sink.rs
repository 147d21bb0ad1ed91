//! Recording targets for accepted webhook deliveries

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use log::info;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::error::WebhookError;
use crate::models::WebhookDelivery;
use crate::settings::{SinkKind, WebhookSettings};

/// Somewhere a delivery is recorded before it is acknowledged
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// Record one delivery
    ///
    /// # Errors
    ///
    /// Returns an error if the delivery could not be recorded; the caller answers
    /// with a server error instead of the acknowledgement.
    async fn record(&self, delivery: &WebhookDelivery) -> Result<(), WebhookError>;

    /// Name for logging
    fn sink_name(&self) -> &'static str;
}

/// Writes the delivery to the application log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

#[async_trait]
impl WebhookSink for LogSink {
    async fn record(&self, delivery: &WebhookDelivery) -> Result<(), WebhookError> {
        let payload = serde_json::to_string(&delivery.payload)?;
        info!(
            "📥 Apify webhook {} received at {}: {payload}",
            delivery.id,
            delivery.received_at.to_rfc3339()
        );
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "log"
    }
}

/// Appends one JSON line per delivery to a file
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileSink {
    /// Create the sink, making sure the parent directory exists
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created
    pub fn new(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating webhook directory {}", parent.display()))?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl WebhookSink for FileSink {
    async fn record(&self, delivery: &WebhookDelivery) -> Result<(), WebhookError> {
        let mut line = serde_json::to_vec(delivery)?;
        line.push(b'\n');

        // Lines from concurrent workers must not interleave
        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;
        Ok(())
    }

    fn sink_name(&self) -> &'static str {
        "file"
    }
}

/// POSTs the delivery as JSON to another service
#[derive(Debug, Clone)]
pub struct ForwardSink {
    client: reqwest::Client,
    url: String,
}

impl ForwardSink {
    /// # Errors
    ///
    /// Returns an error if the URL is not absolute or the HTTP client cannot be built
    pub fn new(url: &str, timeout: Duration) -> anyhow::Result<Self> {
        url::Url::parse(url).with_context(|| format!("invalid webhook forward URL '{url}'"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("building webhook forward client")?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl WebhookSink for ForwardSink {
    async fn record(&self, delivery: &WebhookDelivery) -> Result<(), WebhookError> {
        let response = self.client.post(&self.url).json(delivery).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(WebhookError::ForwardStatus(status.as_u16()))
        }
    }

    fn sink_name(&self) -> &'static str {
        "forward"
    }
}

/// Build the sink selected in settings
///
/// # Errors
///
/// Returns an error if the selected sink is missing its target or cannot be set up
pub fn create_sink(settings: &WebhookSettings) -> anyhow::Result<Arc<dyn WebhookSink>> {
    let sink: Arc<dyn WebhookSink> = match settings.sink {
        SinkKind::Log => Arc::new(LogSink),
        SinkKind::File => {
            if settings.file_path.is_empty() {
                return Err(anyhow!("webhook.file_path must be set for the file sink"));
            }
            Arc::new(FileSink::new(&settings.file_path)?)
        }
        SinkKind::Forward => {
            if settings.forward_url.is_empty() {
                return Err(anyhow!("webhook.forward_url must be set for the forward sink"));
            }
            Arc::new(ForwardSink::new(
                &settings.forward_url,
                Duration::from_secs(settings.forward_timeout_secs),
            )?)
        }
    };
    Ok(sink)
}
