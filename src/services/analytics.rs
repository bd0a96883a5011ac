//! Background analytics post to a form-ingestion endpoint

use std::sync::Arc;

use futures::future::BoxFuture;
use reqwest::Client;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use url::Url;

/// Longest reflection snippet sent with the analytics post, in characters
pub const SNIPPET_CHARS: usize = 150;

/// One analytics entry: how long the user prayed and the start of what they wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsRecord {
    pub duration_minutes: u32,
    pub snippet: String,
}

impl AnalyticsRecord {
    /// Build a record, truncating the reflection to [`SNIPPET_CHARS`] characters
    pub fn new(duration_minutes: u32, reflection: &str) -> Self {
        Self {
            duration_minutes,
            snippet: reflection.chars().take(SNIPPET_CHARS).collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("analytics request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Anything that can receive an analytics record
pub trait AnalyticsSink: Send + Sync {
    fn record(&self, record: AnalyticsRecord) -> BoxFuture<'static, Result<(), AnalyticsError>>;
}

/// Field names and endpoint of the ingestion form
#[derive(Debug, Clone)]
pub struct AnalyticsSettings {
    pub endpoint: Url,
    pub duration_field: String,
    pub reflection_field: String,
}

/// Posts records as `application/x-www-form-urlencoded` bodies
///
/// The response is never inspected: the endpoint is treated as opaque, and only
/// transport failures count as errors.
#[derive(Debug, Clone)]
pub struct FormAnalytics {
    client: Client,
    settings: AnalyticsSettings,
}

impl FormAnalytics {
    pub fn new(settings: AnalyticsSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }
}

impl AnalyticsSink for FormAnalytics {
    fn record(&self, record: AnalyticsRecord) -> BoxFuture<'static, Result<(), AnalyticsError>> {
        let request = self
            .client
            .post(self.settings.endpoint.clone())
            .form(&[
                (
                    self.settings.duration_field.as_str(),
                    record.duration_minutes.to_string(),
                ),
                (self.settings.reflection_field.as_str(), record.snippet),
            ]);

        Box::pin(async move {
            let response = request.send().await?;
            debug!("Analytics endpoint answered with {}", response.status());
            Ok(())
        })
    }
}

/// Fire-and-forget wrapper around an analytics sink
///
/// Spawns the post and returns immediately. The outcome is logged and never
/// surfaced to the caller: the returned handle resolves to `()` whether the post
/// succeeded or not, so awaiting it (tests do) cannot observe a failure.
pub fn dispatch_analytics(sink: Arc<dyn AnalyticsSink>, record: AnalyticsRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        let duration = record.duration_minutes;
        match sink.record(record).await {
            Ok(()) => info!("Stats sent for a {} minute prayer (background)", duration),
            Err(e) => warn!("Error sending stats: {}", e),
        }
    })
}
