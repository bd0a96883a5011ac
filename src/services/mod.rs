//! External collaborators
//!
//! This module contains the analytics endpoint, the deep-link opener and the
//! clipboard. Each sits behind a trait so the state machine only knows the
//! call contract.

pub mod analytics;
pub mod clipboard;
pub mod launcher;

use std::sync::Arc;

// Re-export main types
pub use analytics::{
    dispatch_analytics, AnalyticsError, AnalyticsRecord, AnalyticsSettings, AnalyticsSink,
    FormAnalytics,
};
pub use clipboard::{Clipboard, CommandClipboard};
pub use launcher::{LinkOpener, LogOpener, SystemOpener};

/// The collaborators one application instance talks to
#[derive(Clone)]
pub struct Integrations {
    /// `None` when no ingestion endpoint is configured
    pub analytics: Option<Arc<dyn AnalyticsSink>>,
    pub opener: Arc<dyn LinkOpener>,
    pub clipboard: Arc<dyn Clipboard>,
}
