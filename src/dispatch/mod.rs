//! Submission of a finished prayer's reflection
//!
//! A submission validates the text, fires the analytics post without waiting
//! for it, opens the messaging deep link and returns the timer to idle.
//! The run is taken and reset before anything is sent, so each run is
//! submitted at most once.

pub mod message;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    error::PrayerError,
    services::{dispatch_analytics, AnalyticsRecord},
    state::{AppState, Page},
};

pub use message::{build_deep_link, build_external_message, validate};

/// Where reflections are sent and what link the invite button copies
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Messaging recipient, e.g. a phone number without the leading `+`
    pub recipient: String,
    /// Deep-link base such as `https://wa.me`
    pub deep_link_base: String,
    pub invite_url: String,
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub duration_minutes: u32,
    pub deep_link: String,
    /// Whether an analytics post was started (not whether it arrived)
    pub analytics_dispatched: bool,
    pub link_opened: bool,
}

/// Submit a reflection for the completed run
///
/// Uses `text` when given, otherwise the stored draft.
pub fn submit(state: &AppState, text: Option<&str>) -> Result<Submission, PrayerError> {
    let draft;
    let text = match text {
        Some(text) => text,
        None => {
            draft = state.draft()?;
            draft.as_str()
        }
    };

    let reflection = validate(text)?;
    let duration_minutes = state.take_completed_run()?;

    let analytics_dispatched = match &state.integrations.analytics {
        Some(sink) => {
            dispatch_analytics(
                Arc::clone(sink),
                AnalyticsRecord::new(duration_minutes, reflection),
            );
            true
        }
        None => {
            debug!("No analytics endpoint configured, skipping stats");
            false
        }
    };

    let message = build_external_message(duration_minutes, reflection);
    let deep_link = build_deep_link(
        &state.settings.deep_link_base,
        &state.settings.recipient,
        &message,
    );

    let link_opened = match state.integrations.opener.open(&deep_link) {
        Ok(()) => true,
        Err(e) => {
            warn!("{}; returning the link to the client instead", e);
            false
        }
    };

    state.show_page(Page::Landing)?;

    info!("Reflection for a {} minute prayer submitted", duration_minutes);
    Ok(Submission {
        duration_minutes,
        deep_link,
        analytics_dispatched,
        link_opened,
    })
}
