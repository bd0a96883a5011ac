//! Restores the copy-invite label after the confirmation window

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::state::AppState;

/// How long "Link Copied!" stays visible
pub const COPY_CONFIRMATION: Duration = Duration::from_millis(1500);

/// Wait out the confirmation window, then put the label back
pub async fn restore_copy_label_task(state: Arc<AppState>, generation: u64) {
    sleep(COPY_CONFIRMATION).await;

    match state.restore_copy_label(generation) {
        Ok(()) => debug!("Copy label restored (copy {})", generation),
        Err(e) => warn!("Failed to restore copy label: {}", e),
    }
}
