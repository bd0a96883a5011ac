//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{info, warn};

use super::{
    parse_minutes,
    view::{COPY_LABEL_COPIED, COPY_LABEL_IDLE},
    Page, TickOutcome, TimerState, View,
};
use crate::{
    dispatch::DispatchSettings,
    error::PrayerError,
    services::Integrations,
    tasks::restore_copy_label_task,
};

/// Copy-invite label plus a counter so an old restore cannot undo a newer copy
#[derive(Debug, Default)]
struct CopyLabel {
    copied: bool,
    generation: u64,
}

/// Main application state shared by the HTTP handlers and background tasks
pub struct AppState {
    /// Countdown and reflection draft
    timer: Mutex<TimerState>,
    page: Mutex<Page>,
    copy_label: Mutex<CopyLabel>,
    /// Channel for timer updates, watched by the countdown task
    timer_update_tx: watch::Sender<TimerState>,
    pub settings: DispatchSettings,
    pub integrations: Integrations,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    last_action: Mutex<Option<String>>,
    last_action_time: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    /// Create a new AppState on the landing page with an idle timer
    pub fn new(
        port: u16,
        host: String,
        settings: DispatchSettings,
        integrations: Integrations,
    ) -> Self {
        let (timer_update_tx, _) = watch::channel(TimerState::new());

        Self {
            timer: Mutex::new(TimerState::new()),
            page: Mutex::new(Page::Landing),
            copy_label: Mutex::new(CopyLabel::default()),
            timer_update_tx,
            settings,
            integrations,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
            last_action_time: Mutex::new(None),
        }
    }

    fn lock_timer(&self) -> Result<MutexGuard<'_, TimerState>, PrayerError> {
        self.timer
            .lock()
            .map_err(|e| PrayerError::StateLock(format!("timer state: {}", e)))
    }

    /// Apply a change to the timer and notify watchers
    ///
    /// Nothing is published or recorded when `updater` fails.
    pub fn update_timer<F, T>(&self, action: &str, updater: F) -> Result<T, PrayerError>
    where
        F: FnOnce(&mut TimerState) -> Result<T, PrayerError>,
    {
        let mut timer = self.lock_timer()?;
        let result = updater(&mut *timer)?;
        let snapshot = timer.clone();
        drop(timer); // Release the lock early

        self.record_action(action);
        self.timer_update_tx.send_replace(snapshot);
        Ok(result)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Start a countdown from the duration field's text
    pub fn begin(&self, input: &str) -> Result<View, PrayerError> {
        let minutes = parse_minutes(input)?;
        let run_id = self.update_timer("begin", |timer| timer.begin(minutes))?;
        info!("Prayer timer started for {} minutes (run {})", minutes, run_id);
        self.view()
    }

    /// Advance run `run_id` by one second
    ///
    /// A tick for a run that has since been reset or replaced does nothing.
    pub fn tick(&self, run_id: u64) -> Result<TickOutcome, PrayerError> {
        let mut timer = self.lock_timer()?;
        if timer.run_id != run_id {
            return Ok(TickOutcome::Stopped);
        }

        let outcome = timer.tick();
        let snapshot = timer.clone();
        drop(timer);

        match outcome {
            TickOutcome::Counted(_) => {
                self.timer_update_tx.send_replace(snapshot);
            }
            TickOutcome::Completed => {
                info!("Prayer timer completed (run {}), reflection unlocked", run_id);
                self.record_action("complete");
                self.timer_update_tx.send_replace(snapshot);
            }
            TickOutcome::Held | TickOutcome::Stopped => {}
        }
        Ok(outcome)
    }

    /// Pause a running timer or resume a paused one
    pub fn toggle_pause(&self) -> Result<View, PrayerError> {
        let toggled = self.update_timer("pause", |timer| Ok(timer.toggle_pause()))?;
        match toggled {
            Some(phase) => info!("Prayer timer {}", phase),
            None => info!("Pause ignored, no countdown in progress"),
        }
        self.view()
    }

    /// Return the timer to idle from any phase
    pub fn reset(&self) -> Result<View, PrayerError> {
        self.update_timer("reset", |timer| {
            timer.reset();
            Ok(())
        })?;
        info!("Prayer timer reset");
        self.view()
    }

    /// Store the reflection being written
    pub fn set_draft(&self, text: &str) -> Result<View, PrayerError> {
        self.update_timer("edit-reflection", |timer| timer.set_draft(text))?;
        self.view()
    }

    /// Current reflection draft
    pub fn draft(&self) -> Result<String, PrayerError> {
        Ok(self.lock_timer()?.draft.clone())
    }

    /// Take the completed run for submission, resetting the timer in the same step
    ///
    /// Only one caller can take a given run; later callers see an idle timer.
    pub fn take_completed_run(&self) -> Result<u32, PrayerError> {
        self.update_timer("submit", |timer| timer.finish_run())
    }

    /// Switch between the landing and prayer screens
    pub fn show_page(&self, page: Page) -> Result<View, PrayerError> {
        {
            let mut current = self
                .page
                .lock()
                .map_err(|e| PrayerError::StateLock(format!("page: {}", e)))?;
            *current = page;
        }
        self.record_action(match page {
            Page::Landing => "landing-page",
            Page::Prayer => "prayer-page",
        });
        self.view()
    }

    /// Copy the invite link and flag the label as copied for a short while
    pub async fn copy_invite(self: &Arc<Self>) -> Result<View, PrayerError> {
        let invite_url = self.settings.invite_url.clone();
        if let Err(e) = self.integrations.clipboard.copy(&invite_url).await {
            warn!("Could not copy text: {}", e);
            return Err(PrayerError::Clipboard(e));
        }

        let generation = {
            let mut label = self
                .copy_label
                .lock()
                .map_err(|e| PrayerError::StateLock(format!("copy label: {}", e)))?;
            label.copied = true;
            label.generation += 1;
            label.generation
        };
        self.record_action("copy-invite");

        tokio::spawn(restore_copy_label_task(Arc::clone(self), generation));
        self.view()
    }

    /// Put the copy label back unless a newer copy has happened since
    pub fn restore_copy_label(&self, generation: u64) -> Result<(), PrayerError> {
        let mut label = self
            .copy_label
            .lock()
            .map_err(|e| PrayerError::StateLock(format!("copy label: {}", e)))?;
        if label.generation == generation {
            label.copied = false;
        }
        Ok(())
    }

    /// Render the page as it currently stands
    pub fn view(&self) -> Result<View, PrayerError> {
        let timer = self.get_timer_state()?;
        let page = *self
            .page
            .lock()
            .map_err(|e| PrayerError::StateLock(format!("page: {}", e)))?;
        let copied = self
            .copy_label
            .lock()
            .map_err(|e| PrayerError::StateLock(format!("copy label: {}", e)))?
            .copied;
        let label = if copied { COPY_LABEL_COPIED } else { COPY_LABEL_IDLE };
        Ok(View::render(&timer, page, label))
    }

    /// Get current timer state
    pub fn get_timer_state(&self) -> Result<TimerState, PrayerError> {
        Ok(self.lock_timer()?.clone())
    }

    /// Watch every published timer change
    pub fn subscribe(&self) -> watch::Receiver<TimerState> {
        self.timer_update_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
