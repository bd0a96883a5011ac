//! Presentation derived from the timer state
//!
//! The state machine never touches controls directly; every response renders a
//! fresh [`View`] from the current [`TimerState`], page and copy label.

use serde::{Deserialize, Serialize};

use super::{format_time, Phase, TimerState};

/// Display text once the countdown has finished
pub const COMPLETION_MESSAGE: &str = "TIME'S UP! WRITE YOUR VISION.";

pub const COPY_LABEL_IDLE: &str = "Copy Invite Link";
pub const COPY_LABEL_COPIED: &str = "Link Copied!";

/// Which of the two screens is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Landing,
    Prayer,
}

/// Colour accent of the timer display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Gold,
    Muted,
}

/// Snapshot of everything the page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct View {
    pub page: Page,
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub display: String,
    pub accent: Accent,
    pub pause_label: String,
    pub duration_input_enabled: bool,
    pub begin_visible: bool,
    pub pause_visible: bool,
    pub reset_visible: bool,
    pub reflection_enabled: bool,
    pub submit_enabled: bool,
    pub draft: String,
    pub copy_label: String,
}

impl View {
    pub fn render(timer: &TimerState, page: Page, copy_label: &str) -> Self {
        let phase = timer.phase;
        let display = match phase {
            Phase::Completed => COMPLETION_MESSAGE.to_string(),
            Phase::Idle => format_time(0),
            Phase::Running | Phase::Paused => format_time(timer.remaining_seconds),
        };
        let paused = phase == Phase::Paused;

        Self {
            page,
            phase,
            remaining_seconds: timer.remaining_seconds,
            display,
            accent: if paused { Accent::Muted } else { Accent::Gold },
            pause_label: if paused { "Resume" } else { "Pause" }.to_string(),
            duration_input_enabled: phase == Phase::Idle,
            begin_visible: phase == Phase::Idle,
            pause_visible: phase.is_counting(),
            reset_visible: phase != Phase::Idle,
            reflection_enabled: phase == Phase::Completed,
            submit_enabled: phase == Phase::Completed,
            draft: timer.draft.clone(),
            copy_label: copy_label.to_string(),
        }
    }
}
