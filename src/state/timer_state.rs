//! Timer state structure and countdown transitions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PrayerError, ValidationError, MIN_PRAYER_MINUTES};

/// Current mode of the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl Phase {
    /// Phases in which the one-second ticker stays alive
    pub fn is_counting(self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// What a single tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One second was taken off; carries the new remaining time
    Counted(u64),
    /// Paused, nothing changed but the ticker should keep going
    Held,
    /// The countdown just reached zero
    Completed,
    /// No run to tick (idle, already completed, or a replaced run)
    Stopped,
}

impl TickOutcome {
    /// Whether the ticker should keep running after this outcome
    pub fn keeps_ticking(self) -> bool {
        matches!(self, TickOutcome::Counted(_) | TickOutcome::Held)
    }
}

/// Countdown state for one page session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_seconds: u64,
    pub configured_minutes: Option<u32>,
    /// Reflection draft, editable only once the countdown has completed
    pub draft: String,
    /// Bumped on every `begin` so a ticker can tell whether it is still current
    pub run_id: u64,
}

impl TimerState {
    /// Create a new idle timer state
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            remaining_seconds: 0,
            configured_minutes: None,
            draft: String::new(),
            run_id: 0,
        }
    }

    /// Start a run of `minutes` minutes
    ///
    /// Rejects durations under [`MIN_PRAYER_MINUTES`] without touching the state,
    /// and refuses to restart a run that is already in progress or finished.
    pub fn begin(&mut self, minutes: i64) -> Result<u64, PrayerError> {
        let minutes = check_minutes(minutes)?;
        if self.phase != Phase::Idle {
            return Err(PrayerError::InvalidTransition {
                action: "begin",
                phase: self.phase,
            });
        }

        self.run_id += 1;
        self.configured_minutes = Some(minutes);
        self.remaining_seconds = u64::from(minutes) * 60;
        self.phase = Phase::Running;
        self.draft.clear();
        Ok(self.run_id)
    }

    /// Advance the countdown by one second
    pub fn tick(&mut self) -> TickOutcome {
        match self.phase {
            Phase::Running => {
                self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
                if self.remaining_seconds == 0 {
                    self.phase = Phase::Completed;
                    TickOutcome::Completed
                } else {
                    TickOutcome::Counted(self.remaining_seconds)
                }
            }
            Phase::Paused => TickOutcome::Held,
            Phase::Idle | Phase::Completed => TickOutcome::Stopped,
        }
    }

    /// Flip between running and paused; returns the new phase, or `None` when
    /// there is nothing to pause
    pub fn toggle_pause(&mut self) -> Option<Phase> {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::Idle | Phase::Completed => return None,
        };
        Some(self.phase)
    }

    /// Drop the current run and return to idle
    pub fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.remaining_seconds = 0;
        self.configured_minutes = None;
        self.draft.clear();
    }

    /// Close a completed run, returning its configured duration
    ///
    /// The run is reset in the same step, so a run can be taken at most once.
    pub fn finish_run(&mut self) -> Result<u32, PrayerError> {
        match (self.phase, self.configured_minutes) {
            (Phase::Completed, Some(minutes)) => {
                self.reset();
                Ok(minutes)
            }
            (phase, _) => Err(PrayerError::InvalidTransition {
                action: "send a reflection",
                phase,
            }),
        }
    }

    /// Replace the reflection draft; only allowed after completion
    pub fn set_draft(&mut self, text: &str) -> Result<(), PrayerError> {
        if self.phase != Phase::Completed {
            return Err(PrayerError::InvalidTransition {
                action: "edit the reflection",
                phase: self.phase,
            });
        }
        self.draft = text.to_string();
        Ok(())
    }

    /// Check if a run is counting down (running or paused)
    pub fn is_active(&self) -> bool {
        self.phase.is_counting()
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the duration field the way a number input reports it
pub fn parse_minutes(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::DurationNotANumber {
            input: input.to_string(),
            minimum: MIN_PRAYER_MINUTES,
        })
}

fn check_minutes(minutes: i64) -> Result<u32, ValidationError> {
    if minutes < i64::from(MIN_PRAYER_MINUTES) {
        return Err(ValidationError::DurationTooShort {
            requested: minutes,
            minimum: MIN_PRAYER_MINUTES,
        });
    }
    u32::try_from(minutes).map_err(|_| ValidationError::DurationTooLong {
        requested: minutes,
        maximum: u32::MAX,
    })
}

/// Format seconds as `MM:SS`
pub fn format_time(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_rejects_short_durations_and_stays_idle() {
        for minutes in [-5, 0, 1, 14] {
            let mut timer = TimerState::new();
            let err = timer.begin(minutes).unwrap_err();
            assert!(err.is_validation());
            assert_eq!(timer, TimerState::new());
        }
    }

    #[test]
    fn begin_sets_remaining_seconds() {
        for minutes in [15, 20, 45, 120] {
            let mut timer = TimerState::new();
            timer.begin(minutes).unwrap();
            assert_eq!(timer.phase, Phase::Running);
            assert_eq!(timer.remaining_seconds, minutes as u64 * 60);
            assert_eq!(timer.configured_minutes, Some(minutes as u32));
        }
    }

    #[test]
    fn begin_rejects_durations_past_u32_minutes() {
        let mut timer = TimerState::new();
        let err = timer.begin(99_999_999_999).unwrap_err();
        assert!(matches!(
            err,
            PrayerError::Validation(ValidationError::DurationTooLong { requested: 99_999_999_999, .. })
        ));
        assert_eq!(timer, TimerState::new());

        timer.begin(i64::from(u32::MAX)).unwrap();
        assert_eq!(timer.configured_minutes, Some(u32::MAX));
    }

    #[test]
    fn finish_run_takes_a_completed_run_once() {
        let mut timer = TimerState::new();
        timer.begin(20).unwrap();
        assert!(timer.finish_run().is_err());
        while timer.tick().keeps_ticking() {}

        assert_eq!(timer.finish_run().unwrap(), 20);
        assert_eq!(timer.phase, Phase::Idle);
        assert!(matches!(
            timer.finish_run(),
            Err(PrayerError::InvalidTransition { phase: Phase::Idle, .. })
        ));
    }

    #[test]
    fn begin_refuses_while_running() {
        let mut timer = TimerState::new();
        timer.begin(15).unwrap();
        let err = timer.begin(20).unwrap_err();
        assert!(matches!(
            err,
            PrayerError::InvalidTransition { phase: Phase::Running, .. }
        ));
        assert_eq!(timer.configured_minutes, Some(15));
    }

    #[test]
    fn ticking_to_zero_completes_exactly_once() {
        let mut timer = TimerState::new();
        timer.begin(15).unwrap();

        let mut completions = 0;
        for _ in 0..900 {
            if timer.tick() == TickOutcome::Completed {
                completions += 1;
            }
        }
        assert_eq!(completions, 1);
        assert_eq!(timer.phase, Phase::Completed);
        assert_eq!(timer.remaining_seconds, 0);

        // Extra ticks neither re-fire nor go below zero
        assert_eq!(timer.tick(), TickOutcome::Stopped);
        assert_eq!(timer.remaining_seconds, 0);
        assert_eq!(timer.phase, Phase::Completed);
    }

    #[test]
    fn paused_ticks_hold_the_count() {
        let mut timer = TimerState::new();
        timer.begin(15).unwrap();
        timer.tick();
        let before = timer.clone();

        assert_eq!(timer.toggle_pause(), Some(Phase::Paused));
        for _ in 0..10 {
            assert_eq!(timer.tick(), TickOutcome::Held);
        }
        assert_eq!(timer.toggle_pause(), Some(Phase::Running));
        assert_eq!(timer, before);
    }

    #[test]
    fn toggle_pause_has_no_effect_outside_a_run() {
        let mut timer = TimerState::new();
        assert_eq!(timer.toggle_pause(), None);
        assert_eq!(timer.phase, Phase::Idle);
    }

    #[test]
    fn reset_from_any_phase() {
        let mut running = TimerState::new();
        running.begin(15).unwrap();

        let mut paused = running.clone();
        paused.toggle_pause();

        let mut completed = TimerState::new();
        completed.begin(15).unwrap();
        for _ in 0..900 {
            completed.tick();
        }
        completed.set_draft("a draft that should be dropped").unwrap();

        for mut timer in [TimerState::new(), running, paused, completed] {
            timer.reset();
            assert_eq!(timer.phase, Phase::Idle);
            assert_eq!(timer.remaining_seconds, 0);
            assert!(timer.draft.is_empty());
            assert_eq!(timer.configured_minutes, None);
        }
    }

    #[test]
    fn draft_is_locked_until_completion() {
        let mut timer = TimerState::new();
        assert!(timer.set_draft("too early").is_err());
        timer.begin(15).unwrap();
        assert!(timer.set_draft("still too early").is_err());
    }

    #[test]
    fn parse_minutes_accepts_trimmed_integers() {
        assert_eq!(parse_minutes(" 20 ").unwrap(), 20);
        assert!(parse_minutes("").is_err());
        assert!(parse_minutes("twenty").is_err());
        assert!(parse_minutes("20.5").is_err());
    }

    #[test]
    fn format_time_pads_minutes_and_seconds() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(900), "15:00");
        assert_eq!(format_time(65), "01:05");
        assert_eq!(format_time(125 * 60 + 7), "125:07");
    }
}
