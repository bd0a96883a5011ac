//! Error types shared by the timer, the dispatcher and the HTTP layer
//!
//! The `Display` text of each validation error is the notice shown to the user.

use thiserror::Error;

use crate::state::Phase;

/// Shortest prayer the timer accepts, in minutes
pub const MIN_PRAYER_MINUTES: u32 = 15;

/// Shortest reflection accepted for submission, in characters (after trimming)
pub const MIN_REFLECTION_CHARS: usize = 20;

/// User input that fails the bounds checks
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please set a minimum prayer duration of {minimum} minutes.")]
    DurationNotANumber { input: String, minimum: u32 },

    #[error("Please set a minimum prayer duration of {minimum} minutes.")]
    DurationTooShort { requested: i64, minimum: u32 },

    #[error("Please set a prayer duration of at most {maximum} minutes.")]
    DurationTooLong { requested: i64, maximum: u32 },

    #[error("Please write a more detailed reflection on your vision and execution plan.")]
    ReflectionTooShort { length: usize, minimum: usize },
}

/// Errors raised by state operations
#[derive(Debug, Error)]
pub enum PrayerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Cannot {action} while the timer is {phase}")]
    InvalidTransition { action: &'static str, phase: Phase },

    #[error("Could not copy link. Please manually copy the URL in your address bar.")]
    Clipboard(String),

    #[error("Failed to lock {0}")]
    StateLock(String),
}

impl PrayerError {
    /// True for errors the user can fix by changing their input
    pub fn is_validation(&self) -> bool {
        matches!(self, PrayerError::Validation(_))
    }
}
