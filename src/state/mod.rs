//! State management module
//! 
//! This module contains the countdown state machine, the view rendered from it,
//! and the shared application state that handlers and tasks operate on.

pub mod app_state;
pub mod timer_state;
pub mod view;

// Re-export main types
pub use app_state::AppState;
pub use timer_state::{format_time, parse_minutes, Phase, TickOutcome, TimerState};
pub use view::{Accent, Page, View};
