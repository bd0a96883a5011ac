//! Prayer Cloud - A state-managed HTTP server hosting a two-screen prayer timer
//! 
//! The landing screen invites the user to pray; the prayer screen counts down
//! at least fifteen minutes, then unlocks a reflection that is sent on to a
//! messaging app, with an anonymous stats post fired in the background.

pub mod api;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{PrayerError, ValidationError};
pub use state::AppState;
pub use utils::signals::shutdown_signal;
