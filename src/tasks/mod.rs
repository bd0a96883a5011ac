//! Background tasks module
//! 
//! This module contains background tasks that run alongside the HTTP server.

pub mod copy_label;
pub mod countdown;

// Re-export main functions
pub use copy_label::{restore_copy_label_task, COPY_CONFIRMATION};
pub use countdown::countdown_task;
