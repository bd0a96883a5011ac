//! Opening deep links in the user's browser or messaging app

use tracing::{debug, info};

/// Hands a URL off to whatever application handles it
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str) -> Result<(), String>;
}

/// Opens links with the platform's default handler
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        debug!("Opening {}", url);
        open::that_detached(url).map_err(|e| format!("Failed to open link: {}", e))
    }
}

/// Only logs links, for headless hosts (`--no-open`)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOpener;

impl LinkOpener for LogOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        info!("Deep link ready: {}", url);
        Ok(())
    }
}
