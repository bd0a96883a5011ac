//! Shared test doubles for the external collaborators
#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use futures::future::BoxFuture;
use prayer_cloud::{
    dispatch::DispatchSettings,
    services::{AnalyticsError, AnalyticsRecord, AnalyticsSink, Clipboard, Integrations, LinkOpener},
    state::AppState,
};
use tokio::sync::mpsc;

pub const RECIPIENT: &str = "15550100";
pub const INVITE_URL: &str = "http://localhost:20553/";

/// Forwards every record to a channel the test can read
pub struct RecordingSink {
    tx: mpsc::UnboundedSender<AnalyticsRecord>,
}

impl AnalyticsSink for RecordingSink {
    fn record(&self, record: AnalyticsRecord) -> BoxFuture<'static, Result<(), AnalyticsError>> {
        let _ = self.tx.send(record);
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
pub struct RecordingOpener {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
    /// Blocks each open this long, like a slow handler
    pub delay: Duration,
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        std::thread::sleep(self.delay);
        if self.fail {
            return Err("Failed to open link: no handler".to_string());
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    pub copied: Mutex<Vec<String>>,
    pub fail: bool,
}

impl Clipboard for FakeClipboard {
    fn copy<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<(), String>> {
        Box::pin(async move {
            if self.fail {
                return Err("clipboard unavailable".to_string());
            }
            self.copied.lock().unwrap().push(text.to_string());
            Ok(())
        })
    }
}

pub struct Harness {
    pub state: Arc<AppState>,
    pub analytics_rx: mpsc::UnboundedReceiver<AnalyticsRecord>,
    pub opener: Arc<RecordingOpener>,
    pub clipboard: Arc<FakeClipboard>,
}

pub fn harness() -> Harness {
    harness_with(false, false)
}

pub fn harness_with(opener_fails: bool, clipboard_fails: bool) -> Harness {
    build_harness(RecordingOpener {
        fail: opener_fails,
        ..Default::default()
    }, clipboard_fails)
}

/// Harness whose opener blocks for `delay` on every link
pub fn harness_with_slow_opener(delay: Duration) -> Harness {
    build_harness(RecordingOpener {
        delay,
        ..Default::default()
    }, false)
}

fn build_harness(opener: RecordingOpener, clipboard_fails: bool) -> Harness {
    let (tx, analytics_rx) = mpsc::unbounded_channel();
    let opener = Arc::new(opener);
    let clipboard = Arc::new(FakeClipboard {
        fail: clipboard_fails,
        ..Default::default()
    });

    let integrations = Integrations {
        analytics: Some(Arc::new(RecordingSink { tx })),
        opener: opener.clone(),
        clipboard: clipboard.clone(),
    };
    let settings = DispatchSettings {
        recipient: RECIPIENT.to_string(),
        deep_link_base: "https://wa.me".to_string(),
        invite_url: INVITE_URL.to_string(),
    };

    Harness {
        state: Arc::new(AppState::new(20553, "127.0.0.1".to_string(), settings, integrations)),
        analytics_rx,
        opener,
        clipboard,
    }
}

/// Begin a run and tick it down to zero by hand
pub fn complete_run(state: &AppState, minutes: u64) {
    state.begin(&minutes.to_string()).unwrap();
    let run_id = state.get_timer_state().unwrap().run_id;
    for _ in 0..minutes * 60 {
        state.tick(run_id).unwrap();
    }
}
