//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant},
};
use tracing::{debug, error, info};

use crate::state::{AppState, TickOutcome, TimerState};

/// Period of the countdown tick
pub const TICK: Duration = Duration::from_secs(1);

/// Background task that ticks the prayer timer while a run is in progress
///
/// Watches timer updates; whenever a run is running or paused it ticks that run
/// once a second until the run completes, is reset, or is replaced by a new one.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut timer_rx = state.subscribe();

    loop {
        let current = timer_rx.borrow_and_update().clone();

        if current.is_active() {
            if !run_countdown(&state, &mut timer_rx, current.run_id).await {
                break;
            }
            continue;
        }

        // Idle or completed, wait for the next begin
        if timer_rx.changed().await.is_err() {
            break;
        }
    }

    info!("Countdown task stopped");
}

/// Tick one run; returns `false` once the timer channel has closed
async fn run_countdown(
    state: &AppState,
    timer_rx: &mut watch::Receiver<TimerState>,
    run_id: u64,
) -> bool {
    debug!("Ticker started for run {}", run_id);

    // Pausing keeps this schedule, so the first decrement after a resume can
    // come in under a second, as with a page interval timer.
    let mut interval = interval_at(Instant::now() + TICK, TICK);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick(run_id) {
                    Ok(TickOutcome::Counted(remaining)) => {
                        debug!("Run {}: {}s remaining", run_id, remaining);
                    }
                    Ok(TickOutcome::Held) => {}
                    Ok(TickOutcome::Completed) => {
                        info!("Countdown for run {} reached zero, ticker stopped", run_id);
                        return true;
                    }
                    Ok(TickOutcome::Stopped) => {
                        debug!("Run {} is no longer current, ticker stopped", run_id);
                        return true;
                    }
                    Err(e) => {
                        error!("Failed to tick run {}: {}", run_id, e);
                        return true;
                    }
                }
            }

            changed = timer_rx.changed() => {
                if changed.is_err() {
                    return false;
                }
                let (current_run, active) = {
                    let current = timer_rx.borrow_and_update();
                    (current.run_id, current.is_active())
                };
                if current_run != run_id || !active {
                    debug!("Run {} was reset or replaced, ticker stopped", run_id);
                    return true;
                }
            }
        }
    }
}
