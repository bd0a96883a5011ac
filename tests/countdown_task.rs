//! The background ticker under paused tokio time

mod common;

use std::{sync::Arc, time::Duration};

use common::harness;
use prayer_cloud::{
    state::{view::COMPLETION_MESSAGE, Phase},
    tasks::countdown_task,
};
use tokio::time::sleep;

fn remaining(state: &prayer_cloud::AppState) -> u64 {
    state.get_timer_state().unwrap().remaining_seconds
}

#[tokio::test(start_paused = true)]
async fn ticker_runs_a_countdown_to_completion() {
    let h = harness();
    tokio::spawn(countdown_task(Arc::clone(&h.state)));

    h.state.begin("15").unwrap();
    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(remaining(&h.state), 890);

    sleep(Duration::from_secs(900)).await;
    let view = h.state.view().unwrap();
    assert_eq!(view.phase, Phase::Completed);
    assert_eq!(view.remaining_seconds, 0);
    assert_eq!(view.display, COMPLETION_MESSAGE);
    assert!(view.submit_enabled);
}

#[tokio::test(start_paused = true)]
async fn pause_holds_the_count() {
    let h = harness();
    tokio::spawn(countdown_task(Arc::clone(&h.state)));

    h.state.begin("15").unwrap();
    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(remaining(&h.state), 895);

    h.state.toggle_pause().unwrap();
    sleep(Duration::from_secs(10)).await;
    assert_eq!(remaining(&h.state), 895);
    assert_eq!(h.state.view().unwrap().phase, Phase::Paused);

    h.state.toggle_pause().unwrap();
    sleep(Duration::from_secs(2)).await;
    assert_eq!(remaining(&h.state), 893);
}

#[tokio::test(start_paused = true)]
async fn reset_stops_the_ticker_and_a_new_run_starts_fresh() {
    let h = harness();
    tokio::spawn(countdown_task(Arc::clone(&h.state)));

    h.state.begin("15").unwrap();
    sleep(Duration::from_millis(3_500)).await;
    h.state.reset().unwrap();

    sleep(Duration::from_secs(5)).await;
    let timer = h.state.get_timer_state().unwrap();
    assert_eq!(timer.phase, Phase::Idle);
    assert_eq!(timer.remaining_seconds, 0);

    h.state.begin("20").unwrap();
    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(remaining(&h.state), 20 * 60 - 4);
}
