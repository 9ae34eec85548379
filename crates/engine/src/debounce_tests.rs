// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

async fn advance(ms: u64) {
    tokio::time::advance(Duration::from_millis(ms)).await;
    for _ in 0..4 {
        tokio::task::yield_now().await;
    }
}

fn recorder(debounce: &Debounce) -> Arc<Mutex<Vec<bool>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    debounce.subscribe(move |on| sink.lock().push(on));
    seen
}

#[tokio::test(start_paused = true)]
async fn delay_clears_after_default_window() {
    let debounce = Debounce::new();
    let seen = recorder(&debounce);
    assert!(!debounce.has_delay());

    debounce.set_delay(None);
    assert!(debounce.has_delay());

    advance(4_999).await;
    assert!(debounce.has_delay());

    advance(2).await;
    assert!(!debounce.has_delay());
    assert_eq!(*seen.lock(), vec![true, false]);
}

#[tokio::test(start_paused = true)]
async fn resetting_restarts_the_window() {
    let debounce = Debounce::new();
    let seen = recorder(&debounce);

    debounce.set_delay(Some(Duration::from_millis(1_000)));
    advance(800).await;
    debounce.set_delay(Some(Duration::from_millis(1_000)));
    advance(800).await;
    assert!(debounce.has_delay());

    advance(300).await;
    assert!(!debounce.has_delay());
    assert_eq!(*seen.lock(), vec![true, true, false]);
}

#[tokio::test(start_paused = true)]
async fn unsubscribed_listeners_are_silent() {
    let debounce = Debounce::new();
    let seen = recorder(&debounce);
    debounce.unsubscribe_all();

    debounce.set_delay(Some(Duration::from_millis(10)));
    advance(20).await;
    assert!(seen.lock().is_empty());
    assert!(!debounce.has_delay());
}

#[tokio::test(start_paused = true)]
async fn window_counts_from_set_delay_before_the_timer_runs() {
    let debounce = Debounce::new();
    debounce.set_delay(Some(Duration::from_millis(100)));

    tokio::time::advance(Duration::from_millis(100)).await;
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert!(!debounce.has_delay());
}
