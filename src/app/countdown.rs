// SPDX-License-Identifier: GPL-3.0-only

//! Pre-capture countdown
//!
//! `Idle → Counting(n) → … → Counting(0) → Idle`, one step per tick. Every
//! state is published on a watch channel and reported to the observer. A
//! started countdown always runs to completion; if its future is dropped
//! part-way the published state still returns to `Idle`.

use crate::constants::capture::COUNTDOWN_TICK;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

/// Observable countdown state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CountdownState {
    #[default]
    Idle,
    /// Seconds remaining; 0 is the final state before returning to idle
    Counting(u32),
}

/// Receives countdown progress
pub trait CountdownObserver: Send + Sync {
    /// Called on entering each `Counting(n)` state, including 0
    fn on_tick(&self, _seconds_remaining: u32) {}

    /// Called once after the final tick
    fn on_complete(&self) {}
}

/// Publishes `Idle` on drop unless the countdown already did
struct ResetOnDrop<'a> {
    state: &'a watch::Sender<CountdownState>,
}

impl Drop for ResetOnDrop<'_> {
    fn drop(&mut self) {
        self.state.send_if_modified(|state| {
            if *state == CountdownState::Idle {
                return false;
            }
            debug!(?state, "Countdown abandoned, resetting to idle");
            *state = CountdownState::Idle;
            true
        });
    }
}

/// Countdown state machine
#[derive(Debug)]
pub struct Countdown {
    state: watch::Sender<CountdownState>,
    tick: Duration,
}

impl Countdown {
    pub fn new() -> Self {
        Self::with_tick(COUNTDOWN_TICK)
    }

    pub fn with_tick(tick: Duration) -> Self {
        let (state, _) = watch::channel(CountdownState::Idle);
        Self { state, tick }
    }

    /// Follow state changes
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CountdownState {
        *self.state.borrow()
    }

    /// Count down from `seconds`, suspending one tick between states
    ///
    /// Returns immediately for 0 without entering `Counting`.
    pub async fn run<O>(&self, seconds: u32, observer: &O)
    where
        O: CountdownObserver + ?Sized,
    {
        if seconds == 0 {
            return;
        }

        info!(seconds, "Starting countdown");
        let _reset = ResetOnDrop { state: &self.state };

        for remaining in (0..=seconds).rev() {
            self.state.send_replace(CountdownState::Counting(remaining));
            observer.on_tick(remaining);
            debug!(remaining, "Countdown tick");

            if remaining > 0 {
                tokio::time::sleep(self.tick).await;
            }
        }

        self.state.send_replace(CountdownState::Idle);
        observer.on_complete();
        info!("Countdown complete");
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tokio::time::Instant;

    #[derive(Default)]
    struct Recorder {
        ticks: Mutex<Vec<(u32, Instant)>>,
        completed: Mutex<Option<Instant>>,
    }

    impl CountdownObserver for Recorder {
        fn on_tick(&self, seconds_remaining: u32) {
            self.ticks
                .lock()
                .unwrap()
                .push((seconds_remaining, Instant::now()));
        }

        fn on_complete(&self) {
            *self.completed.lock().unwrap() = Some(Instant::now());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_second_countdown_emits_four_states() {
        let countdown = Countdown::new();
        let recorder = Recorder::default();
        let start = Instant::now();

        countdown.run(3, &recorder).await;

        let ticks = recorder.ticks.lock().unwrap().clone();
        let values: Vec<u32> = ticks.iter().map(|(n, _)| *n).collect();
        assert_eq!(values, vec![3, 2, 1, 0]);

        for (i, (_, at)) in ticks.iter().enumerate() {
            let elapsed = *at - start;
            let expected = Duration::from_secs(i as u64);
            assert!(elapsed >= expected && elapsed < expected + Duration::from_millis(10));
        }
        assert!(recorder.completed.lock().unwrap().is_some());
        assert_eq!(countdown.state(), CountdownState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_seconds_is_a_no_op() {
        let countdown = Countdown::new();
        let recorder = Recorder::default();
        let start = Instant::now();

        countdown.run(0, &recorder).await;

        assert!(recorder.ticks.lock().unwrap().is_empty());
        assert!(recorder.completed.lock().unwrap().is_none());
        assert_eq!(Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_countdown_returns_to_idle() {
        let countdown = Countdown::new();
        let recorder = Recorder::default();

        let result =
            tokio::time::timeout(Duration::from_millis(1500), countdown.run(3, &recorder)).await;

        assert!(result.is_err());
        assert_eq!(recorder.ticks.lock().unwrap().len(), 2);
        assert!(recorder.completed.lock().unwrap().is_none());
        assert_eq!(countdown.state(), CountdownState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_state_is_observable_while_counting() {
        let countdown = std::sync::Arc::new(Countdown::new());
        let mut rx = countdown.subscribe();
        let runner = {
            let countdown = countdown.clone();
            tokio::spawn(async move {
                struct Silent;
                impl CountdownObserver for Silent {}
                countdown.run(2, &Silent).await;
            })
        };

        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let state = *rx.borrow_and_update();
            seen.push(state);
            if state == CountdownState::Idle {
                break;
            }
        }
        runner.await.unwrap();

        assert_eq!(seen.first(), Some(&CountdownState::Counting(2)));
        assert_eq!(seen.last(), Some(&CountdownState::Idle));
    }
}
