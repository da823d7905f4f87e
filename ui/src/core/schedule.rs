//! Cancellable repeating tasks.
//!
//! The scan loop and the report refresh both run as repeating tasks with an
//! explicit start/stop lifecycle. [`RepeatingTask::spawn`] fires each tick as
//! its own future, so a slow tick may still be in flight when the next one
//! starts; ticks are independent and idempotent, so no mutual exclusion is
//! needed. [`RepeatingTask::spawn_with_backoff`] instead awaits each tick and
//! slows down while the backend is unreachable.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use super::{platform, timing};

pub struct RepeatingTask {
    cancelled: Rc<Cell<bool>>,
}

impl RepeatingTask {
    /// Runs `tick()` every `interval_ms` until cancelled. The first tick
    /// fires after one full interval.
    pub fn spawn<F, Fut>(interval_ms: u64, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = ()> + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let guard = Rc::clone(&cancelled);

        platform::spawn_future(async move {
            loop {
                timing::sleep_ms(interval_ms).await;
                // Checked after the sleep so cancel() during the wait wins
                // and nothing fires after teardown.
                if guard.get() {
                    break;
                }
                platform::spawn_future(tick());
            }
        });

        Self { cancelled }
    }

    /// Like [`RepeatingTask::spawn`], but each tick reports success and is
    /// awaited inline: consecutive failures stretch the interval (doubling,
    /// capped at `max_ms`) so a down backend is not hammered. One success
    /// resets the cadence.
    pub fn spawn_with_backoff<F, Fut>(interval_ms: u64, max_ms: u64, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + 'static,
        Fut: Future<Output = bool> + 'static,
    {
        let cancelled = Rc::new(Cell::new(false));
        let guard = Rc::clone(&cancelled);

        platform::spawn_future(async move {
            let mut failures: u32 = 0;
            loop {
                timing::sleep_ms(backoff_delay(interval_ms, max_ms, failures)).await;
                if guard.get() {
                    break;
                }
                if tick().await {
                    failures = 0;
                } else {
                    failures = failures.saturating_add(1);
                }
            }
        });

        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }
}

fn backoff_delay(base_ms: u64, max_ms: u64, consecutive_failures: u32) -> u64 {
    let shift = consecutive_failures.min(6);
    base_ms.saturating_mul(1u64 << shift).min(max_ms)
}

impl Drop for RepeatingTask {
    fn drop(&mut self) {
        self.cancel();
    }
}
