//! Per-source sliding-window rate limiting.
//!
//! Each collector owns one [`RateLimit`] configured for its source's
//! published courtesy limits; there is no process-wide limiter state. A
//! call to [`RateLimit::acquire`] suspends the task until issuing one more
//! request would keep the recent-call count within the window.
//!
//! # Examples
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use collabnet::limiter::RateLimit;
//!
//! # async fn example() {
//! // arXiv asks for at most one call every three seconds.
//! let limiter = RateLimit::new(1, Duration::from_secs(3));
//! limiter.acquire().await;
//! // ... issue the request ...
//! # }
//! ```

use std::{collections::VecDeque, sync::Mutex, time::Duration};

use tokio::time::{sleep, Instant};

/// Sliding-window rate limiter for a single external source.
///
/// Tracks the instants of the most recent calls and blocks new calls while
/// `max_calls` have already been issued within the trailing `period`. The
/// limiter is owned by a collector instance and shared across that
/// collector's calls only; honoring a source's limit globally means sharing
/// one limiter (or one collector) per source.
#[derive(Debug)]
pub struct RateLimit {
  /// Maximum number of calls permitted within one period
  max_calls: usize,
  /// Length of the sliding window
  period:    Duration,
  /// Issue instants of the calls still inside the window
  window:    Mutex<VecDeque<Instant>>,
}

impl RateLimit {
  /// Creates a limiter permitting `max_calls` per `period`.
  pub fn new(max_calls: usize, period: Duration) -> Self {
    Self { max_calls, period, window: Mutex::new(VecDeque::new()) }
  }

  /// Waits until a call slot is available, then claims it.
  ///
  /// Returns once the caller may issue its request immediately. Expired
  /// entries are evicted from the window on every attempt, so a limiter
  /// that has been idle longer than its period never blocks.
  pub async fn acquire(&self) {
    loop {
      let wait = {
        let mut window = self.window.lock().expect("rate limit window poisoned");
        let now = Instant::now();
        while window.front().is_some_and(|&issued| issued + self.period <= now) {
          window.pop_front();
        }
        if window.len() < self.max_calls {
          window.push_back(now);
          return;
        }
        // Window is full; sleep until the oldest call ages out.
        *window.front().expect("window cannot be empty here") + self.period - now
      };
      sleep(wait).await;
    }
  }
}
