//! Client-side rate limiting for chat messages.
//!
//! A sliding log: every accepted send is timestamped, and anything at or before
//! `now - window` is pruned before counting. Counting is exact; volumes are a
//! handful of messages per minute so the log never grows past `limit`.

use std::collections::VecDeque;

pub const DEFAULT_CHAT_LIMIT: usize = 10;
pub const DEFAULT_CHAT_WINDOW_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("rate limit exceeded (max {limit} messages/{window_secs}s)")]
pub struct RateLimitExceeded {
    pub limit: usize,
    pub window_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SlidingWindowLimiter {
    limit: usize,
    window_ms: u64,
    /// Accepted send times in milliseconds, oldest first.
    sends: VecDeque<u64>,
}

impl SlidingWindowLimiter {
    #[must_use]
    pub fn new(limit: usize, window_ms: u64) -> Self {
        Self {
            limit,
            window_ms,
            sends: VecDeque::with_capacity(limit),
        }
    }

    /// Records a send at `now_ms` if fewer than `limit` sends remain in the window.
    pub fn try_consume(&mut self, now_ms: u64) -> Result<(), RateLimitExceeded> {
        self.prune(now_ms);
        if self.sends.len() >= self.limit {
            return Err(RateLimitExceeded {
                limit: self.limit,
                window_secs: self.window_ms / 1000,
            });
        }
        self.sends.push_back(now_ms);
        Ok(())
    }

    /// Sends still available at `now_ms`. Does not record anything.
    pub fn remaining(&self, now_ms: u64) -> usize {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        let live = self.sends.iter().filter(|&&t| t > cutoff).count();
        self.limit.saturating_sub(live)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn prune(&mut self, now_ms: u64) {
        let cutoff = now_ms.saturating_sub(self.window_ms);
        while let Some(&front) = self.sends.front() {
            if front <= cutoff {
                self.sends.pop_front();
            } else {
                break;
            }
        }
    }
}

impl Default for SlidingWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CHAT_LIMIT, DEFAULT_CHAT_WINDOW_MS)
    }
}
