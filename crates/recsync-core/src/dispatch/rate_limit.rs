//! Token-bucket rate limiting for job admission
//!
//! The bucket refills continuously at the configured sustained rate and
//! holds at most `burst` tokens, so a quiet dispatcher can admit a short
//! back-to-back spike before settling to steady state.
//!
//! Copyright (c) 2025 Recsync Team
//! Licensed under the Apache-2.0 license

use std::sync::Mutex;
use std::time::{Duration, Instant};

use tokio::time::sleep;

/// Token bucket state
#[derive(Debug)]
struct TokenBucket {
    /// Current number of tokens
    tokens: f64,
    /// Maximum number of tokens (burst capacity)
    capacity: f64,
    /// Rate of token refill per second
    refill_rate: f64,
    /// Last refill time
    last_refill: Instant,
}

impl TokenBucket {
    /// Create a new, initially full token bucket
    fn new(capacity: u32, refill_rate: f64) -> Self {
        Self {
            tokens: capacity as f64,
            capacity: capacity as f64,
            refill_rate,
            last_refill: Instant::now(),
        }
    }

    /// Try to consume one token from the bucket
    fn try_consume(&mut self) -> bool {
        self.refill();

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Refill tokens based on elapsed time
    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        let new_tokens = elapsed * self.refill_rate;

        self.tokens = (self.tokens + new_tokens).min(self.capacity);
        self.last_refill = now;
    }

    /// Get time until the next token is available
    fn time_until_available(&mut self) -> Duration {
        self.refill();

        if self.tokens >= 1.0 {
            Duration::from_secs(0)
        } else {
            let tokens_needed = 1.0 - self.tokens;
            Duration::from_secs_f64(tokens_needed / self.refill_rate)
        }
    }
}

/// Rate limiter gating job admission.
///
/// State mutation is atomic under the mutex; acquisition is only ever
/// driven by the single admission loop, so there is no external
/// contention to arbitrate.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<TokenBucket>,
}

impl RateLimiter {
    /// Create a rate limiter granting `rate` tokens per second with a
    /// burst capacity of `burst`
    pub fn new(rate: f64, burst: u32) -> Self {
        Self {
            bucket: Mutex::new(TokenBucket::new(burst, rate)),
        }
    }

    /// Wait until one token is granted.
    ///
    /// Suspends (never spins) while the bucket is empty. Cancel-safe: a
    /// dropped `acquire` future has consumed a token only if it already
    /// completed.
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().unwrap();
                if bucket.try_consume() {
                    return;
                }
                bucket.time_until_available()
            };
            sleep(wait.max(Duration::from_millis(1))).await;
        }
    }

    /// Consume a token only if one is immediately available
    pub fn try_acquire(&self) -> bool {
        self.bucket.lock().unwrap().try_consume()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_starts_full() {
        let mut bucket = TokenBucket::new(3, 1.0);
        assert!(bucket.try_consume());
        assert!(bucket.try_consume());
        assert!(bucket.try_consume());
        assert!(!bucket.try_consume());
    }

    #[test]
    fn test_wait_time_bounded_by_refill_rate() {
        let mut bucket = TokenBucket::new(1, 2.0);
        assert!(bucket.try_consume());
        let wait = bucket.time_until_available();
        assert!(wait > Duration::from_secs(0));
        assert!(wait <= Duration::from_millis(500));
    }

    #[test]
    fn test_try_acquire_exhausts_burst() {
        let limiter = RateLimiter::new(1.0, 2);
        assert!(limiter.try_acquire());
        assert!(limiter.try_acquire());
        assert!(!limiter.try_acquire());
    }

    #[tokio::test]
    async fn test_acquire_waits_for_refill() {
        let limiter = RateLimiter::new(20.0, 1);
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        let elapsed = start.elapsed();

        // One token at 20/s refills in ~50ms.
        assert!(elapsed >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_burst_admits_back_to_back() {
        let limiter = RateLimiter::new(1.0, 5);
        let start = Instant::now();
        for _ in 0..5 {
            limiter.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
