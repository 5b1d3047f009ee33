//! # Token-Bucket Limiter
//!
//! Guards witness-code verification attempts. The bucket holds fractional
//! tokens, refills continuously at `max_tokens / token_per` tokens per unit
//! of elapsed time, and never holds more than `max_tokens`.
//!
//! ## Concurrency
//!
//! Duplicate form submissions for the same application may call
//! [`Limiter::allow`] concurrently on one shared limiter. The bucket lives
//! behind a `parking_lot::Mutex` held for the whole refill-and-decide
//! sequence, so two callers can never both take the last token.
//!
//! ## Persistence
//!
//! The limiter is stored on the application record and takes part in the
//! primary change hash, so every consumed token is persisted. It serializes
//! through [`LimiterRecord`]; the mutex itself is never serialized.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// A token bucket.
#[derive(Debug, Serialize, Deserialize)]
#[serde(from = "LimiterRecord", into = "LimiterRecord")]
pub struct Limiter {
    token_per: Duration,
    max_tokens: f64,
    bucket: Mutex<Bucket>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bucket {
    tokens: f64,
    tokens_at: DateTime<Utc>,
}

/// Serialized form of a [`Limiter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimiterRecord {
    /// Refill period in milliseconds.
    pub token_per_ms: i64,
    pub max_tokens: f64,
    pub tokens: f64,
    pub tokens_at: DateTime<Utc>,
}

impl Limiter {
    /// Create a limiter holding `initial_tokens`, last refilled at `now`.
    pub fn new(token_per: Duration, initial_tokens: f64, max_tokens: f64, now: DateTime<Utc>) -> Self {
        Self {
            token_per,
            max_tokens,
            bucket: Mutex::new(Bucket {
                tokens: initial_tokens,
                tokens_at: now,
            }),
        }
    }

    /// Refill for the time elapsed since the last call, then take one token
    /// if at least one is available.
    pub fn allow(&self, now: DateTime<Utc>) -> bool {
        let mut bucket = self.bucket.lock();

        let elapsed = now - bucket.tokens_at;
        if elapsed > Duration::zero() {
            let refill = self.refill_for(elapsed);
            bucket.tokens = (bucket.tokens + refill).min(self.max_tokens);
            bucket.tokens_at = now;
        }

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Tokens currently held, without refilling.
    pub fn tokens(&self) -> f64 {
        self.bucket.lock().tokens
    }

    pub fn max_tokens(&self) -> f64 {
        self.max_tokens
    }

    pub fn token_per(&self) -> Duration {
        self.token_per
    }

    fn refill_for(&self, elapsed: Duration) -> f64 {
        let period_ms = self.token_per.num_milliseconds();
        if period_ms <= 0 {
            return 0.0;
        }
        self.max_tokens * elapsed.num_milliseconds() as f64 / period_ms as f64
    }

    fn record(&self) -> LimiterRecord {
        let bucket = *self.bucket.lock();
        LimiterRecord {
            token_per_ms: self.token_per.num_milliseconds(),
            max_tokens: self.max_tokens,
            tokens: bucket.tokens,
            tokens_at: bucket.tokens_at,
        }
    }
}

impl Clone for Limiter {
    fn clone(&self) -> Self {
        Self::from(self.record())
    }
}

impl PartialEq for Limiter {
    fn eq(&self, other: &Self) -> bool {
        self.record() == other.record()
    }
}

impl From<LimiterRecord> for Limiter {
    fn from(record: LimiterRecord) -> Self {
        Self {
            token_per: Duration::milliseconds(record.token_per_ms),
            max_tokens: record.max_tokens,
            bucket: Mutex::new(Bucket {
                tokens: record.tokens,
                tokens_at: record.tokens_at,
            }),
        }
    }
}

impl From<Limiter> for LimiterRecord {
    fn from(limiter: Limiter) -> Self {
        limiter.record()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn allow_at_fixed_instant_succeeds_exactly_max_times(max in 0u32..50, extra in 0usize..20) {
            let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
            let limiter = Limiter::new(Duration::minutes(1), max as f64, max as f64, now);
            let allowed = (0..max as usize + extra).filter(|_| limiter.allow(now)).count();
            prop_assert_eq!(allowed, max as usize);
        }
    }
}
