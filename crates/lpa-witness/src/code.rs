//! # Witness Codes
//!
//! A [`WitnessCode`] is a value: once created it is never modified. The
//! list of codes sent to one witness during a signing ceremony is
//! append-only, so the most recent code is always last.

use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::WitnessError;

/// How long after creation a code may still be used.
pub const CODE_EXPIRY: StdDuration = StdDuration::from_secs(15 * 60);

/// How long after creation a code is still recognised at all. Older codes
/// are treated as not found rather than as expired.
pub const IGNORE_WINDOW: StdDuration = StdDuration::from_secs(2 * 60 * 60);

/// Minimum age of the most recent code before another may be sent.
pub const RESEND_INTERVAL: StdDuration = StdDuration::from_secs(60);

fn delta(d: StdDuration) -> Duration {
    Duration::seconds(d.as_secs() as i64)
}

/// A one-time code sent to a witness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WitnessCode {
    pub code: String,
    pub created: DateTime<Utc>,
}

impl WitnessCode {
    /// Whether the code is too old to be accepted at `now`.
    pub fn has_expired(&self, now: DateTime<Utc>) -> bool {
        self.created + delta(CODE_EXPIRY) < now
    }
}

/// Append-only list of codes sent to one witness.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WitnessCodes(Vec<WitnessCode>);

impl WitnessCodes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &WitnessCode> {
        self.0.iter()
    }

    /// The most recently issued code.
    pub fn last(&self) -> Option<&WitnessCode> {
        self.0.last()
    }

    /// Find the most recent code matching `code`.
    ///
    /// The most recent match decides: if it falls outside the ignore window
    /// the code is not found, even when an older duplicate exists.
    pub fn find(&self, code: &str, now: DateTime<Utc>) -> Option<&WitnessCode> {
        let found = self.0.iter().rev().find(|c| c.code == code)?;
        if found.created + delta(IGNORE_WINDOW) < now {
            return None;
        }
        Some(found)
    }

    /// Whether a new code may be sent at `now`.
    pub fn can_request(&self, now: DateTime<Utc>) -> bool {
        match self.0.last() {
            None => true,
            Some(last) => last.created + delta(RESEND_INTERVAL) < now,
        }
    }

    /// Record a newly generated code, refusing if the resend interval has
    /// not elapsed.
    pub fn issue(
        &mut self,
        code: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<WitnessCode, WitnessError> {
        if !self.can_request(now) {
            return Err(WitnessError::TooManyRequests);
        }

        let issued = WitnessCode {
            code: code.into(),
            created: now,
        };
        self.0.push(issued.clone());
        Ok(issued)
    }
}

impl From<Vec<WitnessCode>> for WitnessCodes {
    fn from(codes: Vec<WitnessCode>) -> Self {
        Self(codes)
    }
}
