//! # Postal Address
//!
//! The postal address shape shared by every actor. Section completeness
//! rules only ever ask whether the first address line is present; an email
//! address on its own never completes an actor.

use serde::{Deserialize, Serialize};

/// A UK or international postal address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub line3: String,
    pub town_or_city: String,
    pub postcode: String,
    pub country: String,
}

impl Address {
    /// Whether the authoritative first line has been entered.
    pub fn has_line1(&self) -> bool {
        !self.line1.is_empty()
    }

    /// Whether no field has been entered.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Non-empty lines joined with ", " for display.
    pub fn to_single_line(&self) -> String {
        [
            &self.line1,
            &self.line2,
            &self.line3,
            &self.town_or_city,
            &self.postcode,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}
