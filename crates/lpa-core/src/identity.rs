//! # Identifier Newtypes
//!
//! Newtype wrappers for the identifiers an application carries. These
//! prevent accidentally passing an application id where an actor uid is
//! expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a single actor (attorney, trust corporation, certificate
/// provider, person to notify, correspondent, voucher) within an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorUid(pub Uuid);

impl ActorUid {
    /// Generate a new random actor identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl ActorUid {
    /// The unassigned uid, carried by actors not yet saved.
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl Default for ActorUid {
    fn default() -> Self {
        Self::nil()
    }
}

impl std::fmt::Display for ActorUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Session-facing identifier of a draft application, used in page URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LpaId(pub String);

impl LpaId {
    /// Generate a new random application identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Access the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LpaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
