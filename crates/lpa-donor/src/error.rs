//! # Error Types
//!
//! One enum per concern. Collaborator failures arrive as plain messages
//! from the `DataClient`/`EventClient`/`SmsClient` seams and are wrapped
//! here with enough context to log.

use lpa_core::CanonicalizationError;
use thiserror::Error;

use crate::hash::HashScope;

/// Failure computing a change hash.
#[derive(Error, Debug)]
pub enum HashError {
    /// The record was hashed by a newer release than this one.
    #[error("{scope} hash version {stored} is newer than supported version {current}")]
    VersionTooHigh {
        scope: HashScope,
        stored: u8,
        current: u8,
    },

    #[error("canonicalization failed: {0}")]
    Canonicalization(#[from] CanonicalizationError),
}

/// Failure writing an application through the guarded store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("hash: {0}")]
    Hash(#[from] HashError),

    #[error("data client put failed for {lpa_id}: {message}")]
    Data { lpa_id: String, message: String },

    #[error("application-updated event failed for {lpa_uid}: {message}")]
    Event { lpa_uid: String, message: String },

    /// The donor changed checked content after signing.
    #[error("donor tried to change signed application {lpa_id}")]
    SignedLpaChanged { lpa_id: String },
}

/// Failure issuing a witness code.
#[derive(Error, Debug)]
pub enum WitnessCodeError {
    /// A code was sent too recently. Expected in normal use.
    #[error("a witness code was requested too recently")]
    TooManyRequests,

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("sms to {mobile} failed: {message}")]
    Sms { mobile: String, message: String },
}

impl From<lpa_witness::WitnessError> for WitnessCodeError {
    fn from(err: lpa_witness::WitnessError) -> Self {
        match err {
            lpa_witness::WitnessError::TooManyRequests => Self::TooManyRequests,
        }
    }
}

impl WitnessCodeError {
    /// Whether this is the expected resend refusal rather than a fault.
    pub fn is_too_many_requests(&self) -> bool {
        matches!(self, Self::TooManyRequests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_too_high_display() {
        let err = HashError::VersionTooHigh {
            scope: HashScope::Checked,
            stored: 3,
            current: 0,
        };
        assert_eq!(
            err.to_string(),
            "checked hash version 3 is newer than supported version 0"
        );
    }

    #[test]
    fn test_store_error_wraps_hash_error() {
        let err: StoreError = HashError::VersionTooHigh {
            scope: HashScope::Main,
            stored: 1,
            current: 0,
        }
        .into();
        assert!(matches!(err, StoreError::Hash(_)));
        assert!(err.to_string().starts_with("hash: main hash version 1"));
    }

    #[test]
    fn test_witness_error_converts() {
        let err: WitnessCodeError = lpa_witness::WitnessError::TooManyRequests.into();
        assert!(err.is_too_many_requests());

        let err = WitnessCodeError::Sms {
            mobile: "07700900000".into(),
            message: "gateway down".into(),
        };
        assert!(!err.is_too_many_requests());
    }
}
