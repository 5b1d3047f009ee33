//! # Witness Code Errors

use thiserror::Error;

/// Error issuing a witness code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitnessError {
    /// The most recent code was sent less than the resend interval ago.
    ///
    /// Expected during normal use; callers show a wait-and-retry message
    /// rather than treating it as a failure.
    #[error("too many witness code requests; wait before requesting another code")]
    TooManyRequests,
}
