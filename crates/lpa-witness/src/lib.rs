//! # lpa-witness — Witness Codes for the Signing Ceremony
//!
//! When a donor signs, a certificate provider (and, for a donor who cannot
//! sign, an independent witness) confirms their presence by reading back a
//! short code sent to their phone.
//!
//! ## Rules
//!
//! - A code expires 15 minutes after it was created.
//! - A code created more than 2 hours ago is ignored entirely, as if it had
//!   never been sent.
//! - A new code may be requested only once the most recent one is more than
//!   a minute old.
//! - Verification attempts are rate-limited by a token-bucket [`Limiter`]
//!   stored on the application record.
//!
//! ## Crate Policy
//!
//! - Every time-dependent operation takes `now` explicitly; nothing here
//!   reads the system clock.
//! - Code generation is driven by [`WitnessCodeConfig`], never a global flag.

pub mod code;
pub mod config;
pub mod error;
pub mod limiter;

pub use code::{WitnessCode, WitnessCodes, CODE_EXPIRY, IGNORE_WINDOW, RESEND_INTERVAL};
pub use config::{ConfigError, WitnessCodeConfig};
pub use error::WitnessError;
pub use limiter::Limiter;
