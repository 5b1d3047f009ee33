//! # lpa-cli — Command-Line Interface for LPA Applications
//!
//! Provides the `lpa` command over applications stored as JSON files in a
//! state directory. Every write goes through the guarded donor store, so
//! task states, change hashes and check-your-lpa reopening behave exactly as
//! they would behind the service.
//!
//! ## Subcommands
//!
//! - `lpa application` — Create, import, reconcile and inspect applications.
//! - `lpa journey` — Ask whether a page or URL is open to the donor.
//! - `lpa witness` — Issue and verify witness codes.
//!
//! ```bash
//! lpa application create --id lpa-1
//! lpa journey can-visit --id lpa-1 --page /check-your-lpa
//! lpa witness send --id lpa-1 --actor certificate-provider
//! ```

pub mod application;
pub mod config;
pub mod journey;
pub mod store;
pub mod witness;

/// State directory used when `--state-dir` is not given.
pub const DEFAULT_STATE_DIR: &str = ".lpa/applications";
