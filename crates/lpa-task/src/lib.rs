//! # lpa-task — Section Completion States
//!
//! Each section of an application carries a cached completion state. Most
//! sections use the tri-state [`State`]; paying for the LPA and confirming
//! the donor's identity have richer lifecycles with waiting states of their
//! own ([`PaymentState`], [`IdentityState`]).
//!
//! States are values: they carry no transition rules. Which state a section
//! is in is derived from the application's data by `lpa-donor`, or recorded
//! by the surrounding service for caller-owned sections.

pub mod state;

pub use state::{IdentityState, PaymentState, State};
