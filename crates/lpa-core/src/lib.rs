//! # lpa-core — Foundational Types for the LPA Workflow Engine
//!
//! Every other crate in the workspace depends on `lpa-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **`CanonicalBytes` newtype.** All change-hash computation flows through
//!    `CanonicalBytes::new()` or `CanonicalBytes::scoped()`. No raw
//!    `serde_json::to_vec()` for hashes.
//!
//! 2. **`structural_hash()` accepts only `&CanonicalBytes`.** Compile-time
//!    enforcement that stored hashes come from canonical serialization.
//!
//! 3. **Closed vocabularies.** Decision modes, step-in conditions and answers
//!    are exhaustive enums; an unanswered question is `None`, never a
//!    sentinel string.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `lpa-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod canonical;
pub mod digest;
pub mod domain;
pub mod error;
pub mod identity;
pub mod place;

// Re-export primary types for ergonomic imports.
pub use canonical::{CanonicalBytes, FieldScope};
pub use digest::{hash_hex, sha256_digest, structural_hash};
pub use domain::{
    AttorneysAct, CanBeUsedWhen, Channel, IdentityStatus, LifeSustainingTreatment, LpaType,
    Relationship, RelationshipLength, ReplacementAttorneysStepIn, YesNo,
};
pub use error::{CanonicalizationError, LpaError};
pub use identity::{ActorUid, LpaId};
pub use place::Address;
