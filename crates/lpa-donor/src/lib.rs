//! # lpa-donor — The Donor's Application
//!
//! [`Provided`] holds everything the donor enters and everything the
//! service records about their application. This crate keeps it
//! internally consistent and decides when it needs writing.
//!
//! ## Components
//!
//! - **Decision normalisation** (`Provided::update_decisions`): clears
//!   decision answers made meaningless by the current attorney counts.
//!
//! - **Task states** (`task_state.rs`): pure derivation of each section's
//!   completion state from its data.
//!
//! - **Change hashes** (`hash.rs`): versioned 64-bit hashes over scoped
//!   canonical JSON, deciding whether a write is needed and whether the
//!   donor's check-your-lpa confirmation is still current.
//!
//! - **Guarded store** (`store.rs`): the single write path, with its
//!   persistence, event and search collaborators.
//!
//! - **Witness codes** (`witness_code_sender.rs`): issuing, sending and
//!   verifying the codes witnesses give the donor at signing.
//!
//! ## Data Flow
//!
//! ```text
//! mutate ──▶ reconcile() ──▶ DonorStore::put ──▶ hash_changed? ──▶ DataClient::put
//!             │                                    │
//!             ├ update_decisions()                 └ checked_hash_changed? ──▶ reopen check-your-lpa
//!             └ refresh_tasks()
//! ```
//!
//! ## Crate Policy
//!
//! - Derivations and guards are total; only hashing and collaborators fail.
//! - No `.unwrap()` outside tests.

pub mod actors;
pub mod attorneys;
pub mod error;
pub mod hash;
pub mod payment;
pub mod provided;
pub mod store;
pub mod task_state;
pub mod tasks;
pub mod witness_code_sender;

pub use actors::{
    AuthorisedSignatory, CertificateProvider, Correspondent, Donor, IdentityUserData,
    IndependentWitness, PersonToNotify, Voucher,
};
pub use attorneys::{Attorney, AttorneyDecisions, Attorneys, TrustCorporation};
pub use error::{HashError, StoreError, WitnessCodeError};
pub use hash::{
    HashScope, CURRENT_CERTIFICATE_PROVIDER_NOT_RELATED_CONFIRMED_HASH_VERSION,
    CURRENT_CHECKED_HASH_VERSION, CURRENT_HASH_VERSION,
};
pub use payment::{EvidenceDelivery, FeeType, PaymentDetail};
pub use provided::Provided;
pub use store::{
    DataClient, DonorStore, EventClient, InMemoryDataClient, RecordingEventClient,
    RecordingSearchClient, SearchClient,
};
pub use tasks::Tasks;
pub use witness_code_sender::{
    verify_witness_code, RecordingSmsClient, SmsClient, WitnessActor, WitnessCodeSender,
    WitnessCodeVerification,
};
