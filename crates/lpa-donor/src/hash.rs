//! # Versioned Change Hashes
//!
//! Three 64-bit hashes are kept on [`Provided`]:
//!
//! - **main**: over everything except persistence bookkeeping. A write
//!   happens only when it differs from the stored value.
//! - **checked**: over the donor-authored content of the application. It is
//!   stored when the donor confirms the application on check-your-lpa and a
//!   later difference means the confirmation is stale.
//! - **certificate-provider-not-related**: over the people whose names and
//!   addresses are compared when the donor confirms their certificate
//!   provider is not a relative.
//!
//! ## Versioning
//!
//! Each hash is stored with the version of the field set it was computed
//! over. Generation always uses the stored version's field set, so records
//! written by an older release keep comparing equal until they are updated.
//! A stored version newer than this release knows is an error.
//!
//! Adding a field to [`Provided`] that must not take part in a hash means
//! adding it to the current exclusion list and bumping the version.

use std::fmt;

use lpa_core::{structural_hash, CanonicalBytes, FieldScope};

use crate::error::HashError;
use crate::provided::Provided;

pub const CURRENT_HASH_VERSION: u8 = 0;
pub const CURRENT_CHECKED_HASH_VERSION: u8 = 0;
pub const CURRENT_CERTIFICATE_PROVIDER_NOT_RELATED_CONFIRMED_HASH_VERSION: u8 = 0;

const MAIN_EXCLUDED_V0: &[&str] = &[
    "pk",
    "sk",
    "hash",
    "hash_version",
    "updated_at",
    "checked_hash",
    "checked_hash_version",
    "version",
    "has_sent_application_updated_event",
];

const CHECKED_EXCLUDED_V0: &[&str] = &[
    "pk",
    "sk",
    "hash",
    "hash_version",
    "updated_at",
    "checked_hash",
    "checked_hash_version",
    "version",
    "has_sent_application_updated_event",
    "created_at",
    "tasks",
    "payment_details",
    "identity_user_data",
    "want_to_apply_for_lpa",
    "want_to_sign_lpa",
    "certificate_provider_not_related_confirmed_at",
    "certificate_provider_not_related_confirmed_hash",
    "certificate_provider_not_related_confirmed_hash_version",
    "checked_at",
    "signed_at",
    "withdrawn_at",
    "statutory_waiting_period_at",
    "do_not_register_at",
    "registering_with_court_of_protection",
    "continue_with_mismatched_identity",
    "want_voucher",
    "voucher",
    "vouch_attempts",
    "failed_voucher",
    "certificate_provider_codes",
    "witnessed_by_certificate_provider_at",
    "independent_witness_codes",
    "witnessed_by_independent_witness_at",
    "witness_code_limiter",
    "fee_type",
    "evidence_delivery",
    "previous_application_number",
    "previous_fee",
    "cost_of_repeat_application",
    "certificate_provider_invited_at",
    "attorneys_invited_at",
    "voucher_invited_at",
    "details_verified_by_voucher",
    "more_evidence_required_at",
    "priority_correspondence_sent_at",
    "material_change_confirmed_at",
    "immaterial_change_confirmed_at",
    "has_seen_successful_vouch_banner",
    "has_seen_reduced_fee_approval_notification",
    "has_seen_identity_mismatch_resolved_notification",
    "has_seen_certificate_provider_identity_mismatch_resolved_notification",
    "reduced_fee_approved_at",
    "identity_details_caused_check",
];

const CERTIFICATE_PROVIDER_NOT_RELATED_INCLUDED_V0: &[&str] = &[
    "certificate_provider",
    "donor",
    "attorneys",
    "replacement_attorneys",
];

/// Which of the three change hashes is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScope {
    Main,
    Checked,
    CertificateProviderNotRelated,
}

impl HashScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Checked => "checked",
            Self::CertificateProviderNotRelated => "certificate-provider-not-related",
        }
    }

    /// The version new hashes of this scope are written at.
    pub fn current_version(&self) -> u8 {
        match self {
            Self::Main => CURRENT_HASH_VERSION,
            Self::Checked => CURRENT_CHECKED_HASH_VERSION,
            Self::CertificateProviderNotRelated => {
                CURRENT_CERTIFICATE_PROVIDER_NOT_RELATED_CONFIRMED_HASH_VERSION
            }
        }
    }

    /// The field set a hash of this scope at `version` is computed over.
    pub fn field_scope(&self, version: u8) -> Result<FieldScope, HashError> {
        match (self, version) {
            (Self::Main, 0) => Ok(FieldScope::Exclude(MAIN_EXCLUDED_V0)),
            (Self::Checked, 0) => Ok(FieldScope::Exclude(CHECKED_EXCLUDED_V0)),
            (Self::CertificateProviderNotRelated, 0) => {
                Ok(FieldScope::Include(CERTIFICATE_PROVIDER_NOT_RELATED_INCLUDED_V0))
            }
            (scope, stored) => Err(HashError::VersionTooHigh {
                scope: *scope,
                stored,
                current: scope.current_version(),
            }),
        }
    }
}

impl fmt::Display for HashScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Provided {
    fn generate(&self, scope: HashScope, version: u8) -> Result<u64, HashError> {
        let field_scope = scope.field_scope(version)?;
        let bytes = CanonicalBytes::scoped(self, field_scope)?;
        Ok(structural_hash(&bytes))
    }

    /// Main hash at the stored `hash_version`.
    pub fn generate_hash(&self) -> Result<u64, HashError> {
        self.generate(HashScope::Main, self.hash_version)
    }

    /// Whether anything hashed has changed since the last [`Provided::update_hash`].
    /// A record that cannot be hashed is reported as unchanged.
    pub fn hash_changed(&self) -> bool {
        match self.generate_hash() {
            Ok(hash) => hash != self.hash,
            Err(err) => {
                tracing::debug!(lpa_id = %self.lpa_id, scope = "main", error = %err, "hash not generated");
                false
            }
        }
    }

    /// Store the main hash at the current version.
    pub fn update_hash(&mut self) -> Result<(), HashError> {
        self.hash_version = CURRENT_HASH_VERSION;
        self.hash = self.generate_hash()?;
        Ok(())
    }

    /// Checked hash at the stored `checked_hash_version`.
    pub fn generate_checked_hash(&self) -> Result<u64, HashError> {
        self.generate(HashScope::Checked, self.checked_hash_version)
    }

    /// Whether donor-authored content has changed since the last
    /// [`Provided::update_checked_hash`]. A record that cannot be hashed is
    /// reported as unchanged.
    pub fn checked_hash_changed(&self) -> bool {
        match self.generate_checked_hash() {
            Ok(hash) => hash != self.checked_hash,
            Err(err) => {
                tracing::debug!(lpa_id = %self.lpa_id, scope = "checked", error = %err, "hash not generated");
                false
            }
        }
    }

    /// Store the checked hash at the current version.
    pub fn update_checked_hash(&mut self) -> Result<(), HashError> {
        self.checked_hash_version = CURRENT_CHECKED_HASH_VERSION;
        self.checked_hash = self.generate_checked_hash()?;
        Ok(())
    }

    pub fn generate_certificate_provider_not_related_confirmed_hash(&self) -> Result<u64, HashError> {
        self.generate(
            HashScope::CertificateProviderNotRelated,
            self.certificate_provider_not_related_confirmed_hash_version,
        )
    }

    /// Whether the compared people have changed since the donor last
    /// confirmed their certificate provider is not related to them.
    pub fn certificate_provider_not_related_confirmed_hash_changed(&self) -> bool {
        match self.generate_certificate_provider_not_related_confirmed_hash() {
            Ok(hash) => hash != self.certificate_provider_not_related_confirmed_hash,
            Err(err) => {
                tracing::debug!(
                    lpa_id = %self.lpa_id,
                    scope = "certificate-provider-not-related",
                    error = %err,
                    "hash not generated"
                );
                false
            }
        }
    }

    pub fn update_certificate_provider_not_related_confirmed_hash(&mut self) -> Result<(), HashError> {
        self.certificate_provider_not_related_confirmed_hash_version =
            CURRENT_CERTIFICATE_PROVIDER_NOT_RELATED_CONFIRMED_HASH_VERSION;
        self.certificate_provider_not_related_confirmed_hash =
            self.generate_certificate_provider_not_related_confirmed_hash()?;
        Ok(())
    }
}
