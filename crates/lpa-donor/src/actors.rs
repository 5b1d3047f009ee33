//! # Actors
//!
//! Everyone other than the attorneys who takes part in an application:
//! the donor, the certificate provider, an optional correspondent, people
//! to notify, a voucher, and the people who sign or witness on the donor's
//! behalf.

use chrono::{DateTime, NaiveDate, Utc};
use lpa_core::{
    ActorUid, Address, Channel, IdentityStatus, Relationship, RelationshipLength, YesNo,
};
use serde::{Deserialize, Serialize};

/// The person making the LPA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Donor {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub other_names: String,
    pub date_of_birth: Option<NaiveDate>,
    pub email: String,
    pub address: Address,
    pub mobile: String,
    /// Whether the donor can sign the LPA themselves.
    pub can_sign: Option<YesNo>,
}

impl Donor {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_name)
    }
}

/// The person certifying that the donor understands the LPA.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CertificateProvider {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub email: String,
    pub address: Address,
    pub mobile: String,
    pub carry_out_by: Option<Channel>,
    pub relationship: Option<Relationship>,
    pub relationship_length: Option<RelationshipLength>,
}

impl CertificateProvider {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_name)
    }
}

/// Someone who receives correspondence about the LPA instead of the donor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Correspondent {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub email: String,
    pub organisation: String,
    pub telephone: String,
    /// Whether correspondence should also be posted.
    pub want_address: Option<YesNo>,
    pub address: Address,
}

/// Someone told when the LPA is registered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonToNotify {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub address: Address,
}

impl PersonToNotify {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_name)
    }
}

/// Someone who confirms the donor's identity when the donor cannot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Voucher {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub email: String,
    /// Set once the voucher has been checked as eligible.
    pub allowed: bool,
}

impl Voucher {
    /// A voucher has been nominated once named.
    pub fn is_nominated(&self) -> bool {
        !self.first_names.is_empty()
    }
}

/// Signs on the donor's behalf when the donor cannot sign.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorisedSignatory {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
}

/// Witnesses an authorised signatory signing on the donor's behalf.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndependentWitness {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub mobile: String,
    pub address: Address,
}

/// Result of the donor's identity check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityUserData {
    pub status: IdentityStatus,
    pub first_names: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub checked_at: Option<DateTime<Utc>>,
}

impl IdentityUserData {
    pub fn is_confirmed(&self) -> bool {
        self.status == IdentityStatus::Confirmed
    }

    /// Whether the checked name matches, ignoring case and surrounding space.
    pub fn matches_name(&self, first_names: &str, last_name: &str) -> bool {
        eq_loose(&self.first_names, first_names) && eq_loose(&self.last_name, last_name)
    }
}

fn eq_loose(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voucher_nominated_by_name() {
        assert!(!Voucher::default().is_nominated());
        let voucher = Voucher {
            first_names: "Vivian".into(),
            ..Default::default()
        };
        assert!(voucher.is_nominated());
    }

    #[test]
    fn test_identity_name_match_is_loose() {
        let data = IdentityUserData {
            status: IdentityStatus::Confirmed,
            first_names: "Sam ".into(),
            last_name: "SMITH".into(),
            ..Default::default()
        };
        assert!(data.is_confirmed());
        assert!(data.matches_name("sam", "Smith"));
        assert!(!data.matches_name("Samuel", "Smith"));
    }

    #[test]
    fn test_identity_defaults_unknown() {
        assert_eq!(IdentityUserData::default().status, IdentityStatus::Unknown);
    }

    #[test]
    fn test_full_names() {
        let donor = Donor {
            first_names: "Sam".into(),
            last_name: "Smith".into(),
            ..Default::default()
        };
        assert_eq!(donor.full_name(), "Sam Smith");
    }
}
