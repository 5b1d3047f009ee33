//! # Attorneys and Decisions
//!
//! A group of attorneys is any number of individuals plus at most one trust
//! corporation. An application holds two groups, the original attorneys and
//! the replacement attorneys, each with its own [`AttorneyDecisions`].

use chrono::NaiveDate;
use lpa_core::{ActorUid, Address, AttorneysAct};
use serde::{Deserialize, Serialize};

/// An individual attorney.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attorney {
    pub uid: ActorUid,
    pub first_names: String,
    pub last_name: String,
    pub email: String,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Address,
    pub mobile: String,
}

impl Attorney {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_name)
    }

    /// Name and first address line entered.
    pub fn is_complete(&self) -> bool {
        !self.first_names.is_empty() && self.address.has_line1()
    }
}

/// A trust corporation acting as attorney.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustCorporation {
    pub uid: ActorUid,
    pub name: String,
    pub company_number: String,
    pub email: String,
    pub address: Address,
}

impl TrustCorporation {
    /// A trust corporation exists once it has been named.
    pub fn is_present(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.is_present() && self.address.has_line1()
    }
}

/// A group of attorneys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attorneys {
    pub trust_corporation: TrustCorporation,
    pub attorneys: Vec<Attorney>,
}

impl Attorneys {
    /// Number of attorneys, counting a named trust corporation as one.
    pub fn len(&self) -> usize {
        usize::from(self.trust_corporation.is_present()) + self.attorneys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every attorney, and the trust corporation if named, has a first
    /// address line; every individual also has first names.
    pub fn complete(&self) -> bool {
        if self.trust_corporation.is_present() && !self.trust_corporation.address.has_line1() {
            return false;
        }
        self.attorneys.iter().all(Attorney::is_complete)
    }

    pub fn get(&self, uid: ActorUid) -> Option<&Attorney> {
        self.attorneys.iter().find(|a| a.uid == uid)
    }

    /// Insert or replace the attorney with the same uid.
    pub fn put(&mut self, attorney: Attorney) {
        match self.attorneys.iter_mut().find(|a| a.uid == attorney.uid) {
            Some(existing) => *existing = attorney,
            None => self.attorneys.push(attorney),
        }
    }

    /// Remove the attorney with `uid`, returning whether one was removed.
    pub fn delete(&mut self, uid: ActorUid) -> bool {
        let before = self.attorneys.len();
        self.attorneys.retain(|a| a.uid != uid);
        self.attorneys.len() != before
    }

    /// Full names of individuals, then the trust corporation's name.
    pub fn full_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.attorneys.iter().map(Attorney::full_name).collect();
        if self.trust_corporation.is_present() {
            names.push(self.trust_corporation.name.clone());
        }
        names
    }

    /// Addresses of individuals, then the trust corporation's address.
    pub fn addresses(&self) -> Vec<&Address> {
        let mut addresses: Vec<&Address> = self.attorneys.iter().map(|a| &a.address).collect();
        if self.trust_corporation.is_present() {
            addresses.push(&self.trust_corporation.address);
        }
        addresses
    }
}

/// How a group of attorneys must act.
///
/// `details` is only meaningful for
/// [`AttorneysAct::JointlyForSomeSeverallyForOthers`] and is cleared for any
/// other mode by `Provided::update_decisions`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttorneyDecisions {
    pub how: Option<AttorneysAct>,
    pub details: String,
}

impl AttorneyDecisions {
    pub fn new(how: AttorneysAct, details: impl Into<String>) -> Self {
        let details = if how == AttorneysAct::JointlyForSomeSeverallyForOthers {
            details.into()
        } else {
            String::new()
        };
        Self {
            how: Some(how),
            details,
        }
    }

    /// A decision mode has been chosen.
    pub fn is_complete(&self) -> bool {
        self.how.is_some()
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    pub fn is_jointly(&self) -> bool {
        self.how == Some(AttorneysAct::Jointly)
    }

    pub fn is_jointly_and_severally(&self) -> bool {
        self.how == Some(AttorneysAct::JointlyAndSeverally)
    }

    pub fn is_jointly_for_some_severally_for_others(&self) -> bool {
        self.how == Some(AttorneysAct::JointlyForSomeSeverallyForOthers)
    }
}
