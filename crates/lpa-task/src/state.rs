//! # Task States
//!
//! String forms are stored inside hashed application records.

use std::str::FromStr;

use lpa_core::LpaError;
use serde::{Deserialize, Serialize};

// ─── Tri-state ──────────────────────────────────────────────────────

/// Completion state of an ordinary section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum State {
    /// Nothing has been entered.
    #[default]
    NotStarted,
    /// Something has been entered but the section is not finished.
    InProgress,
    /// The section is finished.
    Completed,
}

impl State {
    /// Returns the string identifier for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn is_not_started(&self) -> bool {
        *self == Self::NotStarted
    }

    pub fn is_in_progress(&self) -> bool {
        *self == Self::InProgress
    }

    pub fn is_completed(&self) -> bool {
        *self == Self::Completed
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for State {
    type Err = LpaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(LpaError::Parse {
                kind: "task state",
                value: other.to_string(),
            }),
        }
    }
}

// ─── Payment ────────────────────────────────────────────────────────

/// State of the pay-for-the-LPA section.
///
/// `Pending` covers fee-reduction applications awaiting a caseworker
/// decision; the donor may carry on to identity and signing while pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentState {
    #[default]
    NotStarted,
    InProgress,
    /// Evidence for a reduced fee has been sent and is awaiting a decision.
    Pending,
    /// A reduced fee was approved; any balance may still be outstanding.
    Approved,
    /// A reduced fee was refused.
    Denied,
    /// A caseworker asked for more evidence.
    MoreEvidenceRequired,
    /// Nothing more is owed.
    Completed,
}

impl PaymentState {
    /// Returns the string identifier for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::MoreEvidenceRequired => "more-evidence-required",
            Self::Completed => "completed",
        }
    }

    pub fn is_not_started(&self) -> bool {
        *self == Self::NotStarted
    }

    pub fn is_in_progress(&self) -> bool {
        *self == Self::InProgress
    }

    pub fn is_pending(&self) -> bool {
        *self == Self::Pending
    }

    pub fn is_approved(&self) -> bool {
        *self == Self::Approved
    }

    pub fn is_denied(&self) -> bool {
        *self == Self::Denied
    }

    pub fn is_more_evidence_required(&self) -> bool {
        *self == Self::MoreEvidenceRequired
    }

    pub fn is_completed(&self) -> bool {
        *self == Self::Completed
    }

    /// Whether the donor may proceed past payment: paid, or awaiting a
    /// fee-reduction decision.
    pub fn allows_progress(&self) -> bool {
        self.is_completed() || self.is_pending()
    }
}

impl std::fmt::Display for PaymentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Identity ───────────────────────────────────────────────────────

/// State of the confirm-your-identity section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentityState {
    #[default]
    NotStarted,
    InProgress,
    /// Awaiting a result from the identity provider or a vouch.
    Pending,
    /// The check returned details that do not match the application.
    Problem,
    Completed,
}

impl IdentityState {
    /// Returns the string identifier for this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Pending => "pending",
            Self::Problem => "problem",
            Self::Completed => "completed",
        }
    }

    pub fn is_not_started(&self) -> bool {
        *self == Self::NotStarted
    }

    pub fn is_in_progress(&self) -> bool {
        *self == Self::InProgress
    }

    pub fn is_pending(&self) -> bool {
        *self == Self::Pending
    }

    pub fn is_problem(&self) -> bool {
        *self == Self::Problem
    }

    pub fn is_completed(&self) -> bool {
        *self == Self::Completed
    }
}

impl std::fmt::Display for IdentityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
