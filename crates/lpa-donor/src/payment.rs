//! # Fees and Payments
//!
//! Bookkeeping recorded while the donor pays. None of it is substantive
//! application content, so all of it is outside the checked hash.

use serde::{Deserialize, Serialize};

/// Which fee the donor is paying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeeType {
    FullFee,
    HalfFee,
    NoFee,
    HardshipFee,
    RepeatApplicationFee,
}

impl FeeType {
    /// Whether the fee needs evidence and a caseworker decision.
    pub fn is_reduced(&self) -> bool {
        !matches!(self, Self::FullFee)
    }
}

/// How evidence for a reduced fee is being sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvidenceDelivery {
    Upload,
    Post,
}

/// A completed card payment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentDetail {
    pub payment_reference: String,
    pub payment_id: String,
    /// Amount in pence.
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduced_fees() {
        assert!(!FeeType::FullFee.is_reduced());
        assert!(FeeType::HalfFee.is_reduced());
        assert!(FeeType::RepeatApplicationFee.is_reduced());
    }

    #[test]
    fn test_fee_type_serde() {
        assert_eq!(serde_json::to_string(&FeeType::NoFee).unwrap(), "\"no-fee\"");
    }
}
