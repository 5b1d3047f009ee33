//! # Domain Vocabulary — Decision Modes and Answers
//!
//! Closed vocabularies used throughout an application: the type of LPA, how
//! attorneys act, when replacement attorneys step in, how a certificate
//! provider knows the donor, and the yes/no answers that gate optional
//! sections.
//!
//! Every enum here has a single string form used for serde, `Display`, and
//! `FromStr`. The string forms are stored inside hashed records, so changing
//! one changes every stored hash.
//!
//! Unanswered questions are modelled as `Option<T>::None` on the owning
//! record rather than as an extra "unset" variant.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LpaError;

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $s:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $s)] $variant ),+
        }

        impl $name {
            /// Every variant in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            /// Returns the string identifier for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $s ),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = LpaError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $s => Ok(Self::$variant), )+
                    other => Err(LpaError::Parse {
                        kind: $kind,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

vocabulary! {
    /// The two kinds of lasting power of attorney.
    LpaType, "lpa type" {
        /// Property and financial affairs.
        PropertyAndAffairs => "property-and-affairs",
        /// Health and personal welfare.
        PersonalWelfare => "personal-welfare",
    }
}

vocabulary! {
    /// When a property-and-affairs LPA may be used.
    CanBeUsedWhen, "can be used when" {
        /// As soon as it is registered, while the donor still has capacity.
        HasCapacity => "when-has-capacity",
        /// Only once the donor has lost capacity.
        CapacityLost => "when-capacity-lost",
    }
}

vocabulary! {
    /// Whether attorneys of a personal-welfare LPA may decide on life-sustaining treatment.
    LifeSustainingTreatment, "life sustaining treatment option" {
        /// Attorneys may give or refuse consent.
        OptionA => "option-a",
        /// Attorneys may not give or refuse consent.
        OptionB => "option-b",
    }
}

vocabulary! {
    /// How two or more attorneys must act together.
    AttorneysAct, "attorneys act" {
        /// Every decision is taken by all attorneys together.
        Jointly => "jointly",
        /// Any attorney may act alone or together with others.
        JointlyAndSeverally => "jointly-and-severally",
        /// Some decisions jointly, others severally, described in free text.
        JointlyForSomeSeverallyForOthers => "jointly-for-some-severally-for-others",
    }
}

vocabulary! {
    /// When replacement attorneys take over from attorneys acting jointly and severally.
    ReplacementAttorneysStepIn, "replacement attorneys step in" {
        /// Once none of the original attorneys can act.
        WhenAllCanNoLongerAct => "all-can-no-longer-act",
        /// As soon as any one of the original attorneys cannot act.
        WhenOneCanNoLongerAct => "one-can-no-longer-act",
        /// Some other arrangement, described in free text.
        AnotherWay => "another-way",
    }
}

vocabulary! {
    /// How an actor carries out their part of the application.
    Channel, "channel" {
        /// Using the online service.
        Online => "online",
        /// Using paper forms.
        Paper => "paper",
    }
}

vocabulary! {
    /// How a certificate provider knows the donor.
    Relationship, "relationship" {
        /// Friend, neighbour, colleague or similar.
        Personally => "personally",
        /// Doctor, solicitor or other professional.
        Professionally => "professionally",
    }
}

vocabulary! {
    /// How long a certificate provider has personally known the donor.
    RelationshipLength, "relationship length" {
        /// Less than two years: not eligible.
        LessThanTwoYears => "lt-2-years",
        /// Two years or more.
        GreaterThanEqualToTwoYears => "gte-2-years",
    }
}

vocabulary! {
    /// A yes/no answer.
    YesNo, "yes/no answer" {
        /// Yes.
        Yes => "yes",
        /// No.
        No => "no",
    }
}

vocabulary! {
    /// Outcome of the donor's identity check.
    IdentityStatus, "identity status" {
        /// No identity check has been started.
        Unknown => "unknown",
        /// Identity confirmed by the provider.
        Confirmed => "confirmed",
        /// The identity check failed.
        Failed => "failed",
        /// Not enough evidence was supplied.
        InsufficientEvidence => "insufficient-evidence",
        /// A previously confirmed identity has expired.
        Expired => "expired",
    }
}

impl Default for IdentityStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

impl YesNo {
    /// Whether the answer is yes.
    pub fn is_yes(&self) -> bool {
        *self == Self::Yes
    }

    /// Whether the answer is no.
    pub fn is_no(&self) -> bool {
        *self == Self::No
    }
}
