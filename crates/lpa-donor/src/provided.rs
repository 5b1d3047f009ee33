//! # Provided — the Donor's Application Aggregate
//!
//! Everything the donor and the service record about one LPA application.
//! Actors, answers, cached task states, witness codes and the stored change
//! hashes all live here; nothing inside is persisted independently.
//!
//! ## Lifecycle
//!
//! An application is created once with every derived field zero. Each
//! mutation is followed by [`Provided::reconcile`], which normalises the
//! attorney decisions and then refreshes the derived task states, before
//! the record is handed to [`crate::store::DonorStore::put`]. Once
//! `signed_at` is set the donor may no longer change section-one content
//! ([`Provided::can_change`]); other actors may still correct details.
//!
//! ## Serialization
//!
//! Field names are part of the change-hash surface: renaming a field
//! changes every stored hash and must come with a hash version bump.

use chrono::{DateTime, Utc};
use lpa_core::{
    Address, CanBeUsedWhen, LifeSustainingTreatment, LpaId, LpaType,
    ReplacementAttorneysStepIn, YesNo,
};
use lpa_witness::{Limiter, WitnessCodes};
use serde::{Deserialize, Serialize};

use crate::actors::{
    AuthorisedSignatory, CertificateProvider, Correspondent, Donor, IdentityUserData,
    IndependentWitness, PersonToNotify, Voucher,
};
use crate::attorneys::{AttorneyDecisions, Attorneys};
use crate::payment::{EvidenceDelivery, FeeType, PaymentDetail};
use crate::tasks::Tasks;
use crate::task_state;

/// The donor-provided application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Provided {
    pub pk: String,
    pub sk: String,
    /// Primary change hash as of the last write.
    pub hash: u64,
    /// Which field set `hash` was computed over.
    pub hash_version: u8,
    pub lpa_id: LpaId,
    /// External reference assigned once the application is submitted.
    pub lpa_uid: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    pub donor: Donor,
    pub attorneys: Attorneys,
    pub attorney_decisions: AttorneyDecisions,
    pub certificate_provider: CertificateProvider,
    pub lpa_type: Option<LpaType>,
    pub want_replacement_attorneys: Option<YesNo>,
    pub when_can_the_lpa_be_used: Option<CanBeUsedWhen>,
    pub life_sustaining_treatment_option: Option<LifeSustainingTreatment>,
    pub restrictions: String,
    pub tasks: Tasks,
    pub payment_details: Vec<PaymentDetail>,
    pub identity_user_data: IdentityUserData,
    pub replacement_attorneys: Attorneys,
    pub replacement_attorney_decisions: AttorneyDecisions,
    pub how_should_replacement_attorneys_step_in: Option<ReplacementAttorneysStepIn>,
    pub how_should_replacement_attorneys_step_in_details: String,
    pub add_correspondent: Option<YesNo>,
    pub correspondent: Correspondent,
    pub do_you_want_to_notify_people: Option<YesNo>,
    pub people_to_notify: Vec<PersonToNotify>,
    pub authorised_signatory: AuthorisedSignatory,
    pub independent_witness: IndependentWitness,
    pub want_to_apply_for_lpa: bool,
    pub want_to_sign_lpa: bool,

    pub certificate_provider_not_related_confirmed_at: Option<DateTime<Utc>>,
    pub certificate_provider_not_related_confirmed_hash: u64,
    pub certificate_provider_not_related_confirmed_hash_version: u8,

    /// When the donor last confirmed the application on check-your-lpa.
    pub checked_at: Option<DateTime<Utc>>,
    /// Checked hash as of the donor's last confirmation.
    pub checked_hash: u64,
    pub checked_hash_version: u8,

    pub signed_at: Option<DateTime<Utc>>,
    pub withdrawn_at: Option<DateTime<Utc>>,
    pub statutory_waiting_period_at: Option<DateTime<Utc>>,
    pub do_not_register_at: Option<DateTime<Utc>>,
    pub registering_with_court_of_protection: bool,
    pub continue_with_mismatched_identity: bool,
    /// Optimistic-concurrency counter owned by the persistence layer.
    pub version: u64,

    pub want_voucher: Option<YesNo>,
    pub voucher: Voucher,
    pub vouch_attempts: u32,
    pub failed_voucher: Voucher,

    pub certificate_provider_codes: WitnessCodes,
    pub witnessed_by_certificate_provider_at: Option<DateTime<Utc>>,
    pub independent_witness_codes: WitnessCodes,
    pub witnessed_by_independent_witness_at: Option<DateTime<Utc>>,
    pub witness_code_limiter: Option<Limiter>,

    pub fee_type: Option<FeeType>,
    pub evidence_delivery: Option<EvidenceDelivery>,
    pub previous_application_number: String,
    pub previous_fee: Option<FeeType>,
    pub cost_of_repeat_application: String,

    pub certificate_provider_invited_at: Option<DateTime<Utc>>,
    pub attorneys_invited_at: Option<DateTime<Utc>>,
    pub voucher_invited_at: Option<DateTime<Utc>>,
    pub details_verified_by_voucher: bool,
    pub more_evidence_required_at: Option<DateTime<Utc>>,
    pub priority_correspondence_sent_at: Option<DateTime<Utc>>,
    pub material_change_confirmed_at: Option<DateTime<Utc>>,
    pub immaterial_change_confirmed_at: Option<DateTime<Utc>>,

    pub has_seen_successful_vouch_banner: bool,
    pub has_seen_reduced_fee_approval_notification: bool,
    pub has_seen_identity_mismatch_resolved_notification: bool,
    pub has_seen_certificate_provider_identity_mismatch_resolved_notification: bool,
    pub reduced_fee_approved_at: Option<DateTime<Utc>>,
    pub identity_details_caused_check: bool,

    /// Set once the application-updated event has been sent for `lpa_uid`.
    pub has_sent_application_updated_event: bool,
}

impl Provided {
    /// A new, empty application.
    pub fn new(lpa_id: LpaId, now: DateTime<Utc>) -> Self {
        Self {
            pk: format!("LPA#{lpa_id}"),
            sk: "DONOR".to_string(),
            lpa_id,
            created_at: Some(now),
            ..Default::default()
        }
    }

    /// Whether the donor may still change section-one content.
    pub fn can_change(&self) -> bool {
        self.signed_at.is_none()
    }

    pub fn is_personal_welfare(&self) -> bool {
        self.lpa_type == Some(LpaType::PersonalWelfare)
    }

    pub fn is_property_and_affairs(&self) -> bool {
        self.lpa_type == Some(LpaType::PropertyAndAffairs)
    }

    pub fn donor_can_sign(&self) -> bool {
        self.donor.can_sign == Some(YesNo::Yes)
    }

    // ─── Decision normalisation ─────────────────────────────────────

    /// Clear decision fields made meaningless by the current number of
    /// attorneys and replacement attorneys and the chosen decision modes.
    ///
    /// Must run after any change to either attorney group or to a decision
    /// mode, before task states are derived.
    pub fn update_decisions(&mut self) {
        if self.attorneys.len() <= 1 {
            self.attorney_decisions = AttorneyDecisions::default();
        } else if !self.attorney_decisions.is_jointly_for_some_severally_for_others() {
            self.attorney_decisions.details.clear();
        }

        if self.replacement_attorneys.len() <= 1 {
            self.replacement_attorney_decisions = AttorneyDecisions::default();
        } else {
            if !self
                .replacement_attorney_decisions
                .is_jointly_for_some_severally_for_others()
            {
                self.replacement_attorney_decisions.details.clear();
            }

            if self.attorneys.len() == 1 || self.attorney_decisions.is_jointly() {
                self.how_should_replacement_attorneys_step_in = None;
            } else if self.attorney_decisions.is_jointly_and_severally() {
                if self.replacement_attorneys.len() <= 1
                    || self.how_should_replacement_attorneys_step_in
                        != Some(ReplacementAttorneysStepIn::WhenAllCanNoLongerAct)
                {
                    self.replacement_attorney_decisions = AttorneyDecisions::default();
                }
            } else {
                self.replacement_attorney_decisions = AttorneyDecisions::default();
                self.how_should_replacement_attorneys_step_in = None;
            }
        }
    }

    /// Normalise decisions, then refresh every derivable task state.
    pub fn reconcile(&mut self) {
        self.update_decisions();
        self.refresh_tasks();
    }

    /// Recompute the task state of every section derivable from data.
    pub fn refresh_tasks(&mut self) {
        self.tasks.your_details = task_state::your_details_state(&self.donor);
        self.tasks.choose_attorneys =
            task_state::choose_attorneys_state(&self.attorneys, &self.attorney_decisions);
        self.tasks.choose_replacement_attorneys =
            task_state::choose_replacement_attorneys_state(self);
        self.tasks.when_can_the_lpa_be_used = task_state::when_can_the_lpa_be_used_state(self);
        self.tasks.life_sustaining_treatment = task_state::life_sustaining_treatment_state(self);
        self.tasks.certificate_provider =
            task_state::certificate_provider_state(&self.certificate_provider);
        self.tasks.people_to_notify = task_state::people_to_notify_state(self);
        self.tasks.add_correspondent = task_state::add_correspondent_state(self);
    }

    // ─── Completion ─────────────────────────────────────────────────

    /// Whether every section needed before payment is complete, including
    /// the donor's confirmation on check-your-lpa.
    pub fn section_one_completed(&self) -> bool {
        self.section_one_completed_before_check() && self.tasks.check_your_lpa.is_completed()
    }

    /// Whether every section-one task other than check-your-lpa is complete.
    pub fn section_one_completed_before_check(&self) -> bool {
        let t = &self.tasks;
        t.your_details.is_completed()
            && t.choose_attorneys.is_completed()
            && t.choose_replacement_attorneys.is_completed()
            && (self.is_personal_welfare() && t.life_sustaining_treatment.is_completed()
                || self.is_property_and_affairs() && t.when_can_the_lpa_be_used.is_completed())
            && t.restrictions.is_completed()
            && t.certificate_provider.is_completed()
            && t.people_to_notify.is_completed()
            && (self.donor_can_sign() || t.choose_your_signatory.is_completed())
    }

    /// Whether every task on the donor's task list is complete.
    pub fn completed_all_tasks(&self) -> bool {
        self.section_one_completed()
            && self.tasks.pay_for_lpa.is_completed()
            && self.tasks.confirm_your_identity.is_completed()
            && self.tasks.sign_the_lpa.is_completed()
    }

    /// Whether the identity check confirmed the donor as entered, or a
    /// mismatch was accepted as immaterial.
    pub fn donor_identity_confirmed(&self) -> bool {
        let id = &self.identity_user_data;
        let matches = id.is_confirmed()
            && id.matches_name(&self.donor.first_names, &self.donor.last_name)
            && id.date_of_birth.is_some()
            && id.date_of_birth == self.donor.date_of_birth;

        matches
            || (self.continue_with_mismatched_identity
                && self.immaterial_change_confirmed_at.is_some())
    }

    // ─── Certificate provider relationship ──────────────────────────

    /// Whether the certificate provider appears related to the donor or an
    /// attorney, by a shared last-name part or a shared address.
    ///
    /// Returns false once the donor has confirmed they are not related and
    /// none of the people involved have changed since.
    pub fn certificate_provider_shares_details(&self) -> bool {
        if self.certificate_provider_not_related_confirmed_at.is_some()
            && !self.certificate_provider_not_related_confirmed_hash_changed()
        {
            return false;
        }

        let cp = &self.certificate_provider;

        let mut people = vec![(self.donor.last_name.as_str(), &self.donor.address)];
        people.extend(
            self.attorneys
                .attorneys
                .iter()
                .chain(&self.replacement_attorneys.attorneys)
                .map(|a| (a.last_name.as_str(), &a.address)),
        );

        people.into_iter().any(|(last_name, address)| {
            shares_last_name_part(&cp.last_name, last_name) || same_address(&cp.address, address)
        })
    }
}

/// Whether any hyphen-separated part of `a` is also a part of `b`. Parts
/// are compared exactly, so two empty names match.
fn shares_last_name_part(a: &str, b: &str) -> bool {
    let b_parts: Vec<&str> = b.split('-').collect();
    a.split('-').any(|part| b_parts.contains(&part))
}

fn same_address(a: &Address, b: &Address) -> bool {
    a.line1 == b.line1 && a.postcode == b.postcode
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attorneys::{Attorney, TrustCorporation};
    use chrono::TimeZone;
    use lpa_core::{ActorUid, AttorneysAct};
    use lpa_task::{IdentityState, PaymentState, State};

    fn attorneys(n: usize) -> Attorneys {
        Attorneys {
            attorneys: (0..n)
                .map(|_| Attorney {
                    uid: ActorUid::new(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn decisions(how: AttorneysAct) -> AttorneyDecisions {
        AttorneyDecisions {
            how: Some(how),
            details: "hey".into(),
        }
    }

    // ── update_decisions: primary ───────────────────────────────────

    #[test]
    fn test_update_decisions_no_attorneys() {
        let mut p = Provided {
            attorney_decisions: decisions(AttorneysAct::Jointly),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.attorney_decisions.is_zero());
    }

    #[test]
    fn test_update_decisions_one_attorney() {
        let mut p = Provided {
            attorneys: attorneys(1),
            attorney_decisions: decisions(AttorneysAct::JointlyForSomeSeverallyForOthers),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.attorney_decisions.is_zero());
    }

    #[test]
    fn test_update_decisions_trust_corporation_only_counts_as_one() {
        let mut p = Provided {
            attorneys: Attorneys {
                trust_corporation: TrustCorporation {
                    name: "Trusty".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            attorney_decisions: decisions(AttorneysAct::Jointly),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.attorney_decisions.is_zero());
    }

    #[test]
    fn test_update_decisions_many_attorneys_jointly_clears_details() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::Jointly),
            ..Default::default()
        };
        p.update_decisions();
        assert_eq!(p.attorney_decisions, AttorneyDecisions::new(AttorneysAct::Jointly, ""));
    }

    #[test]
    fn test_update_decisions_jointly_for_some_keeps_details() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyForSomeSeverallyForOthers),
            ..Default::default()
        };
        p.update_decisions();
        assert_eq!(
            p.attorney_decisions,
            decisions(AttorneysAct::JointlyForSomeSeverallyForOthers)
        );
    }

    // ── update_decisions: replacements ──────────────────────────────

    #[test]
    fn test_update_decisions_one_replacement_resets_decisions() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyAndSeverally),
            replacement_attorneys: attorneys(1),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenAllCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.replacement_attorney_decisions.is_zero());
        assert_eq!(
            p.how_should_replacement_attorneys_step_in,
            Some(ReplacementAttorneysStepIn::WhenAllCanNoLongerAct)
        );
    }

    #[test]
    fn test_update_decisions_many_replacements_one_attorney_clears_step_in() {
        let mut p = Provided {
            attorneys: attorneys(1),
            replacement_attorneys: attorneys(2),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(ReplacementAttorneysStepIn::AnotherWay),
            how_should_replacement_attorneys_step_in_details: "details".into(),
            ..Default::default()
        };
        p.update_decisions();
        assert_eq!(
            p.replacement_attorney_decisions,
            AttorneyDecisions::new(AttorneysAct::Jointly, "")
        );
        assert_eq!(p.how_should_replacement_attorneys_step_in, None);
        // Only the mode is reset; the free-text answer stays for the donor
        // to reuse if they pick "another way" again.
        assert_eq!(p.how_should_replacement_attorneys_step_in_details, "details");
    }

    #[test]
    fn test_update_decisions_primary_jointly_clears_step_in() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::Jointly),
            replacement_attorneys: attorneys(2),
            replacement_attorney_decisions: decisions(
                AttorneysAct::JointlyForSomeSeverallyForOthers,
            ),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenOneCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        assert_eq!(
            p.replacement_attorney_decisions,
            decisions(AttorneysAct::JointlyForSomeSeverallyForOthers)
        );
        assert_eq!(p.how_should_replacement_attorneys_step_in, None);
    }

    #[test]
    fn test_update_decisions_jointly_and_severally_one_can_no_longer_act() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyAndSeverally),
            replacement_attorneys: attorneys(2),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenOneCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.replacement_attorney_decisions.is_zero());
        assert_eq!(
            p.how_should_replacement_attorneys_step_in,
            Some(ReplacementAttorneysStepIn::WhenOneCanNoLongerAct)
        );
    }

    #[test]
    fn test_update_decisions_jointly_and_severally_all_can_no_longer_act() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyAndSeverally),
            replacement_attorneys: attorneys(2),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenAllCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        assert_eq!(
            p.replacement_attorney_decisions,
            AttorneyDecisions::new(AttorneysAct::Jointly, "")
        );
        assert_eq!(
            p.how_should_replacement_attorneys_step_in,
            Some(ReplacementAttorneysStepIn::WhenAllCanNoLongerAct)
        );
        // Primary details are cleared too.
        assert!(p.attorney_decisions.details.is_empty());
    }

    #[test]
    fn test_update_decisions_jointly_for_some_clears_step_in_and_decisions() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyForSomeSeverallyForOthers),
            replacement_attorneys: attorneys(2),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenAllCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        assert!(p.replacement_attorney_decisions.is_zero());
        assert_eq!(p.how_should_replacement_attorneys_step_in, None);
    }

    #[test]
    fn test_update_decisions_is_idempotent() {
        let mut p = Provided {
            attorneys: attorneys(2),
            attorney_decisions: decisions(AttorneysAct::JointlyAndSeverally),
            replacement_attorneys: attorneys(3),
            replacement_attorney_decisions: decisions(AttorneysAct::Jointly),
            how_should_replacement_attorneys_step_in: Some(
                ReplacementAttorneysStepIn::WhenAllCanNoLongerAct,
            ),
            ..Default::default()
        };
        p.update_decisions();
        let once = p.clone();
        p.update_decisions();
        assert_eq!(p, once);
    }

    // ── Completion ──────────────────────────────────────────────────

    fn section_one_tasks() -> Tasks {
        Tasks {
            your_details: State::Completed,
            choose_attorneys: State::Completed,
            choose_replacement_attorneys: State::Completed,
            when_can_the_lpa_be_used: State::Completed,
            restrictions: State::Completed,
            certificate_provider: State::Completed,
            people_to_notify: State::Completed,
            check_your_lpa: State::Completed,
            ..Default::default()
        }
    }

    #[test]
    fn test_section_one_completed_property_and_affairs() {
        let mut p = Provided {
            lpa_type: Some(LpaType::PropertyAndAffairs),
            tasks: section_one_tasks(),
            donor: Donor {
                can_sign: Some(YesNo::Yes),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(p.section_one_completed());

        p.tasks.check_your_lpa = State::InProgress;
        assert!(!p.section_one_completed());
    }

    #[test]
    fn test_section_one_needs_type_specific_task() {
        let p = Provided {
            lpa_type: Some(LpaType::PersonalWelfare),
            tasks: section_one_tasks(),
            donor: Donor {
                can_sign: Some(YesNo::Yes),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!p.section_one_completed());
    }

    #[test]
    fn test_section_one_needs_signatory_when_donor_cannot_sign() {
        let mut p = Provided {
            lpa_type: Some(LpaType::PropertyAndAffairs),
            tasks: section_one_tasks(),
            donor: Donor {
                can_sign: Some(YesNo::No),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(!p.section_one_completed());

        p.tasks.choose_your_signatory = State::Completed;
        assert!(p.section_one_completed());
    }

    #[test]
    fn test_completed_all_tasks() {
        let mut p = Provided {
            lpa_type: Some(LpaType::PropertyAndAffairs),
            tasks: section_one_tasks(),
            donor: Donor {
                can_sign: Some(YesNo::Yes),
                ..Default::default()
            },
            ..Default::default()
        };
        p.tasks.pay_for_lpa = PaymentState::Completed;
        p.tasks.confirm_your_identity = IdentityState::Completed;
        assert!(!p.completed_all_tasks());

        p.tasks.sign_the_lpa = State::Completed;
        assert!(p.completed_all_tasks());

        p.tasks.pay_for_lpa = PaymentState::Pending;
        assert!(!p.completed_all_tasks());
    }

    // ── Identity ────────────────────────────────────────────────────

    #[test]
    fn test_donor_identity_confirmed() {
        let dob = chrono::NaiveDate::from_ymd_opt(1970, 1, 2);
        let mut p = Provided {
            donor: Donor {
                first_names: "Sam".into(),
                last_name: "Smith".into(),
                date_of_birth: dob,
                ..Default::default()
            },
            identity_user_data: IdentityUserData {
                status: lpa_core::IdentityStatus::Confirmed,
                first_names: "Sam".into(),
                last_name: "Smith".into(),
                date_of_birth: dob,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(p.donor_identity_confirmed());

        p.donor.last_name = "Smythe".into();
        assert!(!p.donor_identity_confirmed());

        p.continue_with_mismatched_identity = true;
        assert!(!p.donor_identity_confirmed());

        p.immaterial_change_confirmed_at = Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(p.donor_identity_confirmed());
    }

    #[test]
    fn test_unconfirmed_identity() {
        let p = Provided::default();
        assert!(!p.donor_identity_confirmed());
    }

    // ── Misc ────────────────────────────────────────────────────────

    #[test]
    fn test_can_change_until_signed() {
        let mut p = Provided::new(LpaId("lpa-1".into()), Utc::now());
        assert!(p.can_change());
        p.signed_at = Some(Utc::now());
        assert!(!p.can_change());
    }

    #[test]
    fn test_new_sets_keys() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let p = Provided::new(LpaId("lpa-1".into()), now);
        assert_eq!(p.pk, "LPA#lpa-1");
        assert_eq!(p.sk, "DONOR");
        assert_eq!(p.created_at, Some(now));
        assert_eq!(p.hash, 0);
    }

    // ── Certificate provider shares details ─────────────────────────

    fn sharing_base() -> Provided {
        Provided {
            donor: Donor {
                last_name: "Smith".into(),
                address: Address {
                    line1: "1 Road".into(),
                    postcode: "AB1 2CD".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            certificate_provider: CertificateProvider {
                last_name: "Jones".into(),
                address: Address {
                    line1: "2 Street".into(),
                    postcode: "EF3 4GH".into(),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_shares_details_none() {
        assert!(!sharing_base().certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_last_name_part() {
        let mut p = sharing_base();
        p.certificate_provider.last_name = "Jones-Smith".into();
        assert!(p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_attorney_last_name() {
        let mut p = sharing_base();
        p.replacement_attorneys.attorneys.push(Attorney {
            last_name: "Jones".into(),
            ..Default::default()
        });
        assert!(p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_same_address() {
        let mut p = sharing_base();
        p.certificate_provider.address = p.donor.address.clone();
        assert!(p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_address_needs_line1_and_postcode() {
        let mut p = sharing_base();
        p.certificate_provider.address.line1 = "1 Road".into();
        assert!(!p.certificate_provider_shares_details());

        p.certificate_provider.address.line1 = "2 Street".into();
        p.certificate_provider.address.postcode = "AB1 2CD".into();
        assert!(!p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_compares_exactly() {
        let mut p = sharing_base();
        p.certificate_provider.last_name = "smith".into();
        p.certificate_provider.address = Address {
            line1: "1 road".into(),
            postcode: "AB12CD".into(),
            ..Default::default()
        };
        assert!(!p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_empty_values_match() {
        let mut p = sharing_base();
        p.certificate_provider.last_name.clear();
        p.donor.last_name.clear();
        assert!(p.certificate_provider_shares_details());

        let mut p = sharing_base();
        p.certificate_provider.address = Address::default();
        p.donor.address = Address::default();
        assert!(p.certificate_provider_shares_details());
    }

    #[test]
    fn test_shares_details_last_name_table() {
        let cases: Vec<(&str, &str, Vec<&str>, Vec<&str>, bool)> = vec![
            ("a", "", vec!["b"], vec!["c"], false),
            ("a", "a", vec![], vec![], true),
            ("a", "", vec!["b", "a"], vec![], true),
            ("a", "", vec![], vec!["b", "a"], true),
            ("a-c", "a", vec![], vec![], true),
            ("c-a", "a", vec![], vec![], true),
            ("a", "a-c", vec![], vec![], true),
            ("a", "c-a", vec![], vec![], true),
            ("a-c", "", vec!["b", "a"], vec![], true),
            ("c-a", "", vec!["b", "a"], vec![], true),
            ("a", "", vec!["b", "a-c"], vec![], true),
            ("a", "", vec!["b", "c-a"], vec![], true),
            ("a-c", "", vec![], vec!["b", "a"], true),
            ("c-a", "", vec![], vec!["b", "a"], true),
            ("a", "", vec![], vec!["b", "a-c"], true),
            ("a", "", vec![], vec!["b", "c-a"], true),
        ];

        for (cp, donor, attorneys, replacements, expected) in &cases {
            let person = |last_name: &str| Attorney {
                last_name: last_name.into(),
                address: Address {
                    line1: "y".into(),
                    ..Default::default()
                },
                ..Default::default()
            };
            let mut p = Provided {
                donor: Donor {
                    last_name: donor.to_string(),
                    address: Address {
                        line1: "y".into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                certificate_provider: CertificateProvider {
                    last_name: cp.to_string(),
                    address: Address {
                        line1: "x".into(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                ..Default::default()
            };
            p.attorneys.attorneys = attorneys.iter().map(|n| person(*n)).collect();
            p.replacement_attorneys.attorneys = replacements.iter().map(|n| person(*n)).collect();

            assert_eq!(
                p.certificate_provider_shares_details(),
                *expected,
                "cp {cp:?} donor {donor:?} attorneys {attorneys:?} replacements {replacements:?}"
            );
        }
    }

    #[test]
    fn test_shares_details_address_table() {
        let addr = |line1: &str, postcode: &str| Address {
            line1: line1.into(),
            postcode: postcode.into(),
            ..Default::default()
        };
        let a = addr("a", "a");
        let b = addr("b", "a");
        let c = addr("a", "b");

        let cases: Vec<(Address, Vec<Address>, Vec<Address>, bool)> = vec![
            (addr("z", "z"), vec![b.clone()], vec![c.clone()], false),
            (a.clone(), vec![], vec![], true),
            (addr("z", "z"), vec![b.clone(), a.clone()], vec![], true),
            (addr("z", "z"), vec![], vec![b.clone(), a.clone()], true),
        ];

        for (donor, attorneys, replacements, expected) in cases {
            let person = |address: &Address| Attorney {
                last_name: "y".into(),
                address: address.clone(),
                ..Default::default()
            };
            let mut p = Provided {
                donor: Donor {
                    last_name: "y".into(),
                    address: donor.clone(),
                    ..Default::default()
                },
                certificate_provider: CertificateProvider {
                    last_name: "x".into(),
                    address: a.clone(),
                    ..Default::default()
                },
                ..Default::default()
            };
            p.attorneys.attorneys = attorneys.iter().map(person).collect();
            p.replacement_attorneys.attorneys = replacements.iter().map(person).collect();

            assert_eq!(p.certificate_provider_shares_details(), expected, "donor {donor:?}");
        }
    }

    #[test]
    fn test_shares_details_suppressed_by_confirmation() {
        let mut p = sharing_base();
        p.certificate_provider.last_name = "Smith".into();
        assert!(p.certificate_provider_shares_details());

        p.certificate_provider_not_related_confirmed_at = Some(Utc::now());
        p.update_certificate_provider_not_related_confirmed_hash().unwrap();
        assert!(!p.certificate_provider_shares_details());

        // Unrelated fields do not revoke the confirmation.
        p.restrictions = "none".into();
        assert!(!p.certificate_provider_shares_details());

        // A change to one of the people involved does.
        p.donor.first_names = "Samuel".into();
        assert!(p.certificate_provider_shares_details());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::attorneys::Attorney;
    use lpa_core::{ActorUid, AttorneysAct};
    use proptest::prelude::*;

    fn arb_how() -> impl Strategy<Value = Option<AttorneysAct>> {
        proptest::option::of(proptest::sample::select(AttorneysAct::ALL.to_vec()))
    }

    fn arb_step_in() -> impl Strategy<Value = Option<ReplacementAttorneysStepIn>> {
        proptest::option::of(proptest::sample::select(
            ReplacementAttorneysStepIn::ALL.to_vec(),
        ))
    }

    fn group(n: usize) -> Attorneys {
        Attorneys {
            attorneys: (0..n)
                .map(|_| Attorney {
                    uid: ActorUid::new(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    prop_compose! {
        fn arb_provided()(
            primary in 0usize..4,
            replacements in 0usize..4,
            how in arb_how(),
            details in "[a-z]{0,5}",
            repl_how in arb_how(),
            repl_details in "[a-z]{0,5}",
            step_in in arb_step_in(),
        ) -> Provided {
            Provided {
                attorneys: group(primary),
                attorney_decisions: AttorneyDecisions { how, details },
                replacement_attorneys: group(replacements),
                replacement_attorney_decisions: AttorneyDecisions { how: repl_how, details: repl_details },
                how_should_replacement_attorneys_step_in: step_in,
                ..Default::default()
            }
        }
    }

    proptest! {
        #[test]
        fn single_attorney_decisions_always_zero(mut p in arb_provided()) {
            p.update_decisions();
            if p.attorneys.len() <= 1 {
                prop_assert!(p.attorney_decisions.is_zero());
            }
            if p.replacement_attorneys.len() <= 1 {
                prop_assert!(p.replacement_attorney_decisions.is_zero());
            }
        }

        #[test]
        fn details_only_survive_mixed_mode(mut p in arb_provided()) {
            p.update_decisions();
            for d in [&p.attorney_decisions, &p.replacement_attorney_decisions] {
                if !d.is_jointly_for_some_severally_for_others() {
                    prop_assert!(d.details.is_empty());
                }
            }
        }

        #[test]
        fn step_in_only_survives_jointly_and_severally(mut p in arb_provided()) {
            p.update_decisions();
            if p.replacement_attorneys.len() >= 2 && !p.attorney_decisions.is_jointly_and_severally() {
                prop_assert_eq!(p.how_should_replacement_attorneys_step_in, None);
            }
        }

        #[test]
        fn update_decisions_idempotent(mut p in arb_provided()) {
            p.update_decisions();
            let once = p.clone();
            p.update_decisions();
            prop_assert_eq!(p, once);
        }
    }
}
