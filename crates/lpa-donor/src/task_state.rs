//! # Section State Derivation
//!
//! Pure functions from a section's data to its completion state. They read
//! already-normalised decisions, so `Provided::update_decisions` must run
//! first whenever attorney composition or a decision mode changes.
//!
//! ## Rules shared by every section
//!
//! - An actor with only an email address and no first address line is
//!   incomplete; the first address line is authoritative.
//! - A trust corporation is gated independently of individual attorneys.

use lpa_core::{Relationship, RelationshipLength, ReplacementAttorneysStepIn, YesNo};
use lpa_task::State;

use crate::actors::{CertificateProvider, Donor};
use crate::attorneys::{AttorneyDecisions, Attorneys};
use crate::provided::Provided;

/// State of the your-details section.
pub fn your_details_state(donor: &Donor) -> State {
    if donor.first_names.is_empty() && donor.last_name.is_empty() {
        return State::NotStarted;
    }

    let complete = !donor.first_names.is_empty()
        && !donor.last_name.is_empty()
        && donor.date_of_birth.is_some()
        && donor.address.has_line1()
        && donor.can_sign.is_some();

    if complete {
        State::Completed
    } else {
        State::InProgress
    }
}

/// State of the choose-attorneys section.
pub fn choose_attorneys_state(attorneys: &Attorneys, decisions: &AttorneyDecisions) -> State {
    if attorneys.is_empty() {
        return State::NotStarted;
    }

    if !attorneys.complete() {
        return State::InProgress;
    }

    if attorneys.len() > 1 && !decisions.is_complete() {
        return State::InProgress;
    }

    State::Completed
}

/// State of the choose-replacement-attorneys section.
///
/// What a complete answer needs depends on how the original attorneys act.
/// When they act jointly for some decisions and severally for others, no
/// step-in or replacement decision is asked for.
pub fn choose_replacement_attorneys_state(provided: &Provided) -> State {
    if provided.want_replacement_attorneys == Some(YesNo::No) {
        return State::Completed;
    }

    let replacements = &provided.replacement_attorneys;
    let replacement_decisions = &provided.replacement_attorney_decisions;

    if replacements.is_empty() {
        return match provided.want_replacement_attorneys {
            None => State::NotStarted,
            Some(_) => State::InProgress,
        };
    }

    if !replacements.complete() {
        return State::InProgress;
    }

    if replacements.len() > 1
        && (provided.attorneys.len() == 1 || provided.attorney_decisions.is_jointly())
        && !replacement_decisions.is_complete()
    {
        return State::InProgress;
    }

    if provided.attorney_decisions.is_jointly_and_severally() {
        match provided.how_should_replacement_attorneys_step_in {
            None => return State::InProgress,
            Some(ReplacementAttorneysStepIn::WhenAllCanNoLongerAct)
                if replacements.len() > 1 && !replacement_decisions.is_complete() =>
            {
                return State::InProgress
            }
            Some(_) => {}
        }
    }

    State::Completed
}

/// State of the when-can-the-LPA-be-used section (property and affairs).
pub fn when_can_the_lpa_be_used_state(provided: &Provided) -> State {
    answered(provided.when_can_the_lpa_be_used.is_some())
}

/// State of the life-sustaining-treatment section (personal welfare).
pub fn life_sustaining_treatment_state(provided: &Provided) -> State {
    answered(provided.life_sustaining_treatment_option.is_some())
}

fn answered(is_answered: bool) -> State {
    if is_answered {
        State::Completed
    } else {
        State::NotStarted
    }
}

/// State of the certificate-provider section.
pub fn certificate_provider_state(cp: &CertificateProvider) -> State {
    if cp.first_names.is_empty() && cp.last_name.is_empty() {
        return State::NotStarted;
    }

    let relationship_ok = match cp.relationship {
        Some(Relationship::Professionally) => true,
        Some(Relationship::Personally) => {
            cp.relationship_length == Some(RelationshipLength::GreaterThanEqualToTwoYears)
        }
        None => false,
    };

    if cp.address.has_line1() && cp.carry_out_by.is_some() && relationship_ok {
        State::Completed
    } else {
        State::InProgress
    }
}

/// State of the people-to-notify section.
pub fn people_to_notify_state(provided: &Provided) -> State {
    match provided.do_you_want_to_notify_people {
        None => State::NotStarted,
        Some(YesNo::No) => State::Completed,
        Some(YesNo::Yes) => {
            let people = &provided.people_to_notify;
            if !people.is_empty() && people.iter().all(|p| p.address.has_line1()) {
                State::Completed
            } else {
                State::InProgress
            }
        }
    }
}

/// State of the add-correspondent section.
pub fn add_correspondent_state(provided: &Provided) -> State {
    match provided.add_correspondent {
        None => State::NotStarted,
        Some(YesNo::No) => State::Completed,
        Some(YesNo::Yes) => match provided.correspondent.want_address {
            None => State::InProgress,
            Some(YesNo::No) => State::Completed,
            Some(YesNo::Yes) if provided.correspondent.address.has_line1() => State::Completed,
            Some(YesNo::Yes) => State::InProgress,
        },
    }
}
